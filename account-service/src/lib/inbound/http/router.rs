use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::change_password::change_password;
use super::handlers::current_user::current_user;
use super::handlers::get_role::get_role;
use super::handlers::login::login;
use super::handlers::request_password_reset::request_password_reset;
use super::handlers::reset_password_form::reset_password_form;
use super::handlers::signup::signup;
use super::handlers::update_profile::update_profile;
use super::middleware::authenticate as auth_middleware;
use crate::domain::user::service::UserService;
use crate::user::ports::ResetNotifier;
use crate::user::ports::UserRepository;

/// Shared handler state, generic over the directory and notifier ports so
/// tests can inject fakes through the same constructor path as production.
pub struct AppState<UR, RN>
where
    UR: UserRepository,
    RN: ResetNotifier,
{
    pub user_service: Arc<UserService<UR, RN>>,
    pub authenticator: Arc<Authenticator>,
}

impl<UR, RN> Clone for AppState<UR, RN>
where
    UR: UserRepository,
    RN: ResetNotifier,
{
    fn clone(&self) -> Self {
        Self {
            user_service: Arc::clone(&self.user_service),
            authenticator: Arc::clone(&self.authenticator),
        }
    }
}

pub fn create_router<UR, RN>(
    user_service: Arc<UserService<UR, RN>>,
    authenticator: Arc<Authenticator>,
) -> Router
where
    UR: UserRepository,
    RN: ResetNotifier,
{
    let state = AppState {
        user_service,
        authenticator,
    };

    let public_routes = Router::new()
        .route("/users/signup", post(signup::<UR, RN>))
        .route("/users/login", post(login::<UR, RN>))
        .route(
            "/users/reset-password",
            post(request_password_reset::<UR, RN>),
        )
        .route("/reset-password", get(reset_password_form::<UR, RN>));

    let protected_routes = Router::new()
        .route("/users/me", post(current_user))
        .route("/users/:user_id/role", get(get_role))
        .route("/users/:user_id", put(update_profile::<UR, RN>))
        .route(
            "/users/:user_id/reset-password",
            put(change_password::<UR, RN>),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::<UR, RN>,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
