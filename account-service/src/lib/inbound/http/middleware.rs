use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::domain::user::models::User;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;
use crate::user::ports::ResetNotifier;
use crate::user::ports::UserRepository;

/// Extension type carrying the authenticated account through the request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Middleware that verifies the bearer token and resolves its subject
/// against the directory.
///
/// Invalid, tampered, and expired tokens are all rejected with 401; a token
/// whose subject no longer exists resolves to 404.
pub async fn authenticate<UR, RN>(
    State(state): State<AppState<UR, RN>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response>
where
    UR: UserRepository,
    RN: ResetNotifier,
{
    let token = extract_token_from_header(&req)?;

    let subject = state.authenticator.verify_token(token).map_err(|e| {
        tracing::warn!(error = %e, "Token verification failed");
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Invalid authentication credentials"
            })),
        )
            .into_response()
    })?;

    let user = state
        .user_service
        .get_user_by_email(&subject)
        .await
        .map_err(|e| match e {
            UserError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "User not found"
                })),
            )
                .into_response(),
            other => {
                tracing::error!(error = %other, "Failed to resolve token subject");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "Internal server error"
                    })),
                )
                    .into_response()
            }
        })?;

    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "Missing Authorization header"
                })),
            )
                .into_response()
        })?;

    let auth_str = auth_header.to_str().map_err(|_| {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Invalid Authorization header"
            })),
        )
            .into_response()
    })?;

    if !auth_str.starts_with("Bearer ") {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Invalid Authorization header format. Expected: Bearer <token>"
            })),
        )
            .into_response());
    }

    Ok(auth_str.trim_start_matches("Bearer "))
}
