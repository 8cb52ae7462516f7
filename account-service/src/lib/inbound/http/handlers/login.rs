use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;
use crate::user::ports::ResetNotifier;
use crate::user::ports::UserRepository;

/// Password login issuing a bearer token.
///
/// Unknown email and wrong password produce the same 401 so the endpoint
/// cannot be used to enumerate accounts.
pub async fn login<UR, RN>(
    State(state): State<AppState<UR, RN>>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError>
where
    UR: UserRepository,
    RN: ResetNotifier,
{
    let user = state
        .user_service
        .get_user_by_email(&body.email)
        .await
        .map_err(|e| match e {
            UserError::NotFound(_) => ApiError::from(UserError::InvalidCredentials),
            _ => ApiError::from(e),
        })?;

    let result = state
        .authenticator
        .authenticate(&body.password, &user.password_hash, user.email.as_str())
        .map_err(|e| match e {
            auth::AuthenticationError::InvalidCredentials => {
                ApiError::from(UserError::InvalidCredentials)
            }
            auth::AuthenticationError::PasswordError(err) => {
                ApiError::InternalServerError(format!("Password verification failed: {}", err))
            }
            auth::AuthenticationError::TokenError(err) => {
                ApiError::InternalServerError(format!("Token generation failed: {}", err))
            }
        })?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            access_token: result.access_token,
            token_type: "bearer".to_string(),
            user: (&user).into(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub access_token: String,
    pub token_type: String,
    pub user: UserData,
}
