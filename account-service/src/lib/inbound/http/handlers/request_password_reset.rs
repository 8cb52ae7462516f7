use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::user::ports::ResetNotifier;
use crate::user::ports::UserRepository;

/// Start the emailed password-reset flow.
///
/// The response is uniform whether or not the email is registered; only a
/// known address actually gets a token issued and a link sent.
pub async fn request_password_reset<UR, RN>(
    State(state): State<AppState<UR, RN>>,
    Json(body): Json<ResetPasswordRequestBody>,
) -> Result<ApiSuccess<ResetPasswordRequestData>, ApiError>
where
    UR: UserRepository,
    RN: ResetNotifier,
{
    state
        .user_service
        .request_password_reset(&body.email)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ResetPasswordRequestData {
            message: "If the account exists, a reset link has been sent".to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResetPasswordRequestBody {
    email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetPasswordRequestData {
    pub message: String,
}
