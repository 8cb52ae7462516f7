use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::user::ports::ResetNotifier;
use crate::user::ports::UserRepository;

/// Validate the token carried by an emailed reset link.
///
/// A client opens this before showing the reset form; invalid and expired
/// tokens get the same 400.
pub async fn reset_password_form<UR, RN>(
    State(state): State<AppState<UR, RN>>,
    Query(query): Query<ResetPasswordFormQuery>,
) -> Result<ApiSuccess<ResetPasswordFormData>, ApiError>
where
    UR: UserRepository,
    RN: ResetNotifier,
{
    state
        .authenticator
        .verify_token(&query.token)
        .map_err(|_| ApiError::BadRequest("Invalid or expired token".to_string()))?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ResetPasswordFormData {
            msg: "Token valid. Show reset password form".to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResetPasswordFormQuery {
    token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetPasswordFormData {
    pub msg: String,
}
