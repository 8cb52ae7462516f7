use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use crate::domain::user::models::UserId;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;
use crate::user::ports::ResetNotifier;
use crate::user::ports::UserRepository;

/// Change a user's password under the self-or-admin rule.
///
/// Outstanding tokens remain valid until expiry; there is no revocation.
pub async fn change_password<UR, RN>(
    State(state): State<AppState<UR, RN>>,
    Extension(CurrentUser(caller)): Extension<CurrentUser>,
    Path(user_id): Path<String>,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<StatusCode, ApiError>
where
    UR: UserRepository,
    RN: ResetNotifier,
{
    let target = UserId::from_string(&user_id).map_err(UserError::from)?;

    state
        .user_service
        .change_password(&caller, target, &body.password)
        .await
        .map_err(ApiError::from)?;

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChangePasswordRequest {
    password: String,
}
