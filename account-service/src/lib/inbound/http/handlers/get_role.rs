use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::CurrentUser;

/// Return the authenticated caller's role.
pub async fn get_role(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<ApiSuccess<RoleData>, ApiError> {
    Ok(ApiSuccess::new(
        StatusCode::OK,
        RoleData {
            role: user.role.as_str().to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleData {
    pub role: String,
}
