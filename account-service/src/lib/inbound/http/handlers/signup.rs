use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::SignupCommand;
use crate::inbound::http::router::AppState;
use crate::user::errors::EmailError;
use crate::user::ports::ResetNotifier;
use crate::user::ports::UserRepository;

pub async fn signup<UR, RN>(
    State(state): State<AppState<UR, RN>>,
    Json(body): Json<SignupRequest>,
) -> Result<ApiSuccess<UserData>, ApiError>
where
    UR: UserRepository,
    RN: ResetNotifier,
{
    state
        .user_service
        .signup(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

/// HTTP request body for signup (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignupRequest {
    name: String,
    email: String,
    password: String,
}

impl SignupRequest {
    fn try_into_command(self) -> Result<SignupCommand, EmailError> {
        let email = EmailAddress::new(self.email)?;
        Ok(SignupCommand::new(self.name, email, self.password))
    }
}

impl From<EmailError> for ApiError {
    fn from(err: EmailError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
