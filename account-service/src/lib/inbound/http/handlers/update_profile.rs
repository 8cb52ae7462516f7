use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::Address;
use crate::domain::user::models::CartItem;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::UserId;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;
use crate::user::ports::ResetNotifier;
use crate::user::ports::UserRepository;

/// HTTP request body for a profile update (raw JSON).
///
/// Address and cart lists are replacements, not merges; submitting empty
/// lists clears the stored sets.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: String,
    pub phone: Option<String>,
    pub addresses: Vec<AddressBody>,
    pub cart: Vec<CartItemBody>,
}

#[derive(Debug, Deserialize)]
pub struct AddressBody {
    pub street: String,
    pub city: String,
    pub zip: String,
}

#[derive(Debug, Deserialize)]
pub struct CartItemBody {
    pub product_id: i64,
    pub quantity: i32,
}

impl UpdateProfileRequest {
    fn into_command(self) -> UpdateProfileCommand {
        UpdateProfileCommand {
            name: self.name,
            phone: self.phone,
            addresses: self
                .addresses
                .into_iter()
                .map(|a| Address {
                    street: a.street,
                    city: a.city,
                    zip: a.zip,
                })
                .collect(),
            cart_items: self
                .cart
                .into_iter()
                .map(|c| CartItem {
                    product_id: c.product_id,
                    quantity: c.quantity,
                })
                .collect(),
        }
    }
}

pub async fn update_profile<UR, RN>(
    State(state): State<AppState<UR, RN>>,
    Extension(CurrentUser(caller)): Extension<CurrentUser>,
    Path(user_id): Path<String>,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<ApiSuccess<UserData>, ApiError>
where
    UR: UserRepository,
    RN: ResetNotifier,
{
    let target = UserId::from_string(&user_id).map_err(UserError::from)?;

    state
        .user_service
        .update_profile(&caller, target, body.into_command())
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
