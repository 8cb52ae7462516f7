use async_trait::async_trait;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::NotifierError;
use crate::user::errors::UserError;

/// Persistence operations for the account directory.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user; the store assigns the id.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `PhoneAlreadyExists` - Phone is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// Retrieve a user with their address and cart sets.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve a user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Persist an updated profile.
    ///
    /// Writes name and phone and replaces the address and cart sets
    /// wholesale with the ones on the entity.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `PhoneAlreadyExists` - New phone is already registered
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, user: User) -> Result<User, UserError>;

    /// Overwrite a user's stored password hash.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_password(&self, id: &UserId, password_hash: &str) -> Result<(), UserError>;
}

/// Outbound delivery of password-reset links.
#[async_trait]
pub trait ResetNotifier: Send + Sync + 'static {
    /// Send a reset link to a recipient.
    ///
    /// Callers treat delivery as best-effort: a failure here must never fail
    /// the request that triggered it.
    ///
    /// # Errors
    /// * `NotifierError` - Message could not be built or sent
    async fn send_reset_link(&self, recipient: &str, link: &str) -> Result<(), NotifierError>;
}
