use std::sync::Arc;

use auth::Authenticator;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::Role;
use crate::domain::user::models::SignupCommand;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::policy;
use crate::user::errors::UserError;
use crate::user::ports::ResetNotifier;
use crate::user::ports::UserRepository;

/// Domain service for account operations.
///
/// Dependencies - the directory, the notifier, and the authenticator -
/// arrive through the constructor, so tests substitute fakes without any
/// shared process state.
pub struct UserService<UR, RN>
where
    UR: UserRepository,
    RN: ResetNotifier,
{
    repository: Arc<UR>,
    notifier: Arc<RN>,
    authenticator: Arc<Authenticator>,
    reset_base_url: String,
}

impl<UR, RN> UserService<UR, RN>
where
    UR: UserRepository,
    RN: ResetNotifier,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account directory implementation
    /// * `notifier` - Reset-link delivery implementation
    /// * `authenticator` - Password hashing and token issuance
    /// * `reset_base_url` - Base URL embedded in reset links
    pub fn new(
        repository: Arc<UR>,
        notifier: Arc<RN>,
        authenticator: Arc<Authenticator>,
        reset_base_url: String,
    ) -> Self {
        Self {
            repository,
            notifier,
            authenticator,
            reset_base_url,
        }
    }

    /// Register a new account.
    ///
    /// Every signup starts with the customer role; the password is hashed
    /// before anything is persisted.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Password` - Password hashing failed
    /// * `DatabaseError` - Database operation failed
    pub async fn signup(&self, command: SignupCommand) -> Result<User, UserError> {
        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(UserError::EmailAlreadyExists(
                command.email.as_str().to_string(),
            ));
        }

        let password_hash = self
            .authenticator
            .hash_password(&command.password)
            .map_err(|e| UserError::Password(e.to_string()))?;

        self.repository
            .create(NewUser {
                name: command.name,
                email: command.email,
                role: Role::Customer,
                password_hash,
            })
            .await
    }

    /// Retrieve an account by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    pub async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    /// Retrieve an account by email address.
    ///
    /// # Errors
    /// * `NotFound` - No account with this email
    /// * `DatabaseError` - Database operation failed
    pub async fn get_user_by_email(&self, email: &str) -> Result<User, UserError> {
        self.repository
            .find_by_email(email)
            .await?
            .ok_or(UserError::NotFound(email.to_string()))
    }

    /// Issue a reset token for an email and hand the link to the notifier.
    ///
    /// Unknown emails are a silent no-op so the endpoint never reveals
    /// whether an address is registered. Delivery is best-effort: a notifier
    /// failure is logged and swallowed, since the caller already received a
    /// uniform response.
    ///
    /// # Errors
    /// * `Unknown` - Token issuance failed
    /// * `DatabaseError` - Database operation failed
    pub async fn request_password_reset(&self, email: &str) -> Result<(), UserError> {
        let Some(user) = self.repository.find_by_email(email).await? else {
            tracing::debug!(email, "Password reset requested for unknown email");
            return Ok(());
        };

        let token = self
            .authenticator
            .issue_token(user.email.as_str())
            .map_err(|e| UserError::Unknown(format!("Token issuance failed: {}", e)))?;

        let link = format!("{}reset-password?token={}", self.reset_base_url, token);

        if let Err(e) = self.notifier.send_reset_link(user.email.as_str(), &link).await {
            tracing::error!(
                recipient = %user.email,
                error = %e,
                "Failed to deliver password reset link"
            );
        }

        Ok(())
    }

    /// Replace a target account's profile on behalf of a caller.
    ///
    /// Authorization is self-or-admin; the record written is always the one
    /// loaded by the authorized target id. Name, phone, and the full address
    /// and cart sets are replaced with the command's contents.
    ///
    /// # Errors
    /// * `NotAllowed` - Caller is neither the target nor an admin
    /// * `NotFound` - Target does not exist
    /// * `PhoneAlreadyExists` - New phone is already registered
    /// * `DatabaseError` - Database operation failed
    pub async fn update_profile(
        &self,
        caller: &User,
        target: UserId,
        command: UpdateProfileCommand,
    ) -> Result<User, UserError> {
        if !policy::may_modify(caller, target) {
            return Err(UserError::NotAllowed);
        }

        let mut user = self
            .repository
            .find_by_id(&target)
            .await?
            .ok_or(UserError::NotFound(target.to_string()))?;

        user.name = command.name;
        user.phone = command.phone;
        user.addresses = command.addresses;
        user.cart_items = command.cart_items;

        self.repository.update(user).await
    }

    /// Change a target account's password on behalf of a caller.
    ///
    /// Outstanding tokens are untouched: without a revocation list they stay
    /// valid until expiry.
    ///
    /// # Errors
    /// * `NotAllowed` - Caller is neither the target nor an admin
    /// * `NotFound` - Target does not exist
    /// * `Password` - Password hashing failed
    /// * `DatabaseError` - Database operation failed
    pub async fn change_password(
        &self,
        caller: &User,
        target: UserId,
        new_password: &str,
    ) -> Result<(), UserError> {
        if !policy::may_modify(caller, target) {
            return Err(UserError::NotAllowed);
        }

        let user = self
            .repository
            .find_by_id(&target)
            .await?
            .ok_or(UserError::NotFound(target.to_string()))?;

        let password_hash = self
            .authenticator
            .hash_password(new_password)
            .map_err(|e| UserError::Password(e.to_string()))?;

        self.repository.update_password(&user.id, &password_hash).await
    }
}
