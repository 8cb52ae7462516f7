//! Authentication utilities library
//!
//! Provides the authentication infrastructure for the account service:
//! - Password hashing (Argon2id)
//! - Bearer-token issuance and verification (signed, expiring JWTs)
//! - Authentication coordination
//!
//! The service defines its own domain traits and adapts these implementations,
//! which keeps the cryptographic plumbing reusable without coupling it to any
//! particular storage or transport.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Bearer Tokens
//! ```
//! use auth::TokenService;
//!
//! let tokens = TokenService::new(b"secret_key_at_least_32_bytes_long!", 24);
//! let token = tokens.issue("alice@example.com").unwrap();
//! let subject = tokens.verify(&token).unwrap();
//! assert_eq!(subject, "alice@example.com");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", 24);
//!
//! // Signup: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let result = auth.authenticate("password123", &hash, "alice@example.com").unwrap();
//!
//! // Later requests: resolve the subject from the token
//! let subject = auth.verify_token(&result.access_token).unwrap();
//! assert_eq!(subject, "alice@example.com");
//! ```

pub mod authenticator;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::TokenError;
pub use token::TokenService;
