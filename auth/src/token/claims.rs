use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// JWT claims carried by an access token.
///
/// The subject is the account's email address, the one stable login
/// identifier. Expiry is an absolute Unix timestamp; there is no refresh or
/// revocation mechanism, so a token stays valid until `exp` regardless of
/// later password changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (account email)
    pub sub: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// Create claims for a subject expiring `ttl_hours` from now.
    pub fn for_subject(subject: impl Into<String>, ttl_hours: i64) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::hours(ttl_hours);

        Self {
            sub: subject.into(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
        }
    }
}
