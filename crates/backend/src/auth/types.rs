//! Auth-related types and configuration.

use cookie::SameSite;
use thiserror::Error;
use uuid::Uuid;

use crate::repository::StoreError;

/// Name of the session cookie
pub const SESSION_COOKIE_NAME: &str = "RJ_sesh";

/// 30 days
pub const SESSION_MAX_AGE_SECS: i64 = 60 * 60 * 24 * 30;

/// Minimum length of the secret the signing key is derived from
pub const MIN_SECRET_LEN: usize = 32;

/// Attributes of the session cookie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub secure: bool,
    pub same_site: SameSite,
    pub path: String,
    pub max_age_secs: i64,
    pub http_only: bool,
}

impl SessionConfig {
    /// The standard cookie; `secure` is only set in production so that
    /// plain-http development servers still receive it.
    pub fn new(production: bool) -> Self {
        Self {
            cookie_name: SESSION_COOKIE_NAME.to_string(),
            secure: production,
            same_site: SameSite::Lax,
            path: "/".to_string(),
            max_age_secs: SESSION_MAX_AGE_SECS,
            http_only: true,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(false)
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session secret must be at least {min} bytes, got {0}", min = MIN_SECRET_LEN)]
    SecretTooShort(usize),
}

/// Outcome of [`crate::auth::require_user_id`].
///
/// `Unauthenticated` carries the path the user should come back to after
/// logging in; callers turn it into a redirect with
/// [`crate::auth::login_redirect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequireUser {
    Authorized(Uuid),
    Unauthenticated { redirect_to: String },
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Password hashing failed: {0}")]
    Password(#[from] bcrypt::BcryptError),
}
