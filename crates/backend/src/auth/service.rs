//! Login, registration and session lifecycle operations.

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use shared_types::User;
use uuid::Uuid;

use crate::repository::{Store, StoreResult};
use crate::AppState;

use super::guard::{get_user_session, USER_ID_KEY};
use super::password;
use super::session::{Session, SessionStorage};
use super::types::AuthError;

/// Where the login form sends users who didn't ask for anywhere in particular
pub const DEFAULT_REDIRECT: &str = "/jokes";

pub async fn check_for_user(store: &dyn Store, username: &str) -> StoreResult<Option<User>> {
    store.find_user_by_username(username).await
}

/// Check a username/password pair. `Ok(None)` for an unknown user or a
/// wrong password.
pub async fn login(
    store: &dyn Store,
    username: &str,
    password: &str,
) -> Result<Option<User>, AuthError> {
    let Some(user) = check_for_user(store, username).await? else {
        return Ok(None);
    };

    if !password::verify_password(password, &user.password_hash)? {
        return Ok(None);
    }

    Ok(Some(user))
}

/// Create the user and log them in.
///
/// Fails with `AuthError::Store(StoreError::UsernameTaken)` if the name was
/// claimed, including by a concurrent registration.
pub async fn register(
    state: &AppState,
    username: &str,
    password: &str,
    redirect_to: &str,
) -> Result<Response, AuthError> {
    let password_hash = password::hash_password(password)?;
    let user = state.store.create_user(username, &password_hash).await?;

    tracing::info!("Registered user {} ({})", user.username, user.id);

    Ok(create_user_session(&state.sessions, user.id, redirect_to))
}

/// Destroy the session and send the user to `/login`.
pub fn logout(headers: &HeaderMap, sessions: &SessionStorage) -> Response {
    let session = get_user_session(headers, sessions);
    let cookie = sessions.destroy_session(session);

    see_other_with_cookie("/login", &cookie)
}

/// Start a fresh session for `user_id` and redirect to `redirect_to`.
pub fn create_user_session(
    sessions: &SessionStorage,
    user_id: Uuid,
    redirect_to: &str,
) -> Response {
    let mut session = Session::new();
    session.set(USER_ID_KEY, user_id.to_string());
    let cookie = sessions.commit_session(&session);

    see_other_with_cookie(redirect_to, &cookie)
}

/// Accept only local, header-safe paths as post-login destinations.
/// Anything else, including protocol-relative `//host` URLs, falls back to
/// [`DEFAULT_REDIRECT`].
pub fn safe_redirect_target(redirect_to: Option<&str>) -> String {
    match redirect_to {
        Some(target)
            if target.starts_with('/')
                && !target.starts_with("//")
                && !target.starts_with("/\\")
                && target.chars().all(|c| c.is_ascii_graphic()) =>
        {
            target.to_string()
        }
        _ => DEFAULT_REDIRECT.to_string(),
    }
}

fn see_other_with_cookie(location: &str, cookie: &str) -> Response {
    (
        StatusCode::SEE_OTHER,
        [(header::LOCATION, location), (header::SET_COOKIE, cookie)],
    )
        .into_response()
}
