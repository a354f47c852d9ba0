//! Session lookups and the redirect-to-login guard.

use axum::{
    http::{header, HeaderMap},
    response::{IntoResponse, Redirect, Response},
};
use shared_types::User;
use uuid::Uuid;

use crate::repository::StoreResult;
use crate::AppState;

use super::session::{Session, SessionStorage};
use super::types::RequireUser;

/// Session key holding the logged-in user's id
pub const USER_ID_KEY: &str = "userId";

/// Load the session carried by the request's cookies.
pub fn get_user_session(headers: &HeaderMap, sessions: &SessionStorage) -> Session {
    let cookies: Vec<&str> = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect();

    if cookies.is_empty() {
        return sessions.get_session(None);
    }
    sessions.get_session(Some(&cookies.join("; ")))
}

/// The user id stored in the session, if it is present and a non-empty string.
///
/// Does not touch the store, so the id may refer to a user that no longer
/// exists.
pub fn get_user_id(headers: &HeaderMap, sessions: &SessionStorage) -> Option<String> {
    get_user_session(headers, sessions)
        .get(USER_ID_KEY)
        .and_then(|value| value.as_str())
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

/// Resolve the session user. An id that isn't a uuid or has no matching row
/// counts as logged out.
pub async fn get_user(headers: &HeaderMap, state: &AppState) -> StoreResult<Option<User>> {
    let Some(user_id) = get_user_id(headers, &state.sessions) else {
        return Ok(None);
    };
    let Ok(user_id) = Uuid::parse_str(&user_id) else {
        return Ok(None);
    };

    state.store.find_user_by_id(user_id).await
}

/// Require a logged-in user whose row still exists.
///
/// `redirect_to` is where the login page should send the user afterwards;
/// handlers pass the path of the current request.
pub async fn require_user_id(
    headers: &HeaderMap,
    state: &AppState,
    redirect_to: &str,
) -> StoreResult<RequireUser> {
    match get_user(headers, state).await? {
        Some(user) => Ok(RequireUser::Authorized(user.id)),
        None => Ok(RequireUser::Unauthenticated {
            redirect_to: redirect_to.to_string(),
        }),
    }
}

/// Redirect to `/login?redirectTo=<redirect_to>`.
pub fn login_redirect(redirect_to: &str) -> Response {
    Redirect::to(&format!(
        "/login?redirectTo={}",
        urlencoding::encode(redirect_to)
    ))
    .into_response()
}
