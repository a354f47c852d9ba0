//! Cookie-session authentication.
//!
//! This module provides:
//! - A signed cookie session store (`RJ_sesh`) holding at most a `userId`
//! - bcrypt password hashing
//! - The login/register/logout operations and their page handlers
//! - `require_user_id`, the guard in front of every mutating joke route

mod guard;
mod handlers;
pub mod password;
mod service;
pub mod session;
pub mod types;

pub use guard::{
    get_user, get_user_id, get_user_session, login_redirect, require_user_id, USER_ID_KEY,
};
pub use handlers::{login_action, login_page, logout_action, logout_page};
pub use service::{
    check_for_user, create_user_session, login, logout, register, safe_redirect_target,
};
pub use session::{Session, SessionStorage};
pub use types::{AuthError, RequireUser, SessionConfig, SessionError};
