//! Server-side form validation.
//!
//! Each check returns `None` when the value is acceptable, or a fixed
//! message suitable for rendering next to the offending field. Lengths are
//! counted in characters, not bytes.

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_JOKE_NAME_LEN: usize = 2;
pub const MIN_JOKE_CONTENT_LEN: usize = 10;

pub fn validate_username(username: &str) -> Option<&'static str> {
    if username.chars().count() < MIN_USERNAME_LEN {
        return Some("Usernames must be at least 3 characters long");
    }
    None
}

pub fn validate_password(password: &str) -> Option<&'static str> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Some("Passwords must be at least 6 characters long");
    }
    None
}

pub fn validate_joke_name(name: &str) -> Option<&'static str> {
    if name.chars().count() < MIN_JOKE_NAME_LEN {
        return Some("That joke's name is too short");
    }
    None
}

pub fn validate_joke_content(content: &str) -> Option<&'static str> {
    if content.chars().count() < MIN_JOKE_CONTENT_LEN {
        return Some("That joke is too short");
    }
    None
}
