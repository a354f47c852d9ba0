use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod validation;

pub use validation::{
    validate_joke_content, validate_joke_name, validate_password, validate_username,
};

// ============================================================================
// Users
// ============================================================================

/// User struct matching database column order exactly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "diesel", derive(diesel::Queryable))]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Jokes
// ============================================================================

/// Joke struct matching database column order exactly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "diesel", derive(diesel::Queryable))]
pub struct Joke {
    pub id: Uuid,
    pub jokester_id: Uuid,
    pub name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// The `{id, name}` projection shown in the jokes sidebar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "diesel", derive(diesel::Queryable))]
pub struct JokeListItem {
    pub id: Uuid,
    pub name: String,
}

impl From<Joke> for JokeListItem {
    fn from(joke: Joke) -> Self {
        JokeListItem {
            id: joke.id,
            name: joke.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewJoke {
    pub jokester_id: Uuid,
    pub name: String,
    pub content: String,
}

// ============================================================================
// Login / Register
// ============================================================================

/// Which branch of the combined login/register form was submitted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoginType {
    Login,
    Register,
}

impl LoginType {
    pub fn as_str(&self) -> &str {
        match self {
            LoginType::Login => "login",
            LoginType::Register => "register",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "login" => Some(LoginType::Login),
            "register" => Some(LoginType::Register),
            _ => None,
        }
    }
}

/// Raw login form body. Every field is optional so that a malformed
/// submission can be answered with a form error instead of a rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginForm {
    #[serde(rename = "loginType")]
    pub login_type: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    #[serde(rename = "redirectTo")]
    pub redirect_to: Option<String>,
}

/// Values echoed back to the form after a failed submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginFields {
    pub login_type: String,
    pub username: String,
    pub password: String,
    pub redirect_to: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginFieldErrors {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl LoginFieldErrors {
    pub fn check(username: &str, password: &str) -> Self {
        LoginFieldErrors {
            username: validate_username(username).map(str::to_string),
            password: validate_password(password).map(str::to_string),
        }
    }

    pub fn has_errors(&self) -> bool {
        self.username.is_some() || self.password.is_some()
    }
}

/// Everything the login page needs to re-render after a 400
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginActionData {
    pub form_error: Option<String>,
    pub field_errors: Option<LoginFieldErrors>,
    pub fields: Option<LoginFields>,
}

impl LoginActionData {
    pub fn form_error(message: impl Into<String>) -> Self {
        LoginActionData {
            form_error: Some(message.into()),
            ..Default::default()
        }
    }
}

// ============================================================================
// New joke form
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewJokeForm {
    pub name: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JokeFields {
    pub name: String,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JokeFieldErrors {
    pub name: Option<String>,
    pub content: Option<String>,
}

impl JokeFieldErrors {
    pub fn check(name: &str, content: &str) -> Self {
        JokeFieldErrors {
            name: validate_joke_name(name).map(str::to_string),
            content: validate_joke_content(content).map(str::to_string),
        }
    }

    pub fn has_errors(&self) -> bool {
        self.name.is_some() || self.content.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JokeActionData {
    pub form_error: Option<String>,
    pub field_errors: Option<JokeFieldErrors>,
    pub fields: Option<JokeFields>,
}

/// Body of the POST sent from a joke detail page. Browsers can only submit
/// GET and POST, so the intended verb travels in `_method`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JokeActionForm {
    #[serde(rename = "_method")]
    pub method: Option<String>,
}
