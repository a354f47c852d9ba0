//! Signed cookie session storage.
//!
//! The whole session lives in the cookie: a JSON object, base64url-encoded
//! and signed with an HMAC key derived from the server secret. Nothing is
//! stored server side. Values are tamper-evident but readable by the client.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use cookie::{time::Duration, Cookie, CookieJar, Key};
use serde_json::{Map, Value};

use super::types::{SessionConfig, SessionError, MIN_SECRET_LEN};

/// Key/value data carried by the session cookie.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    data: Map<String, Value>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.data.insert(key.into(), value.into());
    }

    pub fn unset(&mut self, key: &str) {
        self.data.remove(key);
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn encode(&self) -> String {
        let json = Value::Object(self.data.clone()).to_string();
        URL_SAFE_NO_PAD.encode(json)
    }

    fn decode(value: &str) -> Option<Self> {
        let bytes = URL_SAFE_NO_PAD.decode(value).ok()?;
        match serde_json::from_slice::<Value>(&bytes).ok()? {
            Value::Object(data) => Some(Self { data }),
            _ => None,
        }
    }
}

/// Reads, commits and destroys sessions.
#[derive(Clone)]
pub struct SessionStorage {
    key: Key,
    config: SessionConfig,
}

impl SessionStorage {
    pub fn new(secret: &[u8], config: SessionConfig) -> Result<Self, SessionError> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(SessionError::SecretTooShort(secret.len()));
        }

        Ok(Self {
            key: Key::derive_from(secret),
            config,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Load the session from a `Cookie` request header.
    ///
    /// A missing cookie, a bad signature, or a payload that doesn't decode to
    /// a JSON object all produce an empty session.
    pub fn get_session(&self, cookie_header: Option<&str>) -> Session {
        let Some(cookie_header) = cookie_header else {
            return Session::new();
        };

        let mut jar = CookieJar::new();
        for cookie_str in cookie_header.split(';') {
            if let Ok(cookie) = Cookie::parse(cookie_str.trim().to_string()) {
                if cookie.name() == self.config.cookie_name {
                    jar.add_original(cookie);
                }
            }
        }

        jar.signed(&self.key)
            .get(&self.config.cookie_name)
            .and_then(|cookie| Session::decode(cookie.value()))
            .unwrap_or_default()
    }

    /// Sign the session and return the `Set-Cookie` header value.
    pub fn commit_session(&self, session: &Session) -> String {
        let mut jar = CookieJar::new();
        jar.signed_mut(&self.key)
            .add(self.build_cookie(session.encode()));

        jar.get(&self.config.cookie_name)
            .map(|cookie| cookie.to_string())
            .unwrap_or_default()
    }

    /// Return a `Set-Cookie` header value that expires the session cookie.
    pub fn destroy_session(&self, session: Session) -> String {
        drop(session);
        let mut cookie = self.build_cookie(String::new());
        cookie.make_removal();
        cookie.to_string()
    }

    fn build_cookie(&self, value: String) -> Cookie<'static> {
        Cookie::build((self.config.cookie_name.clone(), value))
            .path(self.config.path.clone())
            .http_only(self.config.http_only)
            .same_site(self.config.same_site)
            .secure(self.config.secure)
            .max_age(Duration::seconds(self.config.max_age_secs))
            .build()
    }
}
