//! Helpers for driving the router in-process.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use tower::ServiceExt;

use jokes_backend::{
    auth::{SessionConfig, SessionStorage},
    build_router,
    memory::MemoryStore,
    repository::Store,
    AppState,
};

pub const TEST_SECRET: &[u8] = b"integration-test-secret-0123456789abcdef";

pub struct TestApp {
    pub router: Router,
    pub store: MemoryStore,
}

impl TestApp {
    pub fn new() -> Self {
        let store = MemoryStore::new();
        Self::with_store(store.clone(), Arc::new(store))
    }

    /// Serve through `backend` while keeping `store` for direct inspection
    pub fn with_store(store: MemoryStore, backend: Arc<dyn Store>) -> Self {
        let sessions = SessionStorage::new(TEST_SECRET, SessionConfig::default())
            .expect("test secret is long enough");
        let router = build_router(AppState {
            store: backend,
            sessions,
        });
        Self { router, store }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(
        &self,
        uri: &str,
        fields: &[(&str, &str)],
        cookie: Option<&str>,
    ) -> Response<Body> {
        let body = fields
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body)).unwrap()).await
    }

    /// POST with no body and no content type
    pub async fn post_empty(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method("POST").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    /// Register through the login form and return the session cookie.
    pub async fn register(&self, username: &str, password: &str) -> String {
        let response = self
            .post_form(
                "/login",
                &[
                    ("loginType", "register"),
                    ("username", username),
                    ("password", password),
                    ("redirectTo", "/jokes"),
                ],
                None,
            )
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        session_cookie(&response).expect("registration should set a session cookie")
    }

    /// Create a joke through the form and return its id as shown in the redirect.
    pub async fn create_joke(&self, cookie: &str, name: &str, content: &str) -> String {
        let response = self
            .post_form(
                "/jokes/new",
                &[("name", name), ("content", content)],
                Some(cookie),
            )
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        location(&response)
            .strip_prefix("/jokes/")
            .expect("should redirect to the new joke")
            .to_string()
    }
}

/// The `name=value` part of the response's Set-Cookie, ready to send back
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    let set_cookie = response.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    set_cookie.split(';').next().map(str::to_string)
}

pub fn set_cookie_header(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("response should redirect")
        .to_str()
        .unwrap()
        .to_string()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    String::from_utf8(bytes.to_vec()).expect("body should be utf-8")
}
