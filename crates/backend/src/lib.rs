//! Joke sharing site: server-rendered pages over a signed cookie session.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod ownership;
pub mod pages;
pub mod repository;
pub mod schema;
pub mod seed;

use crate::auth::SessionStorage;
use crate::repository::Store;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub sessions: SessionStorage,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/health", get(handlers::health_check))
        // Auth routes
        .route("/login", get(auth::login_page).post(auth::login_action))
        .route("/logout", get(auth::logout_page).post(auth::logout_action))
        // Joke routes
        .route("/jokes", get(handlers::jokes_index))
        .route(
            "/jokes/new",
            get(handlers::new_joke_page).post(handlers::create_joke),
        )
        .route(
            "/jokes/:joke_id",
            get(handlers::joke_detail).post(handlers::joke_action),
        )
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
