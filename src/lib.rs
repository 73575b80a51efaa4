//! Lectern Library Catalog Server
//!
//! A Rust implementation of a small library catalog: librarians manage
//! book records, members borrow and return copies, through two JSON API
//! surfaces and server-rendered dashboard pages.

use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sqlx::SqlitePool;

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod pages;
pub mod repository;
pub mod routes;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
    /// Pool handle for the readiness probe
    pub pool: SqlitePool,
    /// Key signing the session cookie
    pub session_key: Key,
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.session_key.clone()
    }
}
