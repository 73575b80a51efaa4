//! Shared test fixtures
#![allow(dead_code)]

use std::sync::Arc;

use axum_extra::extract::cookie::Key;
use axum_test::{TestServer, TestServerConfig};
use chrono::NaiveDate;

use lectern_server::{
    config::AppConfig,
    db,
    models::{Book, CreateBook, User},
    repository::Repository,
    routes::create_router,
    services::Services,
    AppState,
};

/// Fresh in-memory application state, plus the repository for tests
/// that need to look underneath the services.
pub async fn test_env() -> (AppState, Repository) {
    let pool = db::connect_in_memory()
        .await
        .expect("Failed to create test database");
    let repository = Repository::new(pool.clone());
    let services = Services::new(repository.clone());

    let state = AppState {
        config: Arc::new(AppConfig::default()),
        services: Arc::new(services),
        pool,
        session_key: Key::generate(),
    };

    (state, repository)
}

pub async fn test_state() -> AppState {
    test_env().await.0
}

/// Test server with cookie persistence, so page flows keep their
/// session across requests.
pub async fn test_server() -> (TestServer, AppState) {
    let state = test_state().await;
    let config = TestServerConfig {
        save_cookies: true,
        ..TestServerConfig::default()
    };
    let server = TestServer::new_with_config(create_router(state.clone()), config)
        .expect("Failed to create test server");

    (server, state)
}

pub fn published(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 1, 1).unwrap()
}

pub async fn seed_book(state: &AppState, title: &str, copies: i64) -> Book {
    state
        .services
        .catalog
        .create_book(CreateBook {
            title: title.to_string(),
            author: "Test Author".to_string(),
            published_date: published(2020),
            copies,
        })
        .await
        .expect("Failed to seed book")
}

pub async fn seed_member(state: &AppState, username: &str) -> User {
    state
        .services
        .accounts
        .provision(username, &format!("{}@example.com", username), "password", false)
        .await
        .expect("Failed to seed member")
}

pub async fn seed_staff(state: &AppState, username: &str) -> User {
    state
        .services
        .accounts
        .provision(username, &format!("{}@example.com", username), "password", true)
        .await
        .expect("Failed to seed staff user")
}
