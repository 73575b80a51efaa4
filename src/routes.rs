//! Router assembly: pages, both API surfaces, docs, middleware.

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{api, pages, AppState};

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        // Pages
        .route("/", get(pages::home))
        .route("/login/", get(pages::login_form).post(pages::login))
        .route("/register/", get(pages::register_form).post(pages::register))
        .route("/logout/", get(pages::logout))
        .route("/admin-dashboard/", get(pages::admin_dashboard))
        .route("/user-dashboard/", get(pages::user_dashboard))
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Role-partitioned surface (no trailing slashes)
        .route(
            "/api/admin/books",
            get(api::admin::list_books).post(api::admin::add_book),
        )
        .route(
            "/api/admin/books/:id",
            put(api::admin::update_book).delete(api::admin::delete_book),
        )
        .route("/api/user/books", get(api::member::list_available_books))
        .route("/api/user/borrow", post(api::member::borrow_book))
        .route("/api/user/return", post(api::member::return_book))
        // Flat surface (trailing slashes); list/create serve both prefixes
        .route(
            "/api/admin/books/",
            get(api::flat::list_books).post(api::flat::add_book),
        )
        .route(
            "/api/admin/books/:id/",
            put(api::flat::update_book).delete(api::flat::delete_book),
        )
        .route(
            "/api/user/books/",
            get(api::flat::list_books).post(api::flat::add_book),
        )
        .route("/api/user/books/borrow/:id/", post(api::flat::borrow_book))
        .route("/api/user/books/return/:id/", post(api::flat::return_book))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    app.merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
