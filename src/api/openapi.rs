//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{admin, flat, health, member};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lectern API",
        version = "0.1.0",
        description = "Library catalog REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Admin surface
        admin::list_books,
        admin::add_book,
        admin::update_book,
        admin::delete_book,
        // Member surface
        member::list_available_books,
        member::borrow_book,
        member::return_book,
        // Flat surface
        flat::list_books,
        flat::add_book,
        flat::update_book,
        flat::delete_book,
        flat::borrow_book,
        flat::return_book,
    ),
    components(
        schemas(
            // Admin/member surface
            admin::BookResponse,
            admin::BookPayload,
            member::BorrowRequest,
            // Flat surface
            flat::BookFields,
            flat::CreatedResponse,
            flat::BorrowerId,
            // Models
            crate::models::Book,
            crate::models::BorrowRecord,
            // Shared
            crate::api::SuccessResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "admin", description = "Book administration (borrowed-flag surface)"),
        (name = "member", description = "Member browse/borrow/return (borrowed-flag surface)"),
        (name = "flat", description = "Book administration and lending (copy-count surface)")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
