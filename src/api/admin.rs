//! Role-partitioned surface, admin endpoints: book CRUD.
//!
//! This surface presents availability as a borrowed flag. Payloads
//! never carry a copy count; creation stocks a single copy and updates
//! leave the stored counter alone.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{Book, CreateBook, UpdateBook},
};

use super::{DeleteBookParams, SuccessResponse};

/// Book as seen by this surface
#[derive(Serialize, ToSchema)]
pub struct BookResponse {
    /// Book ID
    pub id: i64,
    /// Title
    pub title: String,
    /// Author
    pub author: String,
    /// Publication date
    pub published_date: NaiveDate,
    /// Whether every copy is currently out
    pub is_borrowed: bool,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            is_borrowed: book.is_borrowed(),
            title: book.title,
            author: book.author,
            published_date: book.published_date,
        }
    }
}

/// Create/update book request
#[derive(Deserialize, ToSchema)]
pub struct BookPayload {
    /// Title
    pub title: String,
    /// Author
    pub author: String,
    /// Publication date
    pub published_date: NaiveDate,
}

/// List all books
#[utoipa::path(
    get,
    path = "/api/admin/books",
    tag = "admin",
    responses(
        (status = 200, description = "All catalog books", body = Vec<BookResponse>)
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<BookResponse>>> {
    let books = state.services.catalog.list_books().await?;
    Ok(Json(books.into_iter().map(BookResponse::from).collect()))
}

/// Add a book to the catalog
#[utoipa::path(
    post,
    path = "/api/admin/books",
    tag = "admin",
    request_body = BookPayload,
    responses(
        (status = 201, description = "Book created", body = BookResponse)
    )
)]
pub async fn add_book(
    State(state): State<crate::AppState>,
    Json(payload): Json<BookPayload>,
) -> AppResult<(StatusCode, Json<BookResponse>)> {
    let book = state
        .services
        .catalog
        .create_book(CreateBook {
            title: payload.title,
            author: payload.author,
            published_date: payload.published_date,
            copies: 1,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(book.into())))
}

/// Update a book
#[utoipa::path(
    put,
    path = "/api/admin/books/{id}",
    tag = "admin",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    request_body = BookPayload,
    responses(
        (status = 200, description = "Book updated", body = BookResponse),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<BookPayload>,
) -> AppResult<Json<BookResponse>> {
    let book = state
        .services
        .catalog
        .update_book(
            id,
            UpdateBook {
                title: payload.title,
                author: payload.author,
                published_date: payload.published_date,
                copies: None,
            },
        )
        .await?;

    Ok(Json(book.into()))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/api/admin/books/{id}",
    tag = "admin",
    params(
        ("id" = i64, Path, description = "Book ID"),
        ("force" = Option<bool>, Query, description = "Delete even with outstanding borrows")
    ),
    responses(
        (status = 200, description = "Book deleted", body = SuccessResponse),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Book has outstanding borrows")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Query(params): Query<DeleteBookParams>,
) -> AppResult<Json<SuccessResponse>> {
    state
        .services
        .catalog
        .delete_book(id, params.force.unwrap_or(false))
        .await?;

    Ok(Json(SuccessResponse::ok()))
}
