//! Flat surface: book CRUD plus borrow/return keyed by book ID.
//!
//! This surface exposes the copies counter directly. The list and
//! create handlers are mounted under both the admin and the user
//! prefix; borrow and return take the acting user from the session
//! when one exists and from the request body otherwise.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::{Book, CreateBook, UpdateBook, User},
};

use super::{session::OptionalSessionUser, DeleteBookParams, SuccessResponse};

/// Create/update book request with an explicit copy count
#[derive(Deserialize, ToSchema)]
pub struct BookFields {
    /// Title
    pub title: String,
    /// Author
    pub author: String,
    /// Publication date
    pub published_date: NaiveDate,
    /// Available copies
    pub copies: u32,
}

/// Response carrying the affected book ID
#[derive(Serialize, ToSchema)]
pub struct CreatedResponse {
    /// Book ID
    pub id: i64,
}

/// Acting user supplied in the body when no session is present
#[derive(Deserialize, ToSchema)]
pub struct BorrowerId {
    /// Borrowing user ID
    pub user_id: i64,
}

fn resolve_borrower(session: Option<User>, body: Option<BorrowerId>) -> AppResult<i64> {
    if let Some(user) = session {
        return Ok(user.id);
    }
    if let Some(borrower) = body {
        return Ok(borrower.user_id);
    }
    Err(AppError::Validation(
        "user_id is required without a session".to_string(),
    ))
}

/// List all books with their copy counts
#[utoipa::path(
    get,
    path = "/api/admin/books/",
    tag = "flat",
    responses(
        (status = 200, description = "All catalog books", body = Vec<Book>)
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.catalog.list_books().await?;
    Ok(Json(books))
}

/// Add a book with an explicit number of copies
#[utoipa::path(
    post,
    path = "/api/admin/books/",
    tag = "flat",
    request_body = BookFields,
    responses(
        (status = 201, description = "Book created", body = CreatedResponse)
    )
)]
pub async fn add_book(
    State(state): State<crate::AppState>,
    Json(fields): Json<BookFields>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    let book = state
        .services
        .catalog
        .create_book(CreateBook {
            title: fields.title,
            author: fields.author,
            published_date: fields.published_date,
            copies: i64::from(fields.copies),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(CreatedResponse { id: book.id })))
}

/// Update every field of a book, copy count included
#[utoipa::path(
    put,
    path = "/api/admin/books/{id}/",
    tag = "flat",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    request_body = BookFields,
    responses(
        (status = 200, description = "Book updated", body = CreatedResponse),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Json(fields): Json<BookFields>,
) -> AppResult<Json<CreatedResponse>> {
    let book = state
        .services
        .catalog
        .update_book(
            id,
            UpdateBook {
                title: fields.title,
                author: fields.author,
                published_date: fields.published_date,
                copies: Some(i64::from(fields.copies)),
            },
        )
        .await?;

    Ok(Json(CreatedResponse { id: book.id }))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/api/admin/books/{id}/",
    tag = "flat",
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

/// Borrow one copy of a book
#[utoipa::path(
    post,
    path = "/api/user/books/borrow/{id}/",
    tag = "flat",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    request_body(content = BorrowerId, description = "Acting user when no session cookie is sent"),
    responses(
        (status = 200, description = "Copy borrowed", body = SuccessResponse),
        (status = 400, description = "No acting user"),
        (status = 404, description = "Book or user not found"),
        (status = 409, description = "No copies available")
    )
)]
pub async fn borrow_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    OptionalSessionUser(session): OptionalSessionUser,
    body: Option<Json<BorrowerId>>,
) -> AppResult<Json<SuccessResponse>> {
    let user_id = resolve_borrower(session, body.map(|Json(b)| b))?;
    state.services.lending.borrow(user_id, id).await?;

    Ok(Json(SuccessResponse::ok()))
}

/// Return one copy of a book
#[utoipa::path(
    post,
    path = "/api/user/books/return/{id}/",
    tag = "flat",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    request_body(content = BorrowerId, description = "Acting user when no session cookie is sent"),
    responses(
        (status = 200, description = "Copy returned", body = SuccessResponse),
        (status = 400, description = "No acting user"),
        (status = 404, description = "Book not found or nothing outstanding"),
        (status = 409, description = "Record already returned")
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    OptionalSessionUser(session): OptionalSessionUser,
    body: Option<Json<BorrowerId>>,
) -> AppResult<Json<SuccessResponse>> {
    let user_id = resolve_borrower(session, body.map(|Json(b)| b))?;
    state.services.lending.return_by_book(id, user_id).await?;

    Ok(Json(SuccessResponse::ok()))
}
