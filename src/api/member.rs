//! Role-partitioned surface, member endpoints: browse, borrow, return.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{error::AppResult, models::BorrowRecord};

use super::admin::BookResponse;

/// Borrow request
#[derive(Deserialize, ToSchema)]
pub struct BorrowRequest {
    /// Borrowing user ID
    pub user_id: i64,
    /// Book ID
    pub book_id: i64,
}

/// Return request parameters
#[derive(Deserialize)]
pub struct ReturnParams {
    pub borrow_id: i64,
}

/// List books available for borrowing
#[utoipa::path(
    get,
    path = "/api/user/books",
    tag = "member",
    responses(
        (status = 200, description = "Books with at least one free copy", body = Vec<BookResponse>)
    )
)]
pub async fn list_available_books(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<BookResponse>>> {
    let books = state.services.catalog.available_books().await?;
    Ok(Json(books.into_iter().map(BookResponse::from).collect()))
}

/// Borrow a book
#[utoipa::path(
    post,
    path = "/api/user/borrow",
    tag = "member",
    request_body = BorrowRequest,
    responses(
        (status = 201, description = "Borrow record created", body = BorrowRecord),
        (status = 404, description = "User or book not found"),
        (status = 409, description = "No copies available")
    )
)]
pub async fn borrow_book(
    State(state): State<crate::AppState>,
    Json(request): Json<BorrowRequest>,
) -> AppResult<(StatusCode, Json<BorrowRecord>)> {
    let record = state
        .services
        .lending
        .borrow(request.user_id, request.book_id)
        .await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// Return a borrowed book by borrow record ID
#[utoipa::path(
    post,
    path = "/api/user/return",
    tag = "member",
    params(
        ("borrow_id" = i64, Query, description = "Borrow record ID")
    ),
    responses(
        (status = 200, description = "Borrow record closed", body = BorrowRecord),
        (status = 404, description = "Borrow record not found"),
        (status = 409, description = "Record already returned")
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    Query(params): Query<ReturnParams>,
) -> AppResult<Json<BorrowRecord>> {
    let record = state.services.lending.return_by_record(params.borrow_id).await?;
    Ok(Json(record))
}
