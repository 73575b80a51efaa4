//! Book (catalog entry) model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Book model from database. `copies` counts the copies currently
/// available for borrowing; it is the only stored availability state.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub published_date: NaiveDate,
    pub copies: i64,
}

impl Book {
    /// Wire-level borrowed flag: a book with no free copies is borrowed.
    pub fn is_borrowed(&self) -> bool {
        self.copies == 0
    }
}

/// Create book request (service input)
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBook {
    pub title: String,
    pub author: String,
    pub published_date: NaiveDate,
    pub copies: i64,
}

/// Update book request (service input). `copies: None` leaves the
/// availability counter untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBook {
    pub title: String,
    pub author: String,
    pub published_date: NaiveDate,
    pub copies: Option<i64>,
}
