//! Borrow record model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Borrow record from database. `return_date` is NULL while the
/// borrow is outstanding and set exactly once on return.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BorrowRecord {
    pub id: i64,
    pub user_id: i64,
    pub book_id: i64,
    pub borrowed_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
}

impl BorrowRecord {
    pub fn is_outstanding(&self) -> bool {
        self.return_date.is_none()
    }
}

/// Outstanding borrow joined with book details, for display
#[derive(Debug, Clone, FromRow)]
pub struct BorrowedBook {
    pub borrow_id: i64,
    pub book_id: i64,
    pub title: String,
    pub author: String,
    pub borrowed_date: DateTime<Utc>,
}
