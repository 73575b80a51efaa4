//! Lending service: the single entry point for borrow and return.
//!
//! Every surface (both JSON APIs and the dashboard pages) goes through
//! this service, so availability is only ever mutated by the
//! transactional repository operations underneath it.

use crate::{
    error::AppResult,
    models::{BorrowRecord, BorrowedBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct LendingService {
    repository: Repository,
}

impl LendingService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Borrow one copy of a book for a user
    pub async fn borrow(&self, user_id: i64, book_id: i64) -> AppResult<BorrowRecord> {
        // Verify user exists
        self.repository.users.get_by_id(user_id).await?;
        self.repository.borrows.create(user_id, book_id).await
    }

    /// Return a borrow identified by its record ID
    pub async fn return_by_record(&self, borrow_id: i64) -> AppResult<BorrowRecord> {
        self.repository.borrows.return_record(borrow_id).await
    }

    /// Return the oldest outstanding borrow of a book by a user
    pub async fn return_by_book(&self, book_id: i64, user_id: i64) -> AppResult<BorrowRecord> {
        self.repository.borrows.return_outstanding(book_id, user_id).await
    }

    /// Outstanding borrows of a user, joined with book details
    pub async fn borrowed_by_user(&self, user_id: i64) -> AppResult<Vec<BorrowedBook>> {
        self.repository.borrows.outstanding_for_user(user_id).await
    }
}
