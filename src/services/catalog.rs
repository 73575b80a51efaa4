//! Catalog management service

use crate::{
    error::{AppError, AppResult},
    models::{Book, CreateBook, UpdateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List every book in the catalog
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list_all().await
    }

    /// List books that can currently be borrowed
    pub async fn available_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list_available().await
    }

    /// Get book by ID
    pub async fn get_book(&self, id: i64) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Create a new book
    pub async fn create_book(&self, book: CreateBook) -> AppResult<Book> {
        if book.copies < 0 {
            return Err(AppError::Validation("copies must not be negative".to_string()));
        }
        self.repository.books.create(&book).await
    }

    /// Update a book
    pub async fn update_book(&self, id: i64, book: UpdateBook) -> AppResult<Book> {
        if book.copies.is_some_and(|c| c < 0) {
            return Err(AppError::Validation("copies must not be negative".to_string()));
        }
        self.repository.books.update(id, &book).await
    }

    /// Delete a book. Refuses while borrows are outstanding unless
    /// forced; a forced delete cascades the borrow history away.
    pub async fn delete_book(&self, id: i64, force: bool) -> AppResult<()> {
        let outstanding = self.repository.borrows.count_outstanding_for_book(id).await?;

        if outstanding > 0 && !force {
            return Err(AppError::Conflict(
                "Book has outstanding borrows. Use force=true to delete anyway.".to_string(),
            ));
        }

        self.repository.books.delete(id).await
    }
}
