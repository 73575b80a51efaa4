//! Borrow records repository for database operations.
//!
//! All lending mutations run inside a transaction and the availability
//! check-and-decrement is a single conditional UPDATE, so two borrows
//! racing for the last copy cannot both succeed.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::{
    error::{AppError, AppResult},
    models::{BorrowRecord, BorrowedBook},
};

#[derive(Clone)]
pub struct BorrowsRepository {
    pool: SqlitePool,
}

impl BorrowsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get borrow record by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<BorrowRecord> {
        sqlx::query_as::<_, BorrowRecord>("SELECT * FROM borrows WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Borrow record with id {} not found", id)))
    }

    /// Borrow one copy of a book: decrement availability and insert the
    /// record atomically. Fails with NotFound when the book does not
    /// exist and Conflict when no copies are left.
    pub async fn create(&self, user_id: i64, book_id: i64) -> AppResult<BorrowRecord> {
        let mut tx = self.pool.begin().await?;

        let decremented = sqlx::query("UPDATE books SET copies = copies - 1 WHERE id = ? AND copies > 0")
            .bind(book_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if decremented == 0 {
            // Distinguish a missing book from an out-of-copies one.
            let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE id = ?)")
                .bind(book_id)
                .fetch_one(&mut *tx)
                .await?;

            return Err(if exists {
                AppError::Conflict(format!("No copies of book {} are available", book_id))
            } else {
                AppError::NotFound(format!("Book with id {} not found", book_id))
            });
        }

        let record = sqlx::query_as::<_, BorrowRecord>(
            r#"
            INSERT INTO borrows (user_id, book_id, borrowed_date, return_date)
            VALUES (?, ?, ?, NULL)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(book_id)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(record)
    }

    /// Return a borrow by record ID: stamp the return date and restore
    /// one copy. Fails with Conflict when the record was already
    /// returned.
    pub async fn return_record(&self, borrow_id: i64) -> AppResult<BorrowRecord> {
        let mut tx = self.pool.begin().await?;

        let record = sqlx::query_as::<_, BorrowRecord>("SELECT * FROM borrows WHERE id = ?")
            .bind(borrow_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Borrow record with id {} not found", borrow_id))
            })?;

        if record.return_date.is_some() {
            return Err(AppError::Conflict(format!(
                "Borrow record {} is already returned",
                borrow_id
            )));
        }

        let returned = self.finish_return(&mut tx, record.id, record.book_id).await?;

        tx.commit().await?;

        Ok(returned)
    }

    /// Return the oldest outstanding borrow of a book by a user. Fails
    /// with NotFound when the book is absent or nothing is outstanding.
    pub async fn return_outstanding(&self, book_id: i64, user_id: i64) -> AppResult<BorrowRecord> {
        let mut tx = self.pool.begin().await?;

        let book_exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE id = ?)")
            .bind(book_id)
            .fetch_one(&mut *tx)
            .await?;

        if !book_exists {
            return Err(AppError::NotFound(format!("Book with id {} not found", book_id)));
        }

        let record = sqlx::query_as::<_, BorrowRecord>(
            r#"
            SELECT * FROM borrows
            WHERE book_id = ? AND user_id = ? AND return_date IS NULL
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(book_id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("No outstanding borrow record found".to_string()))?;

        let returned = self.finish_return(&mut tx, record.id, record.book_id).await?;

        tx.commit().await?;

        Ok(returned)
    }

    /// Outstanding borrows of a user joined with book details
    pub async fn outstanding_for_user(&self, user_id: i64) -> AppResult<Vec<BorrowedBook>> {
        let borrowed = sqlx::query_as::<_, BorrowedBook>(
            r#"
            SELECT b.id AS borrow_id, bk.id AS book_id, bk.title, bk.author, b.borrowed_date
            FROM borrows b
            JOIN books bk ON b.book_id = bk.id
            WHERE b.user_id = ? AND b.return_date IS NULL
            ORDER BY b.borrowed_date
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(borrowed)
    }

    /// Count outstanding borrows of a book
    pub async fn count_outstanding_for_book(&self, book_id: i64) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM borrows WHERE book_id = ? AND return_date IS NULL",
        )
        .bind(book_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Count all borrow rows referencing a book, returned or not
    pub async fn count_for_book(&self, book_id: i64) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM borrows WHERE book_id = ?")
            .bind(book_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Stamp an outstanding record as returned and restore one copy.
    /// Runs on the caller's transaction; the record update stays
    /// conditional on the record still being outstanding.
    async fn finish_return(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
        record_id: i64,
        book_id: i64,
    ) -> AppResult<BorrowRecord> {
        let returned = sqlx::query_as::<_, BorrowRecord>(
            r#"
            UPDATE borrows SET return_date = ?
            WHERE id = ? AND return_date IS NULL
            RETURNING *
            "#,
        )
        .bind(Utc::now())
        .bind(record_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| {
            AppError::Conflict(format!("Borrow record {} is already returned", record_id))
        })?;

        sqlx::query("UPDATE books SET copies = copies + 1 WHERE id = ?")
            .bind(book_id)
            .execute(&mut **tx)
            .await?;

        Ok(returned)
    }
}
