//! Repository layer for database operations

pub mod books;
pub mod borrows;
pub mod users;

use sqlx::SqlitePool;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: SqlitePool,
    pub books: books::BooksRepository,
    pub borrows: borrows::BorrowsRepository,
    pub users: users::UsersRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            books: books::BooksRepository::new(pool.clone()),
            borrows: borrows::BorrowsRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            pool,
        }
    }
}
