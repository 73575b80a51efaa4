//! Data models for Lectern

pub mod book;
pub mod borrow;
pub mod user;

// Re-export commonly used types
pub use book::{Book, CreateBook, UpdateBook};
pub use borrow::{BorrowRecord, BorrowedBook};
pub use user::{RegisterUser, User};
