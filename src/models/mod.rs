//! Data models for the library server

pub mod author;
pub mod book;
pub mod borrow;

// Re-export commonly used types
pub use author::{Author, AuthorRequest};
pub use book::{Book, BookRequest};
pub use borrow::{Borrow, CreateBorrow, ReturnQuery};
