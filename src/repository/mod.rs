//! Repository layer for database operations

pub mod authors;
pub mod books;
pub mod borrows;

use async_trait::async_trait;
use sqlx::{migrate::Migrator, Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Author, AuthorRequest, Book, BookRequest, Borrow, CreateBorrow},
};

/// Embedded schema migrations
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Storage operations the services depend on
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LibraryStore: Send + Sync {
    /// Check that the database answers
    async fn ping(&self) -> AppResult<()>;
    /// Drop every table and create them again, empty
    async fn reset_schema(&self) -> AppResult<()>;

    async fn list_authors(&self) -> AppResult<Vec<Author>>;
    async fn get_author(&self, id: i32) -> AppResult<Author>;
    async fn create_author(&self, data: &AuthorRequest) -> AppResult<Author>;
    async fn update_author(&self, id: i32, data: &AuthorRequest) -> AppResult<Author>;
    async fn delete_author(&self, id: i32) -> AppResult<()>;

    async fn list_books(&self) -> AppResult<Vec<Book>>;
    async fn get_book(&self, id: i32) -> AppResult<Book>;
    async fn create_book(&self, data: &BookRequest) -> AppResult<Book>;
    async fn update_book(&self, id: i32, data: &BookRequest) -> AppResult<Book>;
    async fn delete_book(&self, id: i32) -> AppResult<()>;

    async fn list_borrows(&self) -> AppResult<Vec<Borrow>>;
    async fn get_borrow(&self, id: i32) -> AppResult<Borrow>;
    /// Take one copy of the book and record the borrow, atomically
    async fn borrow_book(&self, data: &CreateBorrow) -> AppResult<Borrow>;
    /// Close the borrow and give its copy back, atomically
    async fn return_borrow(&self, id: i32, return_date: &str) -> AppResult<Borrow>;
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub authors: authors::AuthorsRepository,
    pub books: books::BooksRepository,
    pub borrows: borrows::BorrowsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            authors: authors::AuthorsRepository::new(pool.clone()),
            books: books::BooksRepository::new(pool.clone()),
            borrows: borrows::BorrowsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Apply pending migrations
    pub async fn migrate(&self) -> AppResult<()> {
        MIGRATOR.run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl LibraryStore for Repository {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn reset_schema(&self) -> AppResult<()> {
        MIGRATOR.undo(&self.pool, 0).await?;
        MIGRATOR.run(&self.pool).await?;
        Ok(())
    }

    async fn list_authors(&self) -> AppResult<Vec<Author>> {
        self.authors.list().await
    }

    async fn get_author(&self, id: i32) -> AppResult<Author> {
        self.authors.get_by_id(id).await
    }

    async fn create_author(&self, data: &AuthorRequest) -> AppResult<Author> {
        self.authors.create(data).await
    }

    async fn update_author(&self, id: i32, data: &AuthorRequest) -> AppResult<Author> {
        self.authors.update(id, data).await
    }

    async fn delete_author(&self, id: i32) -> AppResult<()> {
        self.authors.delete(id).await
    }

    async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.books.list().await
    }

    async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.books.get_by_id(id).await
    }

    async fn create_book(&self, data: &BookRequest) -> AppResult<Book> {
        self.books.create(data).await
    }

    async fn update_book(&self, id: i32, data: &BookRequest) -> AppResult<Book> {
        self.books.update(id, data).await
    }

    async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.books.delete(id).await
    }

    async fn list_borrows(&self) -> AppResult<Vec<Borrow>> {
        self.borrows.list().await
    }

    async fn get_borrow(&self, id: i32) -> AppResult<Borrow> {
        self.borrows.get_by_id(id).await
    }

    async fn borrow_book(&self, data: &CreateBorrow) -> AppResult<Borrow> {
        self.borrows.create(data).await
    }

    async fn return_borrow(&self, id: i32, return_date: &str) -> AppResult<Borrow> {
        self.borrows.return_borrow(id, return_date).await
    }
}
