//! Borrows repository: the circulation ledger
//!
//! Borrowing and returning touch a book and a borrow record together. Both
//! run in a single transaction with the rows locked `FOR UPDATE`, so
//! concurrent requests on the same book are serialized by the database and
//! a failure before commit leaves nothing half-applied.

use sqlx::{PgConnection, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::Book,
        borrow::{Borrow, CreateBorrow},
    },
};

#[derive(Clone)]
pub struct BorrowsRepository {
    pool: Pool<Postgres>,
}

impl BorrowsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all borrow records
    pub async fn list(&self) -> AppResult<Vec<Borrow>> {
        let rows = sqlx::query_as::<_, Borrow>("SELECT * FROM borrow ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get borrow record by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Borrow> {
        sqlx::query_as::<_, Borrow>("SELECT * FROM borrow WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Borrow {} not found", id)))
    }

    /// Lend one copy of a book and record the borrow
    pub async fn create(&self, data: &CreateBorrow) -> AppResult<Borrow> {
        let mut tx = self.pool.begin().await?;

        let book = lock_book(&mut *tx, data.book_id).await?;
        let copies = book.checkout()?;

        sqlx::query("UPDATE books SET copies = $1 WHERE id = $2")
            .bind(copies)
            .bind(book.id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::from_store)?;

        let borrow = sqlx::query_as::<_, Borrow>(
            r#"
            INSERT INTO borrow (book_id, name_reader, get_date, return_date)
            VALUES ($1, $2, $3, NULL)
            RETURNING *
            "#,
        )
        .bind(book.id)
        .bind(&data.name_reader)
        .bind(&data.get_date)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::from_store)?;

        tx.commit().await?;
        Ok(borrow)
    }

    /// Close a borrow and put its copy back on the shelf
    pub async fn return_borrow(&self, id: i32, return_date: &str) -> AppResult<Borrow> {
        let mut tx = self.pool.begin().await?;

        let mut borrow = sqlx::query_as::<_, Borrow>("SELECT * FROM borrow WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Borrow {} not found", id)))?;

        borrow.check_in(return_date)?;

        let book = lock_book(&mut *tx, borrow.book_id).await?;

        sqlx::query("UPDATE books SET copies = $1 WHERE id = $2")
            .bind(book.check_in()?)
            .bind(book.id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::from_store)?;

        sqlx::query("UPDATE borrow SET return_date = $1 WHERE id = $2")
            .bind(&borrow.return_date)
            .bind(borrow.id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::from_store)?;

        tx.commit().await?;
        Ok(borrow)
    }
}

async fn lock_book(conn: &mut PgConnection, book_id: i32) -> AppResult<Book> {
    sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1 FOR UPDATE")
        .bind(book_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book {} not found", book_id)))
}
