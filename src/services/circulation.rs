//! Circulation service: borrowing and returning books

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{Borrow, CreateBorrow, ReturnQuery},
    repository::LibraryStore,
};

#[derive(Clone)]
pub struct CirculationService {
    store: Arc<dyn LibraryStore>,
}

impl CirculationService {
    pub fn new(store: Arc<dyn LibraryStore>) -> Self {
        Self { store }
    }

    pub async fn list_borrows(&self) -> AppResult<Vec<Borrow>> {
        self.store.list_borrows().await
    }

    pub async fn get_borrow(&self, id: i32) -> AppResult<Borrow> {
        self.store.get_borrow(id).await
    }

    /// Lend a copy of a book to a reader
    pub async fn borrow_book(&self, data: &CreateBorrow) -> AppResult<Borrow> {
        match self.store.borrow_book(data).await {
            Ok(borrow) => {
                tracing::info!(
                    borrow_id = borrow.id,
                    book_id = borrow.book_id,
                    reader = %borrow.name_reader,
                    "borrow created"
                );
                Ok(borrow)
            }
            Err(AppError::Circulation(err)) => {
                tracing::warn!(book_id = data.book_id, "borrow refused: {}", err);
                Err(err.into())
            }
            Err(err) => Err(err),
        }
    }

    /// Close a borrow and put the copy back on the shelf
    pub async fn return_borrow(&self, id: i32, query: &ReturnQuery) -> AppResult<Borrow> {
        query.validate()?;

        match self.store.return_borrow(id, &query.return_date).await {
            Ok(borrow) => {
                tracing::info!(borrow_id = borrow.id, book_id = borrow.book_id, "book returned");
                Ok(borrow)
            }
            Err(AppError::Circulation(err)) => {
                tracing::warn!(borrow_id = id, "return refused: {}", err);
                Err(err.into())
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::CirculationError, repository::MockLibraryStore};

    #[tokio::test]
    async fn empty_return_date_is_a_bad_value() {
        let mut store = MockLibraryStore::new();
        store.expect_return_borrow().never();

        let service = CirculationService::new(Arc::new(store));
        let query = ReturnQuery {
            return_date: String::new(),
        };
        let err = service.return_borrow(1, &query).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn refusals_are_passed_through_unchanged() {
        let mut store = MockLibraryStore::new();
        store
            .expect_borrow_book()
            .returning(|data| Err(CirculationError::OutOfCopies { book_id: data.book_id }.into()));

        let service = CirculationService::new(Arc::new(store));
        let err = service
            .borrow_book(&CreateBorrow {
                book_id: 5,
                name_reader: "Ivan".to_string(),
                get_date: "2023-12-20".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Circulation(CirculationError::OutOfCopies { book_id: 5 })
        ));
    }

    #[tokio::test]
    async fn return_forwards_the_requested_date() {
        let mut store = MockLibraryStore::new();
        store
            .expect_return_borrow()
            .withf(|id, date| *id == 1 && date == "2024-01-01")
            .times(1)
            .returning(|id, date| {
                Ok(Borrow {
                    id,
                    book_id: 5,
                    name_reader: "Ivan".to_string(),
                    get_date: "2023-12-20".to_string(),
                    return_date: Some(date.to_string()),
                })
            });

        let service = CirculationService::new(Arc::new(store));
        let query = ReturnQuery {
            return_date: "2024-01-01".to_string(),
        };
        let borrow = service.return_borrow(1, &query).await.unwrap();
        assert_eq!(borrow.return_date.as_deref(), Some("2024-01-01"));
    }
}
