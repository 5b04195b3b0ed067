//! Catalog management service (authors and books)

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::AppResult,
    models::{Author, AuthorRequest, Book, BookRequest},
    repository::LibraryStore,
};

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn LibraryStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn LibraryStore>) -> Self {
        Self { store }
    }

    pub async fn list_authors(&self) -> AppResult<Vec<Author>> {
        self.store.list_authors().await
    }

    pub async fn get_author(&self, id: i32) -> AppResult<Author> {
        self.store.get_author(id).await
    }

    pub async fn create_author(&self, data: &AuthorRequest) -> AppResult<Author> {
        let author = self.store.create_author(data).await?;
        tracing::info!(author_id = author.id, "author created");
        Ok(author)
    }

    pub async fn update_author(&self, id: i32, data: &AuthorRequest) -> AppResult<Author> {
        self.store.update_author(id, data).await
    }

    pub async fn delete_author(&self, id: i32) -> AppResult<()> {
        self.store.delete_author(id).await?;
        tracing::info!(author_id = id, "author deleted");
        Ok(())
    }

    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.store.list_books().await
    }

    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.store.get_book(id).await
    }

    /// Create a book for an existing author
    pub async fn create_book(&self, data: &BookRequest) -> AppResult<Book> {
        data.validate()?;
        // Verify author exists
        self.store.get_author(data.author).await?;

        let book = self.store.create_book(data).await?;
        tracing::info!(book_id = book.id, copies = book.copies, "book created");
        Ok(book)
    }

    /// Replace a book's fields, copies included
    pub async fn update_book(&self, id: i32, data: &BookRequest) -> AppResult<Book> {
        data.validate()?;
        // Verify author exists
        self.store.get_author(data.author).await?;
        self.store.update_book(id, data).await
    }

    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.store.delete_book(id).await?;
        tracing::info!(book_id = id, "book deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::AppError, repository::MockLibraryStore};

    fn request(author: i32, copies: i32) -> BookRequest {
        BookRequest {
            title: "War and Peace".to_string(),
            description: "Novel".to_string(),
            author,
            copies,
        }
    }

    #[tokio::test]
    async fn create_book_requires_an_existing_author() {
        let mut store = MockLibraryStore::new();
        store
            .expect_get_author()
            .returning(|id| Err(AppError::NotFound(format!("Author {} not found", id))));
        store.expect_create_book().never();

        let service = CatalogService::new(Arc::new(store));
        let err = service.create_book(&request(42, 1)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(msg) if msg == "Author 42 not found"));
    }

    #[tokio::test]
    async fn negative_copies_never_reach_the_store() {
        let mut store = MockLibraryStore::new();
        store.expect_get_author().never();
        store.expect_update_book().never();

        let service = CatalogService::new(Arc::new(store));
        let err = service.update_book(5, &request(1, -3)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn update_book_replaces_copies() {
        let mut store = MockLibraryStore::new();
        store.expect_get_author().returning(|id| {
            Ok(Author {
                id,
                name: "Лев".to_string(),
                surname: "Толстой".to_string(),
                birthday: "28.08.1828".to_string(),
            })
        });
        store
            .expect_update_book()
            .withf(|id, data| *id == 5 && data.copies == 7)
            .returning(|id, data| {
                Ok(Book {
                    id,
                    title: data.title.clone(),
                    description: data.description.clone(),
                    author: data.author,
                    copies: data.copies,
                })
            });

        let service = CatalogService::new(Arc::new(store));
        let book = service.update_book(5, &request(1, 7)).await.unwrap();
        assert_eq!(book.copies, 7);
        assert_eq!(book.id, 5);
    }
}
