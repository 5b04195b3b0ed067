//! API handlers for the library REST endpoints

pub mod authors;
pub mod books;
pub mod borrows;
pub mod health;
pub mod openapi;
pub mod setup;

use axum::{
    routing::{get, patch, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::ToSchema;

use crate::AppState;

/// Acknowledgement body for operations that return no record
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OkResponse {
    #[serde(rename = "OK")]
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Setup
        .route("/create", post(setup::create_database))
        // Authors
        .route("/author", post(authors::create_author))
        .route("/authors", get(authors::list_authors))
        .route(
            "/author/:id",
            get(authors::get_author)
                .put(authors::update_author)
                .delete(authors::delete_author),
        )
        // Books
        .route("/book", post(books::create_book))
        .route("/books", get(books::list_books))
        .route(
            "/book/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book),
        )
        // Borrows
        .route("/borrow", post(borrows::borrow_book))
        .route("/borrows", get(borrows::list_borrows))
        .route("/borrow/:id", get(borrows::get_borrow))
        .route("/borrow/:id/return", patch(borrows::return_borrow))
        .with_state(state);

    Router::new()
        .merge(api)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
