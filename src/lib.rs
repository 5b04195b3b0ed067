//! Library Catalog & Circulation Service
//!
//! A REST JSON API over PostgreSQL for managing authors, books and the
//! borrow ledger that tracks how many copies of each book are on the shelf.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod telemetry;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
}
