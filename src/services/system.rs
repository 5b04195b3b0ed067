//! Schema and readiness operations

use std::sync::Arc;

use crate::{error::AppResult, repository::LibraryStore};

#[derive(Clone)]
pub struct SystemService {
    store: Arc<dyn LibraryStore>,
}

impl SystemService {
    pub fn new(store: Arc<dyn LibraryStore>) -> Self {
        Self { store }
    }

    /// Drop all tables and recreate them empty
    pub async fn reset_schema(&self) -> AppResult<()> {
        tracing::warn!("resetting database schema, all records are dropped");
        self.store.reset_schema().await?;
        tracing::info!("schema reset");
        Ok(())
    }

    /// Check database connectivity
    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }
}
