//! Business logic services

pub mod catalog;
pub mod circulation;
pub mod system;

use std::sync::Arc;

use crate::repository::LibraryStore;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub circulation: circulation::CirculationService,
    pub system: system::SystemService,
}

impl Services {
    /// Create all services over the given store
    pub fn new(store: Arc<dyn LibraryStore>) -> Self {
        Self {
            catalog: catalog::CatalogService::new(store.clone()),
            circulation: circulation::CirculationService::new(store.clone()),
            system: system::SystemService::new(store),
        }
    }
}
