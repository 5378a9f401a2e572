//! Application state management

use domain_products::{InMemoryProductRepository, ProductService, seed};
use tracing::info;

use crate::config::Config;

pub type Products = ProductService<InMemoryProductRepository>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub products: Products,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let repository = if config.seed_data {
            let catalog = seed::catalog();
            info!(count = catalog.len(), "Seeding product store");
            InMemoryProductRepository::with_products(catalog)
        } else {
            InMemoryProductRepository::new()
        };

        Self {
            config,
            products: ProductService::new(repository),
        }
    }
}
