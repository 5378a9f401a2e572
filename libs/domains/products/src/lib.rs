//! Products Domain
//!
//! Versioned product catalog: CRUD plus batch delete over a shared store, and
//! a query builder that filters, sorts and pages listings.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, API version negotiation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, id checks, conflict handling
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + in-memory implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entity, input DTO, query parameters
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{handlers, seed, InMemoryProductRepository, ProductService};
//!
//! let repository = InMemoryProductRepository::with_products(seed::catalog());
//! let service = ProductService::new(repository);
//!
//! let router = axum::Router::new().nest("/products", handlers::router(service));
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod query;
pub mod repository;
pub mod seed;
pub mod service;
pub mod versioning;

// Re-export commonly used types
pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{Product, ProductInput};
pub use query::{ProductQuery, ProductScope, SortField, SortOrder};
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
pub use versioning::ApiVersion;
