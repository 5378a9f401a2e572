//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductInput};
use crate::query::{ProductQuery, ProductScope};
use crate::repository::ProductRepository;

/// Product service providing business logic operations
///
/// Versions differ only in the [`ProductScope`] handed to [`list_products`];
/// every other operation works on the full store.
///
/// [`list_products`]: ProductService::list_products
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Filter, sort and page the products visible in `scope`
    #[instrument(skip(self, query))]
    pub async fn list_products(
        &self,
        scope: ProductScope,
        query: &ProductQuery,
    ) -> ProductResult<Vec<Product>> {
        let products = self.repository.list(scope).await?;
        Ok(query.apply(products))
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i32) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Create a new product; any client-supplied id is ignored
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: ProductInput) -> ProductResult<Product> {
        input.validate()?;
        self.repository.create(input).await
    }

    /// Replace every field of product `id` with `input`
    #[instrument(skip(self, input))]
    pub async fn replace_product(&self, id: i32, input: ProductInput) -> ProductResult<()> {
        let body_id = input.id.unwrap_or_default();
        if body_id != id {
            return Err(ProductError::IdMismatch { path: id, body: body_id });
        }
        input.validate()?;

        match self.repository.update(Product::from_input(id, input)).await {
            Ok(()) => Ok(()),
            Err(ProductError::Concurrency(id)) => {
                if self.repository.exists(id).await? {
                    tracing::error!(product_id = id, "Write conflict on existing product");
                    Err(ProductError::Concurrency(id))
                } else {
                    Err(ProductError::NotFound(id))
                }
            }
            Err(e) => Err(e),
        }
    }

    /// Delete a product, returning what was removed
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i32) -> ProductResult<Product> {
        self.repository
            .delete(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Delete every listed product, or none when any id is unknown
    #[instrument(skip(self))]
    pub async fn delete_products(&self, ids: Vec<i32>) -> ProductResult<Vec<Product>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.repository.delete_many(ids).await
    }

    /// Number of stored products; doubles as the readiness probe
    #[instrument(skip(self))]
    pub async fn count_products(&self) -> ProductResult<usize> {
        self.repository.count().await
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
