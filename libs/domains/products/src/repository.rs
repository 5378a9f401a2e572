use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductInput};
use crate::query::ProductScope;

/// Repository trait for Product persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a new product; the store assigns the id
    async fn create(&self, input: ProductInput) -> ProductResult<Product>;

    /// Get a product by ID
    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>>;

    /// All products visible in `scope`, in id order
    async fn list(&self, scope: ProductScope) -> ProductResult<Vec<Product>>;

    /// Overwrite every field of an existing product.
    ///
    /// Fails with [`ProductError::Concurrency`] when the row is gone by the
    /// time the write lands.
    async fn update(&self, product: Product) -> ProductResult<()>;

    /// Delete a product by ID, returning it if it existed
    async fn delete(&self, id: i32) -> ProductResult<Option<Product>>;

    /// Delete every listed product or none of them.
    ///
    /// Returns the removed products in request order; fails with
    /// [`ProductError::NotFound`] for the first unknown id.
    async fn delete_many(&self, ids: Vec<i32>) -> ProductResult<Vec<Product>>;

    async fn exists(&self, id: i32) -> ProductResult<bool>;

    async fn count(&self) -> ProductResult<usize>;
}

#[derive(Debug, Default)]
struct Store {
    products: BTreeMap<i32, Product>,
    last_id: i32,
}

/// In-memory implementation of ProductRepository
///
/// Clones share the same underlying store.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the store; new ids continue after the highest given id
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let products: BTreeMap<i32, Product> =
            products.into_iter().map(|p| (p.id, p)).collect();
        let last_id = products.keys().next_back().copied().unwrap_or(0);

        Self {
            store: Arc::new(RwLock::new(Store { products, last_id })),
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: ProductInput) -> ProductResult<Product> {
        let mut store = self.store.write().await;

        let id = store
            .last_id
            .checked_add(1)
            .ok_or_else(|| ProductError::Internal("product id space exhausted".to_string()))?;
        store.last_id = id;

        let product = Product::from_input(id, input);
        store.products.insert(id, product.clone());

        tracing::info!(product_id = id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let store = self.store.read().await;
        Ok(store.products.get(&id).cloned())
    }

    async fn list(&self, scope: ProductScope) -> ProductResult<Vec<Product>> {
        let store = self.store.read().await;
        Ok(store
            .products
            .values()
            .filter(|p| scope.includes(p))
            .cloned()
            .collect())
    }

    async fn update(&self, product: Product) -> ProductResult<()> {
        let mut store = self.store.write().await;

        let id = product.id;
        let slot = store
            .products
            .get_mut(&id)
            .ok_or(ProductError::Concurrency(id))?;
        *slot = product;

        tracing::info!(product_id = id, "Updated product");
        Ok(())
    }

    async fn delete(&self, id: i32) -> ProductResult<Option<Product>> {
        let mut store = self.store.write().await;
        let removed = store.products.remove(&id);

        if removed.is_some() {
            tracing::info!(product_id = id, "Deleted product");
        }
        Ok(removed)
    }

    async fn delete_many(&self, ids: Vec<i32>) -> ProductResult<Vec<Product>> {
        let mut store = self.store.write().await;

        // Resolve everything before touching the map
        let resolved = ids
            .iter()
            .map(|id| {
                store
                    .products
                    .get(id)
                    .cloned()
                    .ok_or(ProductError::NotFound(*id))
            })
            .collect::<ProductResult<Vec<Product>>>()?;

        for id in &ids {
            store.products.remove(id);
        }

        tracing::info!(count = resolved.len(), ids = ?ids, "Deleted products");
        Ok(resolved)
    }

    async fn exists(&self, id: i32) -> ProductResult<bool> {
        let store = self.store.read().await;
        Ok(store.products.contains_key(&id))
    }

    async fn count(&self) -> ProductResult<usize> {
        let store = self.store.read().await;
        Ok(store.products.len())
    }
}
