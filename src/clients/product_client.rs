use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::actor_framework::ResourceClient;
use crate::domain::{NewProduct, Product, ProductPatch, ProductStats};
use crate::product_actor::{validate_patch, validate_product, ProductError};
use crate::retry::RetryPolicy;

/// Client for the Product store.
///
/// This is the catalog's service layer: it validates payloads, assigns ids,
/// and turns store failures into [`ProductError`]s before anything reaches the
/// caller. Clones share the id counter, so ids stay unique across clones.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
    next_id: Arc<AtomicU64>,
    categories: Arc<[String]>,
    retry: RetryPolicy,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>, categories: Vec<String>, retry: RetryPolicy) -> Self {
        Self {
            inner,
            next_id: Arc::new(AtomicU64::new(1)),
            categories: categories.into(),
            retry,
        }
    }

    /// Validates and stores a new product under the next id.
    ///
    /// A payload that fails validation does not consume an id.
    #[instrument(skip(self, product), fields(name = %product.name))]
    pub async fn add_product(&self, product: NewProduct) -> Result<Product, ProductError> {
        let validation = validate_product(&product, &self.categories);
        if !validation.is_valid() {
            warn!(errors = ?validation.errors, "Product validation failed");
            return Err(ProductError::InvalidProduct(validation.errors));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let product = product
            .into_product(id)
            .ok_or_else(|| ProductError::InvalidProduct(validation.errors))?;

        debug!(id, "Sending request");
        let saved = self.inner.create(product).await?;
        info!(id = saved.id, "Product created");
        Ok(saved)
    }

    /// [`add_product`](Self::add_product) under the configured retry policy.
    ///
    /// Only storage failures are retried; validation errors come back as-is.
    #[instrument(skip(self, product), fields(name = %product.name))]
    pub async fn add_product_with_retry(&self, product: NewProduct) -> Result<Product, ProductError> {
        self.retry
            .run_while(|| self.add_product(product.clone()), ProductError::is_transient)
            .await
            .map_err(ProductError::from)
    }

    #[instrument(skip(self))]
    pub async fn get_all_products(&self) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        Ok(self.inner.list().await?)
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: u64) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner
            .get(id)
            .await
            .map_err(|e| ProductError::from_store(id, e))?
            .ok_or(ProductError::ProductNotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn update_product(&self, id: u64, patch: ProductPatch) -> Result<Product, ProductError> {
        let validation = validate_patch(&patch, &self.categories);
        if !validation.is_valid() {
            warn!(errors = ?validation.errors, "Product update rejected");
            return Err(ProductError::InvalidProduct(validation.errors));
        }

        debug!("Sending request");
        let updated = self
            .inner
            .update(id, patch)
            .await
            .map_err(|e| ProductError::from_store(id, e))?;
        info!("Product updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: u64) -> Result<Product, ProductError> {
        debug!("Sending request");
        let deleted = self
            .inner
            .delete(id)
            .await
            .map_err(|e| ProductError::from_store(id, e))?;
        info!(name = %deleted.name, "Product deleted");
        Ok(deleted)
    }

    /// Case-insensitive substring match on the product name, in store order.
    #[instrument(skip(self))]
    pub async fn search_products(&self, query: &str) -> Result<Vec<Product>, ProductError> {
        let query = query.to_lowercase();
        let products = self.get_all_products().await?;
        Ok(products
            .into_iter()
            .filter(|product| product.name.to_lowercase().contains(&query))
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn get_statistics(&self) -> Result<ProductStats, ProductError> {
        let products = self.get_all_products().await?;
        Ok(ProductStats::from_products(&products))
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), ProductError> {
        Ok(self.inner.shutdown().await?)
    }
}
