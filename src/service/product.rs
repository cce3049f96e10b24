//! Product service

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use super::{quote, retry, SharedCache};
use crate::cache::{BoundedCache, CacheStats};
use crate::config::Config;
use crate::db::Database;
use crate::error::{Result, ServiceError};
use crate::models::{Product, ProductCategory};

/// Product catalogue operations with a bounded cache keyed by id.
pub struct ProductService<D> {
    db: Arc<D>,
    cache: SharedCache<u64, Product>,
    retry_attempts: u32,
    next_id: AtomicU64,
}

impl<D: Database> ProductService<D> {
    /// Creates the service with a cache of `config.cache_size` entries.
    pub fn new(db: Arc<D>, config: &Config) -> Result<Self> {
        let cache = BoundedCache::try_new(config.cache_size)?;
        Ok(Self {
            db,
            cache: Arc::new(RwLock::new(cache)),
            retry_attempts: config.retry_attempts,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn cache(&self) -> SharedCache<u64, Product> {
        Arc::clone(&self.cache)
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }

    /// Validates and stores a new product, then caches it.
    #[instrument(skip(self), err)]
    pub async fn create_product(
        &self,
        name: &str,
        price: f64,
        category: ProductCategory,
    ) -> Result<Product> {
        let mut product = Product::new(0, name, price, category);
        product.validate()?;
        product.id = self.next_id.fetch_add(1, Ordering::Relaxed);

        let query = format!(
            "INSERT INTO products (id, name, price, category) VALUES ({}, {}, {}, {})",
            product.id,
            quote(name),
            price,
            quote(category.as_str())
        );
        let db = self.db.as_ref();
        let query = query.as_str();
        retry(self.retry_attempts, move || db.execute_query(query)).await?;

        self.cache.write().await.put(product.id, product.clone());
        info!(product_id = product.id, "Product created");
        Ok(product)
    }

    /// Returns a cached product without querying the database.
    pub async fn cached_product(&self, product_id: u64) -> Option<Product> {
        self.cache.write().await.get(&product_id).cloned()
    }

    /// Searches products by name, optionally restricted to one category.
    ///
    /// Every product returned is also cached.
    #[instrument(skip(self), err)]
    pub async fn search_products(
        &self,
        query: &str,
        category: Option<ProductCategory>,
    ) -> Result<Vec<Product>> {
        let pattern = quote(&format!("%{}%", query));
        let sql = match category {
            Some(category) => format!(
                "SELECT * FROM products WHERE name LIKE {} AND category = {}",
                pattern,
                quote(category.as_str())
            ),
            None => format!("SELECT * FROM products WHERE name LIKE {}", pattern),
        };
        let result = self.db.execute_query(&sql).await?;

        let products = result
            .rows
            .into_iter()
            .map(|row| serde_json::from_value::<Product>(row).map_err(ServiceError::from))
            .collect::<Result<Vec<_>>>()?;

        let mut cache = self.cache.write().await;
        for product in &products {
            cache.put(product.id, product.clone());
        }
        debug!(count = products.len(), "Products found");
        Ok(products)
    }
}
