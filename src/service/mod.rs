//! Service Module
//!
//! User and product services that consume the bounded cache with get-then-put
//! lookups against a [`Database`](crate::db::Database).

mod product;
mod retry;
mod user;

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::cache::BoundedCache;

pub use product::ProductService;
pub use retry::{backoff_delay, retry, BASE_DELAY};
pub use user::UserService;

/// A cache shared between tasks. Callers hold the lock for each operation.
pub type SharedCache<K, V> = Arc<RwLock<BoundedCache<K, V>>>;

/// Renders a string as a single-quoted SQL literal.
pub fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
