//! User service
//!
//! Cache-aside access to user records: lookups try the cache first and fill
//! it from the database on a miss.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use super::{quote, retry, SharedCache};
use crate::cache::{BoundedCache, CacheStats};
use crate::config::Config;
use crate::db::Database;
use crate::error::{Result, ServiceError};
use crate::models::{User, UserUpdate};

/// User operations backed by a database and a bounded cache keyed by id.
pub struct UserService<D> {
    db: Arc<D>,
    cache: SharedCache<u64, User>,
    retry_attempts: u32,
    /// Stands in for the database id sequence
    next_id: AtomicU64,
}

impl<D: Database> UserService<D> {
    /// Creates the service with a cache of `config.user_cache_size` entries.
    pub fn new(db: Arc<D>, config: &Config) -> Result<Self> {
        let cache = BoundedCache::try_new(config.user_cache_size)?;
        Ok(Self {
            db,
            cache: Arc::new(RwLock::new(cache)),
            retry_attempts: config.retry_attempts,
            next_id: AtomicU64::new(1),
        })
    }

    /// Shared handle to the user cache.
    pub fn cache(&self) -> SharedCache<u64, User> {
        Arc::clone(&self.cache)
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }

    // == Create ==
    /// Validates and stores a new user, then caches it.
    #[instrument(skip(self), err)]
    pub async fn create_user(&self, username: &str, email: &str) -> Result<User> {
        let mut user = User::new(0, username, email);
        if !user.validate_email() {
            return Err(ServiceError::Validation(format!(
                "Invalid email format: {}",
                email
            )));
        }
        user.id = self.next_id.fetch_add(1, Ordering::Relaxed);

        let query = format!(
            "INSERT INTO users (id, username, email) VALUES ({}, {}, {})",
            user.id,
            quote(username),
            quote(email)
        );
        let db = self.db.as_ref();
        let query = query.as_str();
        retry(self.retry_attempts, move || db.execute_query(query)).await?;

        self.cache.write().await.put(user.id, user.clone());
        info!(user_id = user.id, "User created");
        Ok(user)
    }

    // == Get ==
    /// Looks a user up by id, consulting the cache before the database.
    #[instrument(skip(self), err)]
    pub async fn get_user(&self, user_id: u64) -> Result<Option<User>> {
        let cached = {
            let mut cache = self.cache.write().await;
            cache.get(&user_id).cloned()
        };
        if let Some(user) = cached {
            debug!(user_id, "User cache hit");
            return Ok(Some(user));
        }

        let query = format!("SELECT * FROM users WHERE id = {}", user_id);
        let result = self.db.execute_query(&query).await?;

        match result.rows.into_iter().next() {
            Some(row) => {
                let user = User::from_row(row)?;
                self.cache.write().await.put(user_id, user.clone());
                debug!(user_id, "User loaded from database");
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    // == Update ==
    /// Applies `update` to an existing user.
    ///
    /// Returns false when the user does not exist.
    #[instrument(skip(self, update), err)]
    pub async fn update_user(&self, user_id: u64, update: UserUpdate) -> Result<bool> {
        let mut user = match self.get_user(user_id).await? {
            Some(user) => user,
            None => return Ok(false),
        };
        if update.is_empty() {
            return Ok(true);
        }

        update.apply(&mut user);
        if !user.validate_email() {
            return Err(ServiceError::Validation(format!(
                "Invalid email format: {}",
                user.email
            )));
        }

        let query = format!(
            "UPDATE users SET username = {}, email = {}, is_active = {} WHERE id = {}",
            quote(&user.username),
            quote(&user.email),
            user.is_active,
            user_id
        );
        let db = self.db.as_ref();
        let query = query.as_str();
        retry(self.retry_attempts, move || db.execute_query(query)).await?;

        self.cache.write().await.put(user_id, user);
        info!(user_id, "User updated");
        Ok(true)
    }
}
