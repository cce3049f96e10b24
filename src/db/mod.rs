//! Database Module
//!
//! Connection abstraction used by the services, plus a stub implementation
//! that never performs I/O.

mod stub;

use std::future::Future;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::config::Config;
use crate::error::Result;

pub use stub::{DatabaseKind, StubConnection};

// == Query Result ==
/// Rows and affected-row count returned by a query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub rows: Vec<Value>,
    pub affected: u64,
}

impl QueryResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<Value>) -> Self {
        Self { rows, affected: 0 }
    }
}

// == Database Trait ==
/// A database connection the services query through.
pub trait Database: Send + Sync {
    /// Opens the connection.
    fn connect(&self) -> impl Future<Output = Result<()>> + Send;

    /// Runs a query. Fails with `ServiceError::NotConnected` when closed.
    fn execute_query(&self, query: &str) -> impl Future<Output = Result<QueryResult>> + Send;

    /// Closes the connection. Closing twice is a no-op.
    fn close(&self) -> impl Future<Output = ()> + Send;

    fn is_connected(&self) -> bool;
}

// == Initialize ==
/// Builds a connection for `config.database_url` and connects it.
///
/// URLs starting with `postgres` select PostgreSQL; anything else is
/// treated as a MySQL connection string.
pub async fn initialize_database(config: &Config) -> Result<StubConnection> {
    let db = StubConnection::from_url(&config.database_url);
    db.connect().await?;
    info!(kind = %db.kind(), "Database connection initialized");
    Ok(db)
}
