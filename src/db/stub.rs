//! Stub Connection
//!
//! Tracks connection state and query counts; every query returns no rows.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tracing::debug;

use super::{Database, QueryResult};
use crate::error::{Result, ServiceError};

/// Backend a connection string points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseKind {
    Postgres,
    MySql,
}

impl fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseKind::Postgres => f.write_str("postgres"),
            DatabaseKind::MySql => f.write_str("mysql"),
        }
    }
}

/// Connection that simulates a database without any I/O.
#[derive(Debug)]
pub struct StubConnection {
    kind: DatabaseKind,
    url: String,
    connected: AtomicBool,
    queries: AtomicU64,
}

impl StubConnection {
    pub fn new(kind: DatabaseKind, url: impl Into<String>) -> Self {
        Self {
            kind,
            url: url.into(),
            connected: AtomicBool::new(false),
            queries: AtomicU64::new(0),
        }
    }

    /// Picks the backend from the URL scheme.
    ///
    /// Both `postgresql://` and the short `postgres://` select PostgreSQL.
    pub fn from_url(url: &str) -> Self {
        let kind = if url.starts_with("postgres") {
            DatabaseKind::Postgres
        } else {
            DatabaseKind::MySql
        };
        Self::new(kind, url)
    }

    pub fn kind(&self) -> DatabaseKind {
        self.kind
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Number of queries executed while connected.
    pub fn query_count(&self) -> u64 {
        self.queries.load(Ordering::Relaxed)
    }
}

impl Database for StubConnection {
    async fn connect(&self) -> Result<()> {
        self.connected.store(true, Ordering::Release);
        debug!(kind = %self.kind, "Connected");
        Ok(())
    }

    async fn execute_query(&self, query: &str) -> Result<QueryResult> {
        if !self.is_connected() {
            return Err(ServiceError::NotConnected);
        }
        self.queries.fetch_add(1, Ordering::Relaxed);
        debug!(kind = %self.kind, query, "Executed query");
        Ok(QueryResult::empty())
    }

    async fn close(&self) {
        if self.connected.swap(false, Ordering::AcqRel) {
            debug!(kind = %self.kind, "Connection closed");
        }
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }
}
