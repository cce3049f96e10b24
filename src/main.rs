//! Bounded Cache demo
//!
//! Wires the user and product services to a stub database and exercises the
//! caches with a short scripted session.

use std::env;
use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bounded_cache::db::{initialize_database, Database};
use bounded_cache::models::ProductCategory;
use bounded_cache::service::{ProductService, UserService};
use bounded_cache::{spawn_stats_reporter, Config};

/// Main entry point for the demo.
///
/// # Startup Sequence
/// 1. Load configuration from `CONFIG_FILE` (JSON) or environment variables
/// 2. Initialize tracing subscriber for logging
/// 3. Connect the stub database
/// 4. Create the user and product services with their caches
/// 5. Start a background stats reporter per cache
/// 6. Run a sample session, then close the database
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match env::var("CONFIG_FILE") {
        Ok(path) => Config::from_file(&path).with_context(|| format!("loading {}", path))?,
        Err(_) => Config::from_env(),
    };

    // Defaults to the configured level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.default_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    config.validate().context("invalid configuration")?;
    info!(
        "Configuration loaded: cache_size={}, user_cache_size={}, retry_attempts={}, database_url={}",
        config.cache_size, config.user_cache_size, config.retry_attempts, config.database_url
    );

    let db = Arc::new(initialize_database(&config).await?);
    let users = UserService::new(Arc::clone(&db), &config)?;
    let products = ProductService::new(Arc::clone(&db), &config)?;

    let reporters = [
        spawn_stats_reporter("users", users.cache(), config.stats_interval),
        spawn_stats_reporter("products", products.cache(), config.stats_interval),
    ];
    info!("Stats reporters started");

    if let Err(err) = run_session(&users, &products).await {
        error!("Application error: {}", err);
    }

    for (name, stats) in [
        ("users", users.cache_stats().await),
        ("products", products.cache_stats().await),
    ] {
        info!(
            cache = name,
            hits = stats.hits,
            misses = stats.misses,
            evictions = stats.evictions,
            "Final cache stats: {}",
            serde_json::to_string(&stats)?
        );
    }

    for reporter in &reporters {
        reporter.abort();
    }
    db.close().await;
    info!("Shutdown complete");
    Ok(())
}

async fn run_session<D: Database>(
    users: &UserService<D>,
    products: &ProductService<D>,
) -> bounded_cache::error::Result<()> {
    let user = users.create_user("john_doe", "john@example.com").await?;
    info!("Created user: {:?}", user);

    let retrieved = users.get_user(user.id).await?;
    info!("Retrieved user: {:?}", retrieved);

    let product = products
        .create_product("Mechanical keyboard", 89.99, ProductCategory::Electronics)
        .await?;
    info!("Created product: {:?}", product);

    let found = products.search_products("keyboard", None).await?;
    info!("Search returned {} products", found.len());

    Ok(())
}
