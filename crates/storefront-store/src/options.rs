use std::str::FromStr;
use std::time::Duration;

use sqlx::ConnectOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use storefront_core::{Error, Result, describe_connection};

use crate::errors::map_db_error;

/// In-memory database URL; every connection to it is a separate database.
pub const IN_MEMORY_URL: &str = "sqlite::memory:";

/// Options that control how the store connects.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub create_if_missing: bool,
    /// Log every statement through `sqlx`'s tracing events.
    pub echo_sql: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            max_connections: 5,
            acquire_timeout: Duration::from_secs(10),
            create_if_missing: true,
            echo_sql: false,
        }
    }
}

/// Open a pool for a SQLite connection string.
///
/// In-memory databases are pinned to a single connection that is never
/// recycled, since closing it discards the data.
pub async fn connect(url: &str, opts: &StoreOptions) -> Result<SqlitePool> {
    let info = describe_connection(url);
    if !info.is_sqlite() {
        return Err(Error::ConnectionFailure(format!(
            "unsupported engine in connection string: {}",
            info.redacted
        )));
    }

    let mut connect_options = SqliteConnectOptions::from_str(url)
        .map_err(map_db_error)?
        .create_if_missing(opts.create_if_missing)
        .foreign_keys(true);
    if !opts.echo_sql {
        connect_options = connect_options.disable_statement_logging();
    }

    let pool_options = if info.is_in_memory() {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(opts.max_connections.max(1))
    };

    let pool = pool_options
        .acquire_timeout(opts.acquire_timeout)
        .connect_with(connect_options)
        .await
        .map_err(map_db_error)?;

    info!(event = "store_connected", database = %info.redacted);
    Ok(pool)
}

/// Open a private in-memory database with default options.
pub async fn connect_in_memory() -> Result<SqlitePool> {
    connect(IN_MEMORY_URL, &StoreOptions::default()).await
}
