pub mod constants;
pub mod models;
pub mod operations;
pub mod sql;

use anyhow::{Context, Result};
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use tracing::info;

use constants::DEFAULT_TABLE_PREFIX;

/// Connection to the application schema
pub struct Database {
    pool: MySqlPool,
    table_prefix: String,
}

impl Database {
    /// Open a single-connection pool; the migration issues its statements one at a time
    pub async fn connect(database_url: &str, table_prefix: &str) -> Result<Self> {
        info!("Connecting to database");

        let pool = MySqlPoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await
            .context("unable to connect to the database")?;

        let table_prefix = if table_prefix.is_empty() {
            DEFAULT_TABLE_PREFIX.to_string()
        } else {
            table_prefix.to_string()
        };

        Ok(Database { pool, table_prefix })
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    pub fn table_prefix(&self) -> &str {
        &self.table_prefix
    }

    pub async fn close(self) {
        self.pool.close().await;
    }
}
