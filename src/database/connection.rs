use std::time::Duration;

use anyhow::{Context, Result};
use r2d2_sqlite::SqliteConnectionManager;

pub type DbPool = r2d2::Pool<SqliteConnectionManager>;
pub type DbConn = r2d2::PooledConnection<SqliteConnectionManager>;

pub const IN_MEMORY: &str = ":memory:";

pub fn create_pool(database_path: &str) -> Result<DbPool> {
    let manager = build_manager(database_path);
    build_pool(manager, pool_size(database_path))
}

fn build_manager(path: &str) -> SqliteConnectionManager {
    if path == IN_MEMORY {
        SqliteConnectionManager::memory()
    } else {
        SqliteConnectionManager::file(path)
    }
}

// every in-memory connection is its own database, so share a single one
fn pool_size(path: &str) -> u32 {
    if path == IN_MEMORY { 1 } else { 8 }
}

fn build_pool(manager: SqliteConnectionManager, max_size: u32) -> Result<DbPool> {
    // recycling the only in-memory connection would drop its data
    let (idle_timeout, max_lifetime) = if max_size == 1 {
        (None, None)
    } else {
        (Some(Duration::from_secs(600)), Some(Duration::from_secs(1800)))
    };

    r2d2::Pool::builder()
        .max_size(max_size)
        .idle_timeout(idle_timeout)
        .max_lifetime(max_lifetime)
        .build(manager)
        .context("Failed to create database connection pool")
}

pub fn get_connection(pool: &DbPool) -> Result<DbConn> {
    pool.get()
        .context("Failed to get database connection from pool")
}
