//! Database connection management: pool creation, pragmas, and migrations.

pub mod write_actor;

use std::path::Path;
use std::sync::Arc;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::errors::StorageError;
use bankwire_discount_core::errors::{DatabaseError, Error, Result};

pub use write_actor::{spawn_writer, WriteHandle};

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Applied on every pooled connection.
#[derive(Debug)]
struct ConnectionOptions;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> std::result::Result<(), diesel::r2d2::Error> {
        conn.batch_execute(
            "PRAGMA journal_mode = WAL; PRAGMA busy_timeout = 5000; PRAGMA foreign_keys = ON;",
        )
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Ensure the database file's parent directory exists and return the path in use.
pub fn init(db_path: &str) -> Result<String> {
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::Database(DatabaseError::ConnectionFailed(format!(
                    "Failed to create database directory {}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }
    }
    Ok(db_path.to_string())
}

/// Create an r2d2 connection pool for the given SQLite file.
pub fn create_pool(db_path: &str) -> Result<Arc<DbPool>> {
    let manager = ConnectionManager::<SqliteConnection>::new(db_path);
    let pool = Pool::builder()
        .connection_customizer(Box::new(ConnectionOptions))
        .build(manager)
        .map_err(StorageError::from)?;
    Ok(Arc::new(pool))
}

/// Run all pending embedded migrations.
pub fn run_migrations(pool: &DbPool) -> Result<()> {
    let mut conn = pool.get().map_err(StorageError::from)?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| StorageError::MigrationFailed(e.to_string()))?;
    log::debug!("Database migrations are up to date");
    Ok(())
}

/// Check out a connection from the pool.
pub fn get_connection(pool: &Arc<DbPool>) -> Result<DbConnection> {
    pool.get().map_err(|e| StorageError::from(e).into())
}
