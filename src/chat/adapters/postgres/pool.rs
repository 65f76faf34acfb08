//! Connection pool construction and blocking operation helpers.
//!
//! Provides utilities for offloading synchronous Diesel operations to a
//! dedicated thread pool, avoiding blocking the async executor, and for
//! building the r2d2 pool with the deployment's chosen commit durability
//! applied to every connection.

use diesel::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use tracing::debug;

use crate::chat::{
    config::StorageConfig,
    error::{StorageError, StorageResult},
};

/// `PostgreSQL` connection pool type.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Pooled connection type for internal use.
pub(super) type PooledConn = PooledConnection<ConnectionManager<PgConnection>>;

/// Applies deployment-level session settings to each acquired connection.
#[derive(Debug, Clone, Copy)]
struct SessionSetup {
    synchronous_commit: &'static str,
}

impl CustomizeConnection<PgConnection, diesel::r2d2::Error> for SessionSetup {
    fn on_acquire(&self, conn: &mut PgConnection) -> Result<(), diesel::r2d2::Error> {
        diesel::sql_query(format!(
            "SET synchronous_commit TO {}",
            self.synchronous_commit
        ))
        .execute(conn)
        .map(drop)
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Builds the connection pool described by `config`.
///
/// # Errors
///
/// Returns [`StorageError::Unavailable`] if the pool cannot establish its
/// initial connections.
pub fn build_pool(config: &StorageConfig) -> StorageResult<PgPool> {
    debug!(
        max_pool_size = config.max_pool_size,
        synchronous_commit = config.commit_durability.as_synchronous_commit(),
        "building storage connection pool"
    );

    Pool::builder()
        .max_size(config.max_pool_size)
        .connection_customizer(Box::new(SessionSetup {
            synchronous_commit: config.commit_durability.as_synchronous_commit(),
        }))
        .build(ConnectionManager::new(&config.database_url))
        .map_err(|e| StorageError::unavailable(e.to_string()))
}

/// Runs a blocking database operation on a dedicated thread pool.
///
/// Wraps the closure in [`tokio::task::spawn_blocking`] to prevent
/// blocking the async executor's worker threads.
pub(super) async fn run_blocking<F, T>(f: F) -> StorageResult<T>
where
    F: FnOnce() -> StorageResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StorageError::unavailable(format!("task join error: {e}")))?
}

/// Obtains a connection from the pool.
pub(super) fn get_conn(pool: &PgPool) -> StorageResult<PooledConn> {
    pool.get().map_err(StorageError::from)
}
