//! `PostgreSQL` implementation of the `IdAllocator` port.

use async_trait::async_trait;
use diesel::prelude::*;

use super::pool::{PgPool, get_conn, run_blocking};
use super::schema::counter;
use crate::chat::{domain::SequenceName, error::StorageResult, ports::IdAllocator};

/// `PostgreSQL` implementation of [`IdAllocator`].
///
/// The increment is a single atomic upsert: `INSERT .. ON CONFLICT DO
/// UPDATE SET counter_value = counter_value + 1 RETURNING counter_value`.
/// Row-level locking serialises concurrent increments on the same
/// sequence; different sequences never contend. The non-idempotent-retry
/// caveat of the port contract applies unchanged: an increment that times
/// out may or may not have landed.
#[derive(Debug, Clone)]
pub struct PostgresIdAllocator {
    pool: PgPool,
}

impl PostgresIdAllocator {
    /// Creates an allocator using the given connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdAllocator for PostgresIdAllocator {
    async fn next_id(&self, sequence: &SequenceName) -> StorageResult<i64> {
        let pool = self.pool.clone();
        let name = sequence.as_str().to_owned();

        run_blocking(move || {
            let mut conn = get_conn(&pool)?;

            let value = diesel::insert_into(counter::table)
                .values((
                    counter::counter_name.eq(&name),
                    counter::counter_value.eq(1_i64),
                ))
                .on_conflict(counter::counter_name)
                .do_update()
                .set(counter::counter_value.eq(counter::counter_value + 1_i64))
                .returning(counter::counter_value)
                .get_result(&mut conn)?;

            Ok(value)
        })
        .await
    }
}
