//! `PostgreSQL` implementation of the `RecentChatsIndex` port.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;

use super::models::SummaryRow;
use super::pool::{PgPool, get_conn, run_blocking};
use super::schema::user_conversations;
use crate::chat::{
    domain::{ConversationId, ConversationSummary},
    error::{StorageError, StorageResult},
    ports::RecentChatsIndex,
};

/// `PostgreSQL` implementation of [`RecentChatsIndex`].
///
/// One upsert per call; the row version that commits last wins, which is
/// the last-writer-wins-by-arrival contract of the port. No conditional
/// write is attempted.
#[derive(Debug, Clone)]
pub struct PostgresRecentChatsIndex {
    pool: PgPool,
}

impl PostgresRecentChatsIndex {
    /// Creates an index using the given connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecentChatsIndex for PostgresRecentChatsIndex {
    async fn upsert_latest(&self, summary: &ConversationSummary) -> StorageResult<()> {
        let pool = self.pool.clone();
        let row = SummaryRow::from(summary);

        run_blocking(move || {
            let mut conn = get_conn(&pool)?;

            diesel::insert_into(user_conversations::table)
                .values(&row)
                .on_conflict(user_conversations::conversation_id)
                .do_update()
                .set((
                    user_conversations::sender_id.eq(excluded(user_conversations::sender_id)),
                    user_conversations::receiver_id.eq(excluded(user_conversations::receiver_id)),
                    user_conversations::last_timestamp
                        .eq(excluded(user_conversations::last_timestamp)),
                    user_conversations::last_message.eq(excluded(user_conversations::last_message)),
                ))
                .execute(&mut conn)?;

            Ok(())
        })
        .await
    }

    async fn get_summary(
        &self,
        conversation_id: ConversationId,
    ) -> StorageResult<ConversationSummary> {
        let pool = self.pool.clone();

        run_blocking(move || {
            let mut conn = get_conn(&pool)?;

            user_conversations::table
                .find(conversation_id.value())
                .select(SummaryRow::as_select())
                .first::<SummaryRow>(&mut conn)
                .optional()?
                .map(ConversationSummary::from)
                .ok_or(StorageError::NotFound(conversation_id))
        })
        .await
    }
}
