//! `PostgreSQL` implementation of the `MessageStore` port.

use async_trait::async_trait;
use diesel::prelude::*;

use super::models::MessageRow;
use super::pool::{PgPool, get_conn, run_blocking};
use super::schema::messages;
use crate::chat::{
    domain::{ConversationId, HistoryCursor, HistoryPage, Message},
    error::{StorageError, StorageResult},
    ports::MessageStore,
};

/// `PostgreSQL` implementation of [`MessageStore`].
///
/// The composite primary key `(conversation_id, timestamp, message_id)`
/// doubles as the idempotency key: a retried append conflicts with the
/// original row and does nothing. History scans read the primary-key
/// index in its clustering order, so no sort step is needed at query
/// time.
#[derive(Debug, Clone)]
pub struct PostgresMessageStore {
    pool: PgPool,
}

impl PostgresMessageStore {
    /// Creates a store using the given connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageStore for PostgresMessageStore {
    async fn append(&self, message: &Message) -> StorageResult<()> {
        let pool = self.pool.clone();
        let row = MessageRow::from(message);

        run_blocking(move || {
            let mut conn = get_conn(&pool)?;

            diesel::insert_into(messages::table)
                .values(&row)
                .on_conflict((
                    messages::conversation_id,
                    messages::timestamp,
                    messages::message_id,
                ))
                .do_nothing()
                .execute(&mut conn)?;

            Ok(())
        })
        .await
    }

    async fn fetch_history(
        &self,
        conversation_id: ConversationId,
        cursor: Option<HistoryCursor>,
        limit: usize,
    ) -> StorageResult<HistoryPage> {
        if limit == 0 {
            return Err(StorageError::invalid_argument("limit must be positive"));
        }
        let page_size = i64::try_from(limit)
            .map_err(|_| StorageError::invalid_argument(format!("limit {limit} out of range")))?;

        let pool = self.pool.clone();

        run_blocking(move || {
            let mut conn = get_conn(&pool)?;

            let mut query = messages::table
                .filter(messages::conversation_id.eq(conversation_id.value()))
                .into_boxed();

            if let Some(c) = cursor {
                // Strictly older than the cursor position: earlier
                // timestamp, or same timestamp with a smaller identifier.
                query = query.filter(
                    messages::timestamp.lt(c.before_timestamp).or(messages::timestamp
                        .eq(c.before_timestamp)
                        .and(messages::message_id.lt(c.before_message_id.value()))),
                );
            }

            // Over-fetch one row to learn whether an older message exists.
            let mut rows: Vec<MessageRow> = query
                .order((messages::timestamp.desc(), messages::message_id.desc()))
                .limit(page_size.saturating_add(1))
                .select(MessageRow::as_select())
                .load(&mut conn)?;

            let has_more = rows.len() > limit;
            rows.truncate(limit);

            Ok(HistoryPage {
                messages: rows.into_iter().map(Message::from).collect(),
                has_more,
            })
        })
        .await
    }
}
