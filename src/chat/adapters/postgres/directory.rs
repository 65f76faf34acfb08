//! `PostgreSQL` implementation of the `ConversationDirectory` port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::upsert::excluded;

use super::models::{ParticipantRow, SenderConversationRow};
use super::pool::{PgPool, PooledConn, get_conn, run_blocking};
use super::schema::{conversation, sender_conversations};
use crate::chat::{
    domain::{ConversationId, ConversationParticipant, UserId},
    error::StorageResult,
    ports::ConversationDirectory,
};

/// `PostgreSQL` implementation of [`ConversationDirectory`].
///
/// An upsert writes the symmetric membership rows and the per-sender
/// index rows as two multi-row upserts. The writes are not wrapped in a
/// transaction: each targets one table and the eventual-consistency
/// contract of the core covers the window between them.
#[derive(Debug, Clone)]
pub struct PostgresConversationDirectory {
    pool: PgPool,
}

impl PostgresConversationDirectory {
    /// Creates a directory using the given connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConversationDirectory for PostgresConversationDirectory {
    async fn upsert(
        &self,
        conversation_id: ConversationId,
        sender_id: UserId,
        receiver_id: UserId,
        last_timestamp: DateTime<Utc>,
    ) -> StorageResult<()> {
        let pool = self.pool.clone();
        let row = ConversationParticipant {
            conversation_id,
            sender_id,
            receiver_id,
            last_timestamp,
        };

        run_blocking(move || {
            let mut conn = get_conn(&pool)?;

            // A note-to-self conversation yields identical mirrored rows;
            // a multi-row upsert must not touch the same row twice.
            let mut membership = vec![ParticipantRow::from(&row)];
            if row.sender_id != row.receiver_id {
                membership.push(ParticipantRow::from(&row.mirrored()));
            }

            upsert_membership(&mut conn, &membership)?;
            upsert_sender_index(&mut conn, &membership)?;

            Ok(())
        })
        .await
    }

    async fn list_by_sender(&self, sender_id: UserId) -> StorageResult<Vec<ConversationId>> {
        let pool = self.pool.clone();

        run_blocking(move || {
            let mut conn = get_conn(&pool)?;

            let ids: Vec<i64> = sender_conversations::table
                .filter(sender_conversations::sender_id.eq(sender_id.value()))
                .order((
                    sender_conversations::last_timestamp.desc(),
                    sender_conversations::conversation_id.desc(),
                ))
                .select(sender_conversations::conversation_id)
                .load(&mut conn)?;

            Ok(ids.into_iter().map(ConversationId::new).collect())
        })
        .await
    }

    async fn participants(
        &self,
        conversation_id: ConversationId,
    ) -> StorageResult<Vec<ConversationParticipant>> {
        let pool = self.pool.clone();

        run_blocking(move || {
            let mut conn = get_conn(&pool)?;

            let rows: Vec<ParticipantRow> = conversation::table
                .filter(conversation::conversation_id.eq(conversation_id.value()))
                .order(conversation::sender_id.asc())
                .select(ParticipantRow::as_select())
                .load(&mut conn)?;

            Ok(rows.into_iter().map(ConversationParticipant::from).collect())
        })
        .await
    }

    async fn find_between(
        &self,
        user_a: UserId,
        user_b: UserId,
    ) -> StorageResult<Option<ConversationId>> {
        let pool = self.pool.clone();

        run_blocking(move || {
            let mut conn = get_conn(&pool)?;

            // Membership is stored symmetrically, so one direction
            // suffices regardless of argument order.
            let id: Option<i64> = conversation::table
                .filter(conversation::sender_id.eq(user_a.value()))
                .filter(conversation::receiver_id.eq(user_b.value()))
                .select(conversation::conversation_id)
                .first(&mut conn)
                .optional()?;

            Ok(id.map(ConversationId::new))
        })
        .await
    }
}

fn upsert_membership(conn: &mut PooledConn, rows: &[ParticipantRow]) -> StorageResult<()> {
    diesel::insert_into(conversation::table)
        .values(rows)
        .on_conflict((conversation::conversation_id, conversation::sender_id))
        .do_update()
        .set((
            conversation::receiver_id.eq(excluded(conversation::receiver_id)),
            conversation::last_timestamp.eq(excluded(conversation::last_timestamp)),
        ))
        .execute(conn)?;

    Ok(())
}

fn upsert_sender_index(conn: &mut PooledConn, membership: &[ParticipantRow]) -> StorageResult<()> {
    let rows: Vec<SenderConversationRow> = membership
        .iter()
        .map(|row| SenderConversationRow {
            sender_id: row.sender_id,
            conversation_id: row.conversation_id,
            last_timestamp: row.last_timestamp,
        })
        .collect();

    diesel::insert_into(sender_conversations::table)
        .values(&rows)
        .on_conflict((
            sender_conversations::sender_id,
            sender_conversations::conversation_id,
        ))
        .do_update()
        .set(sender_conversations::last_timestamp.eq(excluded(sender_conversations::last_timestamp)))
        .execute(conn)?;

    Ok(())
}
