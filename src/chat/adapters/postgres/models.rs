//! Diesel model types for chat persistence.
//!
//! These types map database rows to Rust structs using Diesel's derive
//! macros. They serve as the boundary between the database and domain
//! layers; conversion helpers live with the adapters that use them.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{conversation, messages, sender_conversations, user_conversations};
use crate::chat::domain::{
    ConversationId, ConversationParticipant, ConversationSummary, Message, MessageId, UserId,
};

// ============================================================================
// Message Models
// ============================================================================

/// Database row representation of a message.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = messages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MessageRow {
    /// Conversation partition the row belongs to.
    pub conversation_id: i64,
    /// When the message was accepted.
    pub timestamp: DateTime<Utc>,
    /// Globally unique message identifier.
    pub message_id: i64,
    /// Message body.
    pub content: String,
    /// Sending user.
    pub sender_id: i64,
    /// Receiving user.
    pub receiver_id: i64,
}

impl From<&Message> for MessageRow {
    fn from(message: &Message) -> Self {
        Self {
            conversation_id: message.conversation_id.value(),
            timestamp: message.timestamp,
            message_id: message.message_id.value(),
            content: message.content.clone(),
            sender_id: message.sender_id.value(),
            receiver_id: message.receiver_id.value(),
        }
    }
}

impl From<MessageRow> for Message {
    fn from(row: MessageRow) -> Self {
        Self {
            conversation_id: ConversationId::new(row.conversation_id),
            timestamp: row.timestamp,
            message_id: MessageId::new(row.message_id),
            content: row.content,
            sender_id: UserId::new(row.sender_id),
            receiver_id: UserId::new(row.receiver_id),
        }
    }
}

// ============================================================================
// Recent-Chats Models
// ============================================================================

/// Database row representation of a conversation summary.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = user_conversations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SummaryRow {
    /// Summarised conversation.
    pub conversation_id: i64,
    /// Sender of the latest reflected message.
    pub sender_id: i64,
    /// Receiver of the latest reflected message.
    pub receiver_id: i64,
    /// Timestamp of the latest reflected message.
    pub last_timestamp: DateTime<Utc>,
    /// Body of the latest reflected message.
    pub last_message: String,
}

impl From<&ConversationSummary> for SummaryRow {
    fn from(summary: &ConversationSummary) -> Self {
        Self {
            conversation_id: summary.conversation_id.value(),
            sender_id: summary.sender_id.value(),
            receiver_id: summary.receiver_id.value(),
            last_timestamp: summary.last_timestamp,
            last_message: summary.last_message.clone(),
        }
    }
}

impl From<SummaryRow> for ConversationSummary {
    fn from(row: SummaryRow) -> Self {
        Self {
            conversation_id: ConversationId::new(row.conversation_id),
            sender_id: UserId::new(row.sender_id),
            receiver_id: UserId::new(row.receiver_id),
            last_timestamp: row.last_timestamp,
            last_message: row.last_message,
        }
    }
}

// ============================================================================
// Directory Models
// ============================================================================

/// Database row representation of a directory membership row.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = conversation)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ParticipantRow {
    /// Conversation partition the row belongs to.
    pub conversation_id: i64,
    /// The participant this row is stored under.
    pub sender_id: i64,
    /// The counterpart participant.
    pub receiver_id: i64,
    /// Last activity when this row was written.
    pub last_timestamp: DateTime<Utc>,
}

impl From<&ConversationParticipant> for ParticipantRow {
    fn from(participant: &ConversationParticipant) -> Self {
        Self {
            conversation_id: participant.conversation_id.value(),
            sender_id: participant.sender_id.value(),
            receiver_id: participant.receiver_id.value(),
            last_timestamp: participant.last_timestamp,
        }
    }
}

impl From<ParticipantRow> for ConversationParticipant {
    fn from(row: ParticipantRow) -> Self {
        Self {
            conversation_id: ConversationId::new(row.conversation_id),
            sender_id: UserId::new(row.sender_id),
            receiver_id: UserId::new(row.receiver_id),
            last_timestamp: row.last_timestamp,
        }
    }
}

/// Database row for the per-sender conversation index.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = sender_conversations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SenderConversationRow {
    /// Index partition: the participating user.
    pub sender_id: i64,
    /// A conversation the user participates in.
    pub conversation_id: i64,
    /// Last activity in that conversation.
    pub last_timestamp: DateTime<Utc>,
}
