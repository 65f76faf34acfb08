//! Diesel schema for the chat storage tables.
//!
//! Composite primary keys mirror the partition-plus-clustering layout of
//! the logical schema: the leading key column is the partition, the rest
//! cluster rows within it.

diesel::table! {
    /// One row per logical identifier sequence; mutated only by the ID
    /// allocator, never deleted.
    counter (counter_name) {
        /// Sequence name, e.g. `conversation_id` or `message_id`.
        #[max_length = 64]
        counter_name -> Varchar,
        /// Last issued value; strictly increasing.
        counter_value -> Int8,
    }
}

diesel::table! {
    /// Immutable message bodies, one partition per conversation.
    messages (conversation_id, timestamp, message_id) {
        /// Partition key.
        conversation_id -> Int8,
        /// Clustering key, scanned newest-first.
        timestamp -> Timestamptz,
        /// Clustering tie-break at timestamp collisions.
        message_id -> Int8,
        /// Message body.
        content -> Text,
        /// Sending user.
        sender_id -> Int8,
        /// Receiving user.
        receiver_id -> Int8,
    }
}

diesel::table! {
    /// Recent-chats index: one overwritable summary row per conversation.
    user_conversations (conversation_id) {
        /// Summarised conversation.
        conversation_id -> Int8,
        /// Sender of the latest reflected message.
        sender_id -> Int8,
        /// Receiver of the latest reflected message.
        receiver_id -> Int8,
        /// Timestamp of the latest reflected message.
        last_timestamp -> Timestamptz,
        /// Body of the latest reflected message.
        last_message -> Text,
    }
}

diesel::table! {
    /// Conversation directory: one membership row per participant,
    /// clustered by participant id.
    conversation (conversation_id, sender_id) {
        /// Partition key.
        conversation_id -> Int8,
        /// Clustering key: the participant this row is stored under.
        sender_id -> Int8,
        /// The counterpart participant.
        receiver_id -> Int8,
        /// Last activity when this row was written.
        last_timestamp -> Timestamptz,
    }
}

diesel::table! {
    /// Denormalised per-sender index making "list my conversations" a
    /// single-partition read.
    sender_conversations (sender_id, conversation_id) {
        /// Partition key.
        sender_id -> Int8,
        /// The conversation the sender participates in.
        conversation_id -> Int8,
        /// Last activity in that conversation.
        last_timestamp -> Timestamptz,
    }
}
