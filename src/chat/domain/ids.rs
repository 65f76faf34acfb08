//! Domain identifier newtypes for conversations, messages, users, and
//! counter sequences.
//!
//! Identifiers are 64-bit integers issued by the ID allocator's
//! distributed counter (user identifiers originate outside this core).
//! The newtypes prevent accidental mixing of the different identifier
//! spaces.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a conversation.
///
/// Allocated from the `conversation_id` counter sequence; strictly
/// increasing across the system but not necessarily contiguous.
///
/// # Examples
///
/// ```
/// use courier::chat::domain::ConversationId;
///
/// let id = ConversationId::new(42);
/// assert_eq!(id.value(), 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(i64);

impl ConversationId {
    /// Creates a conversation identifier from a raw value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying integer value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for ConversationId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a message.
///
/// Allocated from the `message_id` counter sequence. Because allocation is
/// monotonic, a higher message identifier always denotes a later send,
/// which is what breaks ties between messages stored with the same
/// timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(i64);

impl MessageId {
    /// Creates a message identifier from a raw value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying integer value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for MessageId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier for a user participating in conversations.
///
/// Users are managed by an external identity service; this core only
/// stores their identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Creates a user identifier from a raw value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying integer value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Name of a logical counter sequence in the ID allocator.
///
/// One counter row exists per sequence name. The two well-known sequences
/// are [`SequenceName::conversations`] and [`SequenceName::messages`];
/// additional sequences may be created on first increment.
///
/// # Examples
///
/// ```
/// use courier::chat::domain::SequenceName;
///
/// assert_eq!(SequenceName::messages().as_str(), "message_id");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SequenceName(String);

impl SequenceName {
    /// Creates a sequence name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The sequence issuing conversation identifiers.
    #[must_use]
    pub fn conversations() -> Self {
        Self::new("conversation_id")
    }

    /// The sequence issuing message identifiers.
    #[must_use]
    pub fn messages() -> Self {
        Self::new("message_id")
    }

    /// Returns the sequence name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SequenceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
