//! Pure domain types for the chat storage core.
//!
//! These types carry no infrastructure dependencies; adapters translate
//! them to and from storage rows at the persistence boundary.

mod cursor;
mod ids;
mod message;
mod participant;
mod summary;

pub use cursor::{HistoryCursor, HistoryPage};
pub use ids::{ConversationId, MessageId, SequenceName, UserId};
pub use message::Message;
pub use participant::ConversationParticipant;
pub use summary::ConversationSummary;
