//! Tests for the domain types: identifiers, cursors, summaries, and the
//! error taxonomy.

use super::fixtures::{make_message, ts};
use crate::chat::{
    domain::{ConversationId, HistoryCursor, HistoryPage, MessageId, SequenceName, UserId},
    domain::{ConversationParticipant, ConversationSummary},
    error::StorageError,
};

#[test]
fn identifier_newtypes_round_trip_their_values() {
    assert_eq!(ConversationId::new(7).value(), 7);
    assert_eq!(MessageId::from(9).value(), 9);
    assert_eq!(UserId::new(11).to_string(), "11");
}

#[test]
fn well_known_sequence_names_match_the_counter_rows() {
    assert_eq!(SequenceName::conversations().as_str(), "conversation_id");
    assert_eq!(SequenceName::messages().as_str(), "message_id");
    assert_eq!(SequenceName::new("receipts").to_string(), "receipts");
}

#[test]
fn message_ids_order_by_allocation() {
    assert!(MessageId::new(2) > MessageId::new(1));
}

#[test]
fn cursor_admits_only_strictly_older_positions() {
    let anchor = make_message(1, 5, ts(100), 1, 2, "anchor");
    let cursor = HistoryCursor::after(&anchor);

    let older = make_message(1, 9, ts(50), 1, 2, "older");
    let same_instant_earlier_send = make_message(1, 4, ts(100), 1, 2, "tie, earlier");
    let same_instant_later_send = make_message(1, 6, ts(100), 1, 2, "tie, later");
    let newer = make_message(1, 6, ts(150), 1, 2, "newer");

    assert!(cursor.admits(&older));
    assert!(cursor.admits(&same_instant_earlier_send));
    assert!(!cursor.admits(&same_instant_later_send));
    assert!(!cursor.admits(&newer));
    assert!(!cursor.admits(&anchor), "the anchor itself is excluded");
}

#[test]
fn final_or_empty_pages_yield_no_cursor() {
    assert!(HistoryPage::empty().next_cursor().is_none());

    let final_page = HistoryPage {
        messages: vec![make_message(1, 1, ts(10), 1, 2, "only")],
        has_more: false,
    };
    assert!(final_page.next_cursor().is_none());
}

#[test]
fn next_cursor_resumes_after_the_last_returned_message() {
    let last = make_message(1, 3, ts(30), 1, 2, "last on page");
    let page = HistoryPage {
        messages: vec![make_message(1, 4, ts(40), 1, 2, "first on page"), last.clone()],
        has_more: true,
    };

    let cursor = page.next_cursor().expect("cursor");
    assert_eq!(cursor, HistoryCursor::after(&last));
}

#[test]
fn summary_reflects_the_message_it_was_built_from() {
    let message = make_message(3, 8, ts(60), 5, 6, "latest");
    let summary = ConversationSummary::of(&message);

    assert_eq!(summary.conversation_id, message.conversation_id);
    assert_eq!(summary.last_timestamp, message.timestamp);
    assert_eq!(summary.last_message, "latest");
}

#[test]
fn mirrored_membership_swaps_the_direction_only() {
    let row = ConversationParticipant {
        conversation_id: ConversationId::new(1),
        sender_id: UserId::new(5),
        receiver_id: UserId::new(6),
        last_timestamp: ts(10),
    };
    let mirror = row.mirrored();

    assert_eq!(mirror.sender_id, row.receiver_id);
    assert_eq!(mirror.receiver_id, row.sender_id);
    assert_eq!(mirror.conversation_id, row.conversation_id);
    assert_eq!(mirror.last_timestamp, row.last_timestamp);
    assert_eq!(mirror.mirrored(), row);
}

#[test]
fn wire_facing_types_serialise_transparently() {
    let message = make_message(42, 7, ts(30), 1, 2, "over the wire");
    let encoded = serde_json::to_value(&message).expect("encode");

    // Identifier newtypes serialise as bare integers.
    assert_eq!(encoded["conversation_id"], 42);
    assert_eq!(encoded["message_id"], 7);

    let decoded: crate::chat::domain::Message =
        serde_json::from_value(encoded).expect("decode");
    assert_eq!(decoded, message);

    let cursor = HistoryCursor::after(&message);
    let round_tripped: HistoryCursor =
        serde_json::from_str(&serde_json::to_string(&cursor).expect("encode")).expect("decode");
    assert_eq!(round_tripped, cursor);
}

#[test]
fn retryability_follows_the_error_taxonomy() {
    assert!(StorageError::unavailable("quorum lost").is_retryable());
    assert!(!StorageError::NotFound(ConversationId::new(1)).is_retryable());
    assert!(!StorageError::invalid_argument("bad limit").is_retryable());

    let partial = StorageError::PartialWrite {
        conversation_id: ConversationId::new(1),
        message_id: MessageId::new(2),
        stage: "recent-chats index",
        source: Box::new(StorageError::unavailable("quorum lost")),
    };
    assert!(partial.is_retryable());
    let rendered = partial.to_string();
    assert!(rendered.contains("recent-chats index"), "{rendered}");
}
