//! Tests for the send-message fan-out and the read-path sequencing.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::mock;
use rstest::{fixture, rstest};

use super::fixtures::{SteppingClock, ts};
use crate::chat::{
    adapters::memory::{
        InMemoryConversationDirectory, InMemoryIdAllocator, InMemoryMessageStore,
        InMemoryRecentChatsIndex,
    },
    domain::{ConversationId, ConversationSummary, UserId},
    error::{StorageError, StorageResult},
    ports::{ConversationDirectory, IdAllocator, MessageStore, RecentChatsIndex},
    services::ChatService,
};

mock! {
    RecentIndex {}

    #[async_trait]
    impl RecentChatsIndex for RecentIndex {
        async fn upsert_latest(&self, summary: &ConversationSummary) -> StorageResult<()>;
        async fn get_summary(
            &self,
            conversation_id: ConversationId,
        ) -> StorageResult<ConversationSummary>;
    }
}

struct Components {
    allocator: Arc<InMemoryIdAllocator>,
    store: Arc<InMemoryMessageStore>,
    recent: Arc<InMemoryRecentChatsIndex>,
    directory: Arc<InMemoryConversationDirectory>,
}

impl Components {
    fn service(&self) -> ChatService {
        ChatService::new(
            Arc::clone(&self.allocator) as Arc<dyn IdAllocator>,
            Arc::clone(&self.store) as Arc<dyn MessageStore>,
            Arc::clone(&self.recent) as Arc<dyn RecentChatsIndex>,
            Arc::clone(&self.directory) as Arc<dyn ConversationDirectory>,
            Arc::new(SteppingClock::starting_at(ts(0))),
        )
    }
}

#[fixture]
fn components() -> Components {
    Components {
        allocator: Arc::new(InMemoryIdAllocator::new()),
        store: Arc::new(InMemoryMessageStore::new()),
        recent: Arc::new(InMemoryRecentChatsIndex::new()),
        directory: Arc::new(InMemoryConversationDirectory::new()),
    }
}

#[rstest]
#[tokio::test]
async fn first_message_lazily_creates_every_entity(components: Components) {
    let service = components.service();
    let alice = UserId::new(1);
    let bob = UserId::new(2);

    let message = service
        .send_message(alice, bob, "hello bob")
        .await
        .expect("send");

    assert_eq!(message.conversation_id.value(), 1);
    assert_eq!(message.message_id.value(), 1);
    assert_eq!(message.sender_id, alice);
    assert_eq!(message.receiver_id, bob);

    // Message store holds the row.
    assert_eq!(components.store.partition_len(message.conversation_id), 1);

    // Recent-chats index reflects it.
    let summary = components
        .recent
        .get_summary(message.conversation_id)
        .await
        .expect("summary");
    assert_eq!(summary.last_message, "hello bob");
    assert_eq!(summary.last_timestamp, message.timestamp);

    // Directory knows both participants.
    assert_eq!(
        components
            .directory
            .find_between(bob, alice)
            .await
            .expect("lookup"),
        Some(message.conversation_id)
    );
}

#[rstest]
#[tokio::test]
async fn replies_reuse_the_existing_conversation(components: Components) {
    let service = components.service();
    let alice = UserId::new(1);
    let bob = UserId::new(2);

    let first = service.send_message(alice, bob, "ping").await.expect("send");
    let reply = service.send_message(bob, alice, "pong").await.expect("reply");

    assert_eq!(first.conversation_id, reply.conversation_id);
    assert!(reply.message_id > first.message_id);
    assert_eq!(components.store.partition_len(first.conversation_id), 2);

    let summary = components
        .recent
        .get_summary(first.conversation_id)
        .await
        .expect("summary");
    assert_eq!(summary.last_message, "pong");
}

#[rstest]
#[tokio::test]
async fn distinct_pairs_get_distinct_conversations(components: Components) {
    let service = components.service();
    let alice = UserId::new(1);

    let to_bob = service
        .send_message(alice, UserId::new(2), "hi bob")
        .await
        .expect("send");
    let to_carol = service
        .send_message(alice, UserId::new(3), "hi carol")
        .await
        .expect("send");

    assert_ne!(to_bob.conversation_id, to_carol.conversation_id);

    let listed = components
        .directory
        .list_by_sender(alice)
        .await
        .expect("list");
    assert_eq!(listed.len(), 2);
}

#[rstest]
#[tokio::test]
async fn empty_content_is_rejected_before_any_write(components: Components) {
    let service = components.service();

    let err = service
        .send_message(UserId::new(1), UserId::new(2), "")
        .await
        .expect_err("empty content");

    assert!(matches!(err, StorageError::InvalidArgument(_)));
    assert_eq!(components.allocator.current(&crate::chat::domain::SequenceName::messages()), 0);
    assert!(components.recent.is_empty());
}

#[rstest]
#[tokio::test]
async fn history_of_an_unknown_conversation_is_not_found(components: Components) {
    let service = components.service();

    let err = service
        .conversation_history(ConversationId::new(404), None, 10)
        .await
        .expect_err("unknown conversation");

    assert!(matches!(err, StorageError::NotFound(_)));
}

#[rstest]
#[tokio::test]
async fn history_pages_through_a_conversation_newest_first(components: Components) {
    let service = components.service();
    let alice = UserId::new(1);
    let bob = UserId::new(2);

    for body in ["one", "two", "three"] {
        service.send_message(alice, bob, body).await.expect("send");
    }

    let conversation = components
        .directory
        .find_between(alice, bob)
        .await
        .expect("lookup")
        .expect("conversation exists");

    let first_page = service
        .conversation_history(conversation, None, 2)
        .await
        .expect("first page");
    let bodies: Vec<&str> = first_page.messages.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(bodies, vec!["three", "two"]);
    assert!(first_page.has_more);

    let rest = service
        .conversation_history(conversation, first_page.next_cursor(), 2)
        .await
        .expect("second page");
    let rest_bodies: Vec<&str> = rest.messages.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(rest_bodies, vec!["one"]);
    assert!(!rest.has_more);
}

#[rstest]
#[tokio::test]
async fn recent_chats_lists_summaries_most_recently_active_first(components: Components) {
    let service = components.service();
    let alice = UserId::new(1);

    service
        .send_message(alice, UserId::new(2), "hi bob")
        .await
        .expect("send");
    service
        .send_message(alice, UserId::new(3), "hi carol")
        .await
        .expect("send");
    service
        .send_message(UserId::new(2), alice, "hello again")
        .await
        .expect("reply");

    let chats = service.recent_chats(alice).await.expect("recent chats");
    let last_messages: Vec<&str> = chats.iter().map(|s| s.last_message.as_str()).collect();
    assert_eq!(last_messages, vec!["hello again", "hi carol"]);
}

#[rstest]
#[tokio::test]
async fn index_failure_after_append_surfaces_as_partial_write(components: Components) {
    let mut failing_index = MockRecentIndex::new();
    failing_index
        .expect_upsert_latest()
        .returning(|_| Err(StorageError::unavailable("index quorum lost")));

    let degraded = ChatService::new(
        Arc::clone(&components.allocator) as Arc<dyn IdAllocator>,
        Arc::clone(&components.store) as Arc<dyn MessageStore>,
        Arc::new(failing_index),
        Arc::clone(&components.directory) as Arc<dyn ConversationDirectory>,
        Arc::new(SteppingClock::starting_at(ts(0))),
    );

    let err = degraded
        .send_message(UserId::new(1), UserId::new(2), "durable anyway")
        .await
        .expect_err("fan-out must stall");

    let StorageError::PartialWrite {
        conversation_id,
        stage,
        ..
    } = err
    else {
        panic!("expected PartialWrite, got {err}");
    };
    assert_eq!(stage, "recent-chats index");

    // The append landed before the fan-out stalled.
    assert_eq!(components.store.partition_len(conversation_id), 1);

    // Recover the durable message and complete the fan-out against a
    // healthy index; both updates are idempotent overwrites.
    let page = components
        .store
        .fetch_history(conversation_id, None, 1)
        .await
        .expect("fetch durable message");
    let message = page.messages.first().expect("one message");

    let healthy = components.service();
    healthy.complete_fan_out(message).await.expect("fan-out retry");

    let summary = components
        .recent
        .get_summary(conversation_id)
        .await
        .expect("summary now present");
    assert_eq!(summary.last_message, "durable anyway");
}
