//! Tests for the in-memory ID allocator: monotonicity and uniqueness
//! under concurrency.

use std::collections::HashSet;
use std::sync::Arc;

use rstest::{fixture, rstest};

use crate::chat::{
    adapters::memory::InMemoryIdAllocator,
    domain::SequenceName,
    ports::IdAllocator,
};

#[fixture]
fn allocator() -> InMemoryIdAllocator {
    InMemoryIdAllocator::new()
}

#[rstest]
#[tokio::test]
async fn first_value_of_a_fresh_sequence_is_one(allocator: InMemoryIdAllocator) {
    let id = allocator
        .next_id(&SequenceName::messages())
        .await
        .expect("increment");
    assert_eq!(id, 1);
}

#[rstest]
#[tokio::test]
async fn values_are_strictly_increasing(allocator: InMemoryIdAllocator) {
    let sequence = SequenceName::messages();
    let mut previous = 0;
    for _ in 0..100 {
        let id = allocator.next_id(&sequence).await.expect("increment");
        assert!(id > previous, "{id} must exceed {previous}");
        previous = id;
    }
}

#[rstest]
#[tokio::test]
async fn sequences_are_independent(allocator: InMemoryIdAllocator) {
    for _ in 0..5 {
        allocator
            .next_id(&SequenceName::conversations())
            .await
            .expect("increment");
    }

    let message_id = allocator
        .next_id(&SequenceName::messages())
        .await
        .expect("increment");

    assert_eq!(message_id, 1);
    assert_eq!(allocator.current(&SequenceName::conversations()), 5);
}

#[rstest]
#[tokio::test]
async fn current_reflects_last_issued_value(allocator: InMemoryIdAllocator) {
    let sequence = SequenceName::new("attachments");
    assert_eq!(allocator.current(&sequence), 0);

    let issued = allocator.next_id(&sequence).await.expect("increment");
    assert_eq!(allocator.current(&sequence), issued);
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_callers_never_observe_duplicates() {
    const CALLERS: usize = 8;
    const IDS_PER_CALLER: usize = 64;

    let allocator = Arc::new(InMemoryIdAllocator::new());
    let mut handles = Vec::with_capacity(CALLERS);

    for _ in 0..CALLERS {
        let allocator = Arc::clone(&allocator);
        handles.push(tokio::spawn(async move {
            let sequence = SequenceName::messages();
            let mut issued = Vec::with_capacity(IDS_PER_CALLER);
            for _ in 0..IDS_PER_CALLER {
                issued.push(allocator.next_id(&sequence).await.expect("increment"));
            }
            issued
        }));
    }

    let mut all = HashSet::new();
    for handle in handles {
        for id in handle.await.expect("task join") {
            assert!(all.insert(id), "duplicate identifier {id}");
        }
    }

    assert_eq!(all.len(), CALLERS * IDS_PER_CALLER);
    assert_eq!(
        allocator.current(&SequenceName::messages()),
        i64::try_from(CALLERS * IDS_PER_CALLER).expect("fits in i64"),
    );
}
