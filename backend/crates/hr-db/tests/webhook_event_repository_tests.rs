mod common;

use common::{create_test_event, create_test_pool, tenant};

use hr_db::{EventStore, WebhookEventRepository};

use std::sync::Arc;

use googletest::prelude::*;

#[tokio::test]
async fn given_captured_event_when_created_then_assigned_id_and_fields_preserved() {
    // Given
    let pool = create_test_pool().await;
    let repo = WebhookEventRepository::new(pool);
    let event = create_test_event("acme", r#"{"a":1}"#);

    // When
    let stored = repo.create(&event).await.unwrap();

    // Then
    assert_that!(stored.id, gt(0));
    assert_that!(stored.tenant_id.as_str(), eq("acme"));
    assert_that!(stored.method.as_str(), eq("POST"));
    assert_that!(stored.url.as_str(), eq("/hooks/github?delivery=1"));
    assert_that!(stored.body_text().as_str(), eq(r#"{"a":1}"#));
}

#[tokio::test]
async fn given_stored_events_when_finding_by_tenant_then_returned_oldest_first() {
    // Given
    let pool = create_test_pool().await;
    let repo = WebhookEventRepository::new(pool);
    let first = repo.create(&create_test_event("acme", "one")).await.unwrap();
    let second = repo.create(&create_test_event("acme", "two")).await.unwrap();

    // When
    let events = repo.find_by_tenant(&tenant("acme")).await.unwrap();

    // Then
    assert_that!(events.len(), eq(2));
    assert_that!(events[0].id, eq(first.id));
    assert_that!(events[1].id, eq(second.id));
    assert_that!(events[1].body_text().as_str(), eq("two"));
}

#[tokio::test]
async fn given_round_tripped_event_when_read_back_then_timestamp_and_headers_match() {
    // Given
    let pool = create_test_pool().await;
    let repo = WebhookEventRepository::new(pool);
    let event = create_test_event("acme", "payload");

    // When
    repo.create(&event).await.unwrap();
    let events = repo.find_by_tenant(&tenant("acme")).await.unwrap();

    // Then
    assert_that!(
        events[0].captured_at.timestamp_millis(),
        eq(event.captured_at.timestamp_millis())
    );
    assert_that!(events[0].headers.as_str(), eq(event.headers.as_str()));
}

#[tokio::test]
async fn given_two_tenants_when_finding_by_tenant_then_only_own_events_returned() {
    // Given
    let pool = create_test_pool().await;
    let repo = WebhookEventRepository::new(pool);
    repo.create(&create_test_event("acme", "mine")).await.unwrap();
    repo.create(&create_test_event("beta", "theirs")).await.unwrap();

    // When
    let events = repo.find_by_tenant(&tenant("acme")).await.unwrap();

    // Then
    assert_that!(events.len(), eq(1));
    assert_that!(events[0].body_text().as_str(), eq("mine"));
}

#[tokio::test]
async fn given_no_events_when_finding_by_tenant_then_empty() {
    let pool = create_test_pool().await;
    let repo = WebhookEventRepository::new(pool);

    let events = repo.find_by_tenant(&tenant("ghost")).await.unwrap();

    assert!(events.is_empty());
}

#[tokio::test]
async fn given_events_for_two_tenants_when_deleting_one_then_other_untouched() {
    // Given
    let pool = create_test_pool().await;
    let repo = WebhookEventRepository::new(pool);
    repo.create(&create_test_event("acme", "1")).await.unwrap();
    repo.create(&create_test_event("acme", "2")).await.unwrap();
    repo.create(&create_test_event("beta", "3")).await.unwrap();

    // When
    let deleted = repo.delete_by_tenant(&tenant("acme")).await.unwrap();

    // Then
    assert_that!(deleted, eq(2));
    assert_that!(repo.count_by_tenant(&tenant("acme")).await.unwrap(), eq(0));
    assert_that!(repo.count_by_tenant(&tenant("beta")).await.unwrap(), eq(1));
}

#[tokio::test]
async fn given_binary_body_when_stored_then_bytes_preserved() {
    // Given
    let pool = create_test_pool().await;
    let repo = WebhookEventRepository::new(pool);
    let mut event = create_test_event("acme", "");
    event.body = vec![0xff, 0x00, 0xfe];

    // When
    repo.create(&event).await.unwrap();
    let events = repo.find_by_tenant(&tenant("acme")).await.unwrap();

    // Then
    assert_eq!(events[0].body, vec![0xff_u8, 0x00, 0xfe]);
}

#[tokio::test]
async fn given_store_as_trait_object_when_used_then_dispatches_to_sqlite() {
    // Given
    let pool = create_test_pool().await;
    let store: Arc<dyn EventStore> = Arc::new(WebhookEventRepository::new(pool));

    // When
    store.create(&create_test_event("acme", "x")).await.unwrap();

    // Then
    let events = store.find_by_tenant(&tenant("acme")).await.unwrap();
    assert_that!(events.len(), eq(1));
}
