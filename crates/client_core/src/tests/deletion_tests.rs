use std::sync::Arc;

use shared::domain::BookId;

use super::*;
use crate::test_support::{book, FakeLibrary};

fn flow_over(fake: &Arc<FakeLibrary>) -> (DeletionFlow, Arc<CollectionStore>) {
    let api = Arc::clone(fake) as Arc<dyn BookApi>;
    let store = Arc::new(CollectionStore::new(Arc::clone(&api)));
    (DeletionFlow::new(api, Arc::clone(&store)), store)
}

fn dune() -> Book {
    let mut dune = book(0, "Dune");
    dune.id = BookId::from("7");
    dune
}

#[tokio::test]
async fn confirm_deletes_disarms_and_refreshes_once() {
    let fake = Arc::new(FakeLibrary::with_books(vec![dune(), book(8, "Emma")]));
    let (mut flow, store) = flow_over(&fake);

    flow.arm(dune());
    assert!(flow.is_armed());
    flow.confirm().await.expect("confirm");

    assert!(!flow.is_armed());
    assert_eq!(fake.delete_calls(), 1);
    assert_eq!(fake.list_calls(), 1);
    let items = store.snapshot().items;
    assert!(items.iter().all(|b| b.id != BookId::from("7")));
    assert_eq!(items, vec![book(8, "Emma")]);
}

#[tokio::test]
async fn cancel_returns_to_idle_without_network() {
    let fake = Arc::new(FakeLibrary::with_books(vec![dune()]));
    let (mut flow, _store) = flow_over(&fake);

    flow.arm(dune());
    flow.cancel();

    assert!(!flow.is_armed());
    assert_eq!(flow.target(), None);
    assert_eq!(fake.network_calls(), 0);
}

#[tokio::test]
async fn arming_again_replaces_target() {
    let fake = Arc::new(FakeLibrary::with_books(vec![dune(), book(8, "Emma")]));
    let (mut flow, _store) = flow_over(&fake);

    flow.arm(dune());
    flow.arm(book(8, "Emma"));
    assert_eq!(flow.target(), Some(&book(8, "Emma")));

    flow.confirm().await.expect("confirm");
    assert_eq!(fake.books().await, vec![dune()]);
}

#[tokio::test]
async fn confirm_while_idle_is_rejected() {
    let fake = Arc::new(FakeLibrary::default());
    let (mut flow, _store) = flow_over(&fake);

    let err = flow.confirm().await.expect_err("idle confirm");
    assert!(matches!(err, ClientError::NotArmed));
    assert_eq!(fake.network_calls(), 0);
}

#[tokio::test]
async fn failed_delete_stays_armed_and_reports() {
    let fake = Arc::new(FakeLibrary::with_books(vec![dune()]));
    fake.fail_deletes_with(500).await;
    let (mut flow, _store) = flow_over(&fake);

    flow.arm(dune());
    let err = flow.confirm().await.expect_err("server failure");

    assert!(matches!(
        err,
        ClientError::Network(crate::error::NetworkError::Status { status: 500, .. })
    ));
    assert!(flow.is_armed());
    assert_eq!(
        flow.last_error(),
        Some("Failed to delete book (status 500).")
    );
    assert_eq!(fake.list_calls(), 0);

    flow.cancel();
    assert_eq!(flow.last_error(), None);
}
