use std::sync::Arc;

use super::*;
use crate::{
    error::Operation,
    test_support::{book, status_error, FakeLibrary},
};

fn store_over(fake: &Arc<FakeLibrary>) -> CollectionStore {
    CollectionStore::new(Arc::clone(fake) as Arc<dyn BookApi>)
}

#[test]
fn starts_empty_and_loading() {
    let store = store_over(&Arc::new(FakeLibrary::default()));
    let state = store.snapshot();
    assert!(state.items.is_empty());
    assert!(state.is_loading);
    assert_eq!(state.error_message, None);
}

#[tokio::test]
async fn refresh_replaces_items_in_server_order() {
    let fake = Arc::new(FakeLibrary::with_books(vec![
        book(2, "Zebra"),
        book(1, "Aardvark"),
    ]));
    let store = store_over(&fake);

    store.refresh().await;

    let state = store.snapshot();
    let titles: Vec<_> = state.items.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, ["Zebra", "Aardvark"]);
    assert!(!state.is_loading);
    assert_eq!(state.error_message, None);
    assert_eq!(fake.list_calls(), 1);
}

#[tokio::test]
async fn failed_refresh_keeps_items_and_sets_message() {
    let fake = Arc::new(FakeLibrary::with_books(vec![book(1, "Dune")]));
    let store = store_over(&fake);
    store.refresh().await;

    fake.script_list(Err(status_error(Operation::ListBooks, 500)))
        .await;
    store.refresh().await;

    let state = store.snapshot();
    assert_eq!(state.items, vec![book(1, "Dune")]);
    assert!(!state.is_loading);
    assert_eq!(state.error_message.as_deref(), Some("Failed to fetch books."));
}

#[tokio::test]
async fn next_refresh_clears_previous_error_immediately() {
    let fake = Arc::new(FakeLibrary::default());
    let store = store_over(&fake);
    fake.script_list(Err(status_error(Operation::ListBooks, 503)))
        .await;
    store.refresh().await;
    assert!(store.snapshot().error_message.is_some());

    let release = fake.script_gated_list(Ok(vec![book(4, "Emma")])).await;
    let mut pending = Box::pin(store.refresh());
    assert!(futures::poll!(&mut pending).is_pending());

    let state = store.snapshot();
    assert!(state.is_loading);
    assert_eq!(state.error_message, None);

    release.send(()).expect("release list");
    pending.await;
    assert_eq!(store.snapshot().items, vec![book(4, "Emma")]);
}

#[tokio::test]
async fn is_loading_only_while_list_is_in_flight() {
    let fake = Arc::new(FakeLibrary::default());
    let store = store_over(&fake);
    store.refresh().await;
    assert!(!store.snapshot().is_loading);

    let release = fake.script_gated_list(Ok(vec![book(1, "Dune")])).await;
    let mut pending = Box::pin(store.refresh());
    assert!(futures::poll!(&mut pending).is_pending());
    assert!(store.snapshot().is_loading);

    release.send(()).expect("release list");
    pending.await;
    assert!(!store.snapshot().is_loading);
}

#[tokio::test]
async fn superseded_refresh_result_is_discarded() {
    let fake = Arc::new(FakeLibrary::default());
    let store = store_over(&fake);

    let release_first = fake.script_gated_list(Ok(vec![book(1, "Stale")])).await;
    let release_second = fake.script_gated_list(Ok(vec![book(2, "Fresh")])).await;

    let mut first = Box::pin(store.refresh());
    let mut second = Box::pin(store.refresh());
    assert!(futures::poll!(&mut first).is_pending());
    assert!(futures::poll!(&mut second).is_pending());

    release_second.send(()).expect("release second");
    second.await;
    assert_eq!(store.snapshot().items, vec![book(2, "Fresh")]);
    assert!(!store.snapshot().is_loading);

    release_first.send(()).expect("release first");
    first.await;
    let state = store.snapshot();
    assert_eq!(state.items, vec![book(2, "Fresh")]);
    assert!(!state.is_loading);
}

#[tokio::test]
async fn older_refresh_finishing_first_leaves_loading_set() {
    let fake = Arc::new(FakeLibrary::default());
    let store = store_over(&fake);

    let release_first = fake.script_gated_list(Ok(vec![book(1, "Stale")])).await;
    let release_second = fake.script_gated_list(Ok(vec![book(2, "Fresh")])).await;

    let mut first = Box::pin(store.refresh());
    let mut second = Box::pin(store.refresh());
    assert!(futures::poll!(&mut first).is_pending());
    assert!(futures::poll!(&mut second).is_pending());

    release_first.send(()).expect("release first");
    first.await;
    let state = store.snapshot();
    assert!(state.items.is_empty());
    assert!(state.is_loading);

    release_second.send(()).expect("release second");
    second.await;
    assert_eq!(store.snapshot().items, vec![book(2, "Fresh")]);
    assert!(!store.snapshot().is_loading);
}

#[tokio::test]
async fn subscribers_see_refreshed_state() {
    let fake = Arc::new(FakeLibrary::with_books(vec![book(9, "Ulysses")]));
    let store = store_over(&fake);
    let mut rx = store.subscribe();

    store.refresh().await;

    assert!(rx.has_changed().expect("sender alive"));
    assert_eq!(rx.borrow_and_update().items, vec![book(9, "Ulysses")]);
}
