//! Authoritative local copy of the book collection.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use shared::domain::Book;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::BookApi;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionState {
    /// Books in server response order.
    pub items: Vec<Book>,
    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl Default for CollectionState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            is_loading: true,
            error_message: None,
        }
    }
}

/// Holds the collection and re-synchronizes it from the book service.
///
/// State is only written by [`CollectionStore::refresh`]. Overlapping
/// refreshes are sequenced by ticket: results of a refresh that was superseded
/// before it resolved are dropped, so the latest call always decides the
/// final state.
pub struct CollectionStore {
    api: Arc<dyn BookApi>,
    state: watch::Sender<CollectionState>,
    latest_ticket: AtomicU64,
}

impl CollectionStore {
    pub fn new(api: Arc<dyn BookApi>) -> Self {
        let (state, _) = watch::channel(CollectionState::default());
        Self {
            api,
            state,
            latest_ticket: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> CollectionState {
        self.state.borrow().clone()
    }

    /// Receiver notified after every state change, for re-rendering.
    pub fn subscribe(&self) -> watch::Receiver<CollectionState> {
        self.state.subscribe()
    }

    pub async fn refresh(&self) {
        let ticket = self.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|state| {
            state.is_loading = true;
            state.error_message = None;
        });
        debug!(ticket, "refreshing book collection");

        let outcome = match self.api.list_books().await {
            Ok(books) => Ok(books),
            Err(err) => {
                warn!(ticket, error = %err, "book collection refresh failed");
                Err(err.user_message())
            }
        };

        let applied = self.state.send_if_modified(|state| {
            if self.latest_ticket.load(Ordering::SeqCst) != ticket {
                return false;
            }
            match outcome {
                Ok(books) => state.items = books,
                Err(message) => state.error_message = Some(message),
            }
            state.is_loading = false;
            true
        });

        if applied {
            info!(ticket, count = self.state.borrow().items.len(), "refresh applied");
        } else {
            debug!(ticket, "discarding superseded refresh result");
        }
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
