//! Delete-with-confirmation flow.

use std::sync::Arc;

use shared::domain::Book;
use tracing::{info, warn};

use crate::{error::ClientError, store::CollectionStore, BookApi};

pub struct DeletionFlow {
    api: Arc<dyn BookApi>,
    store: Arc<CollectionStore>,
    target: Option<Book>,
    last_error: Option<String>,
}

impl DeletionFlow {
    pub fn new(api: Arc<dyn BookApi>, store: Arc<CollectionStore>) -> Self {
        Self {
            api,
            store,
            target: None,
            last_error: None,
        }
    }

    /// Selects `book` for deletion, replacing any previous selection.
    pub fn arm(&mut self, book: Book) {
        info!(id = %book.id, title = %book.title, "delete armed");
        self.target = Some(book);
        self.last_error = None;
    }

    pub fn cancel(&mut self) {
        if let Some(book) = self.target.take() {
            info!(id = %book.id, "delete cancelled");
        }
        self.last_error = None;
    }

    pub fn is_armed(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<&Book> {
        self.target.as_ref()
    }

    /// Message from the last failed confirmation, cleared on re-arm or cancel.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Deletes the armed book, then disarms and refreshes the collection.
    ///
    /// On failure the flow stays armed so the user can retry or cancel.
    pub async fn confirm(&mut self) -> Result<(), ClientError> {
        let id = self.target.as_ref().ok_or(ClientError::NotArmed)?.id.clone();
        self.last_error = None;

        if let Err(err) = self.api.delete_book(&id).await {
            warn!(%id, error = %err, "delete failed");
            self.last_error = Some(err.user_message());
            return Err(err.into());
        }

        info!(%id, "book deleted");
        self.target = None;
        self.store.refresh().await;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/deletion_tests.rs"]
mod tests;
