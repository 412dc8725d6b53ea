//! Composition of the store and both flows behind the view callbacks.

use std::sync::Arc;

use shared::domain::Book;
use tokio::sync::watch;

use crate::{
    deletion::DeletionFlow,
    edit::{EditFlow, FieldUpdate},
    error::ClientError,
    screen::{
        CollectionView, DeleteDialog, EditDialog, LibraryScreen, EMPTY_MESSAGE, HEADING,
        PLACEHOLDER_COUNT,
    },
    store::{CollectionState, CollectionStore},
    BookApi,
};

pub struct LibraryController {
    store: Arc<CollectionStore>,
    deletion: DeletionFlow,
    edit: EditFlow,
}

impl LibraryController {
    pub fn new(api: Arc<dyn BookApi>) -> Self {
        let store = Arc::new(CollectionStore::new(Arc::clone(&api)));
        Self {
            deletion: DeletionFlow::new(Arc::clone(&api), Arc::clone(&store)),
            edit: EditFlow::new(api, Arc::clone(&store)),
            store,
        }
    }

    pub fn store(&self) -> &Arc<CollectionStore> {
        &self.store
    }

    pub fn deletion(&self) -> &DeletionFlow {
        &self.deletion
    }

    pub fn edit(&self) -> &EditFlow {
        &self.edit
    }

    pub fn subscribe(&self) -> watch::Receiver<CollectionState> {
        self.store.subscribe()
    }

    /// Initial load when the view appears.
    pub async fn mount(&self) {
        self.store.refresh().await;
    }

    pub fn on_delete(&mut self, book: Book) {
        self.deletion.arm(book);
    }

    pub fn on_edit(&mut self, book: Book) {
        self.edit.arm(book);
    }

    pub async fn on_confirm_delete(&mut self) -> Result<(), ClientError> {
        self.deletion.confirm().await
    }

    pub fn on_close_delete(&mut self) {
        self.deletion.cancel();
    }

    pub fn on_field_change(&mut self, update: FieldUpdate) -> Result<(), ClientError> {
        self.edit.update_field(update)
    }

    pub async fn on_save(&mut self) -> Result<(), ClientError> {
        self.edit.save().await
    }

    pub fn on_close_edit(&mut self) {
        self.edit.cancel();
    }

    pub fn render(&self) -> LibraryScreen {
        let state = self.store.snapshot();
        let collection = if state.is_loading {
            CollectionView::Loading {
                placeholders: PLACEHOLDER_COUNT,
            }
        } else if state.items.is_empty() {
            CollectionView::Empty {
                message: EMPTY_MESSAGE,
            }
        } else {
            CollectionView::Cards(state.items)
        };

        let delete_dialog = self.deletion.target().map(|book| DeleteDialog {
            book: book.clone(),
            error: self.deletion.last_error().map(str::to_string),
        });

        let edit_dialog = match (self.edit.target(), self.edit.draft()) {
            (Some(book), Some(draft)) => Some(EditDialog {
                book: book.clone(),
                draft: draft.clone(),
                invalid_fields: self.edit.invalid_fields().to_vec(),
                error: self.edit.last_error().map(str::to_string),
            }),
            _ => None,
        };

        LibraryScreen {
            heading: HEADING,
            error_banner: state.error_message,
            collection,
            delete_dialog,
            edit_dialog,
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
