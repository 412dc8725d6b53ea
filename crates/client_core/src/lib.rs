use async_trait::async_trait;
use shared::domain::{Book, BookId};

pub mod controller;
pub mod deletion;
pub mod edit;
pub mod error;
pub mod screen;
pub mod store;
pub mod transport;

pub use controller::LibraryController;
pub use deletion::DeletionFlow;
pub use edit::{BookDraft, EditFlow, FieldUpdate};
pub use error::{ClientError, EditableField, NetworkError, Operation, ValidationError};
pub use screen::{CollectionView, DeleteDialog, EditDialog, LibraryScreen};
pub use store::{CollectionState, CollectionStore};
pub use transport::HttpBookClient;

/// Request/response contract of the remote book service.
#[async_trait]
pub trait BookApi: Send + Sync {
    async fn list_books(&self) -> Result<Vec<Book>, NetworkError>;
    async fn delete_book(&self, id: &BookId) -> Result<(), NetworkError>;
    /// Replaces the stored record matching `book.id` with every field of `book`.
    async fn update_book(&self, book: &Book) -> Result<(), NetworkError>;
}

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
