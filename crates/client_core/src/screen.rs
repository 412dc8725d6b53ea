//! Render model handed to the presentation layer.

use shared::domain::Book;

use crate::{edit::BookDraft, error::EditableField};

pub const HEADING: &str = "My Book Library";
pub const PLACEHOLDER_COUNT: usize = 4;
pub const EMPTY_MESSAGE: &str = "No books found.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionView {
    Loading { placeholders: usize },
    Empty { message: &'static str },
    Cards(Vec<Book>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteDialog {
    pub book: Book,
    pub error: Option<String>,
}

impl DeleteDialog {
    pub fn prompt(&self) -> String {
        format!("Are you sure you want to delete {}?", self.book.title)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDialog {
    pub book: Book,
    pub draft: BookDraft,
    pub invalid_fields: Vec<EditableField>,
    pub error: Option<String>,
}

impl EditDialog {
    pub fn is_marked(&self, field: EditableField) -> bool {
        self.invalid_fields.contains(&field)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryScreen {
    pub heading: &'static str,
    pub error_banner: Option<String>,
    pub collection: CollectionView,
    pub delete_dialog: Option<DeleteDialog>,
    pub edit_dialog: Option<EditDialog>,
}
