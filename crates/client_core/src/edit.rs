//! Edit-with-save flow and the draft it edits.

use std::sync::Arc;

use shared::domain::{Book, BookId};
use tracing::{debug, info, warn};

use crate::{
    error::{ClientError, EditableField, ValidationError},
    store::CollectionStore,
    BookApi,
};

/// In-progress copy of a book's editable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub genre: String,
    /// `None` while the typed page count is not an integer.
    pub page_count: Option<i64>,
    pub description: String,
    pub read: bool,
}

impl From<&Book> for BookDraft {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            genre: book.genre.clone(),
            page_count: Some(book.page_count),
            description: book.description.clone(),
            read: book.read,
        }
    }
}

impl BookDraft {
    pub fn apply(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Title(value) => self.title = value,
            FieldUpdate::Author(value) => self.author = value,
            FieldUpdate::Genre(value) => self.genre = value,
            FieldUpdate::PageCount(raw) => self.page_count = raw.trim().parse().ok(),
            FieldUpdate::Description(value) => self.description = value,
            FieldUpdate::Read(value) => self.read = value,
        }
    }

    /// Fields that keep the draft from being saved, in form order.
    pub fn invalid_fields(&self) -> Vec<EditableField> {
        EditableField::ALL
            .into_iter()
            .filter(|field| match field {
                EditableField::Title => is_blank(&self.title),
                EditableField::Author => is_blank(&self.author),
                EditableField::Genre => is_blank(&self.genre),
                EditableField::PageCount => !self.page_count.is_some_and(|count| count > 0),
                EditableField::Description => is_blank(&self.description),
            })
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let invalid = self.invalid_fields();
        if invalid.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::InvalidFields(invalid))
        }
    }

    /// Full record for the update request. Call after [`BookDraft::validate`].
    pub fn to_book(&self, id: BookId) -> Book {
        Book {
            id,
            title: self.title.clone(),
            author: self.author.clone(),
            genre: self.genre.clone(),
            page_count: self.page_count.unwrap_or_default(),
            description: self.description.clone(),
            read: self.read,
        }
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// One edit to a draft field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Title(String),
    Author(String),
    Genre(String),
    /// Raw input; coerced to an integer when applied.
    PageCount(String),
    Description(String),
    Read(bool),
}

impl FieldUpdate {
    /// Builds an update from a wire field name and raw text input.
    pub fn parse(name: &str, raw: &str) -> Result<Self, ValidationError> {
        let raw = raw.to_string();
        match name {
            "title" => Ok(FieldUpdate::Title(raw)),
            "author" => Ok(FieldUpdate::Author(raw)),
            "genre" => Ok(FieldUpdate::Genre(raw)),
            "pageCount" => Ok(FieldUpdate::PageCount(raw)),
            "description" => Ok(FieldUpdate::Description(raw)),
            "read" => Ok(FieldUpdate::Read(parse_flag(&raw))),
            other => Err(ValidationError::UnknownField(other.to_string())),
        }
    }

    pub fn field(&self) -> Option<EditableField> {
        match self {
            FieldUpdate::Title(_) => Some(EditableField::Title),
            FieldUpdate::Author(_) => Some(EditableField::Author),
            FieldUpdate::Genre(_) => Some(EditableField::Genre),
            FieldUpdate::PageCount(_) => Some(EditableField::PageCount),
            FieldUpdate::Description(_) => Some(EditableField::Description),
            FieldUpdate::Read(_) => None,
        }
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on" | "y"
    )
}

pub struct EditFlow {
    api: Arc<dyn BookApi>,
    store: Arc<CollectionStore>,
    target: Option<Book>,
    draft: Option<BookDraft>,
    invalid: Vec<EditableField>,
    last_error: Option<String>,
}

impl EditFlow {
    pub fn new(api: Arc<dyn BookApi>, store: Arc<CollectionStore>) -> Self {
        Self {
            api,
            store,
            target: None,
            draft: None,
            invalid: Vec::new(),
            last_error: None,
        }
    }

    /// Selects `book` for editing; any unsaved draft is discarded.
    pub fn arm(&mut self, book: Book) {
        info!(id = %book.id, title = %book.title, "edit armed");
        self.draft = Some(BookDraft::from(&book));
        self.target = Some(book);
        self.invalid.clear();
        self.last_error = None;
    }

    pub fn cancel(&mut self) {
        if let Some(book) = self.target.take() {
            info!(id = %book.id, "edit cancelled");
        }
        self.draft = None;
        self.invalid.clear();
        self.last_error = None;
    }

    pub fn is_armed(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<&Book> {
        self.target.as_ref()
    }

    pub fn draft(&self) -> Option<&BookDraft> {
        self.draft.as_ref()
    }

    /// Fields flagged by the last rejected save.
    pub fn invalid_fields(&self) -> &[EditableField] {
        &self.invalid
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn update_field(&mut self, update: FieldUpdate) -> Result<(), ClientError> {
        let draft = self.draft.as_mut().ok_or(ClientError::NotArmed)?;
        debug!(?update, "draft field updated");
        if let Some(field) = update.field() {
            self.invalid.retain(|invalid| *invalid != field);
        }
        draft.apply(update);
        Ok(())
    }

    /// Validates the draft, sends it, then disarms and refreshes the collection.
    ///
    /// A draft that fails validation never reaches the network; the flow stays
    /// armed with the offending fields marked. A failed request also keeps the
    /// flow armed.
    pub async fn save(&mut self) -> Result<(), ClientError> {
        let (Some(target), Some(draft)) = (self.target.as_ref(), self.draft.as_ref()) else {
            return Err(ClientError::NotArmed);
        };

        if let Err(err) = draft.validate() {
            info!(id = %target.id, error = %err, "edit rejected by validation");
            self.invalid = err.fields().to_vec();
            self.last_error = None;
            return Err(err.into());
        }
        self.invalid.clear();
        self.last_error = None;

        let book = draft.to_book(target.id.clone());
        if let Err(err) = self.api.update_book(&book).await {
            warn!(id = %book.id, error = %err, "update failed");
            self.last_error = Some(err.user_message());
            return Err(err.into());
        }

        info!(id = %book.id, "book updated");
        self.target = None;
        self.draft = None;
        self.store.refresh().await;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/edit_tests.rs"]
mod tests;
