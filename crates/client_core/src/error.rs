use std::fmt;

use thiserror::Error;

/// Remote call that produced a [`NetworkError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListBooks,
    DeleteBook,
    UpdateBook,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::ListBooks => "list books",
            Operation::DeleteBook => "delete book",
            Operation::UpdateBook => "update book",
        })
    }
}

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("{operation}: request failed: {source}")]
    Transport {
        operation: Operation,
        source: reqwest::Error,
    },
    #[error("{operation}: server responded with status {status}")]
    Status { operation: Operation, status: u16 },
    #[error("{operation}: invalid response body: {source}")]
    Decode {
        operation: Operation,
        source: reqwest::Error,
    },
    #[error("{operation}: invalid service url: {source}")]
    InvalidUrl {
        operation: Operation,
        source: url::ParseError,
    },
    #[error("{operation}: could not encode request: {source}")]
    Encode {
        operation: Operation,
        source: serde_json::Error,
    },
}

impl NetworkError {
    pub fn operation(&self) -> Operation {
        match self {
            NetworkError::Transport { operation, .. }
            | NetworkError::Status { operation, .. }
            | NetworkError::Decode { operation, .. }
            | NetworkError::InvalidUrl { operation, .. }
            | NetworkError::Encode { operation, .. } => *operation,
        }
    }

    /// Text suitable for the error banner or an inline dialog message.
    pub fn user_message(&self) -> String {
        match self {
            NetworkError::Status {
                operation: Operation::ListBooks,
                ..
            } => "Failed to fetch books.".to_string(),
            NetworkError::Status {
                operation: Operation::DeleteBook,
                status,
            } => format!("Failed to delete book (status {status})."),
            NetworkError::Status {
                operation: Operation::UpdateBook,
                status,
            } => format!("Failed to save book (status {status})."),
            NetworkError::Transport { source, .. }
                if source.is_connect() || source.is_timeout() =>
            {
                "Book service unreachable; check the library URL and retry.".to_string()
            }
            NetworkError::Transport { operation, .. } => {
                format!("Could not {operation}: network error.")
            }
            NetworkError::Decode { .. } => {
                "Book service returned data that could not be read.".to_string()
            }
            NetworkError::InvalidUrl { .. } => {
                "The library URL is not valid; check the configuration.".to_string()
            }
            NetworkError::Encode { .. } => "Book could not be prepared for saving.".to_string(),
        }
    }
}

/// Required field of the edit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EditableField {
    Title,
    Author,
    Genre,
    PageCount,
    Description,
}

impl EditableField {
    pub const ALL: [EditableField; 5] = [
        EditableField::Title,
        EditableField::Author,
        EditableField::Genre,
        EditableField::PageCount,
        EditableField::Description,
    ];

    pub fn wire_name(self) -> &'static str {
        match self {
            EditableField::Title => "title",
            EditableField::Author => "author",
            EditableField::Genre => "genre",
            EditableField::PageCount => "pageCount",
            EditableField::Description => "description",
        }
    }
}

impl fmt::Display for EditableField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid fields: {}", join_fields(.0))]
    InvalidFields(Vec<EditableField>),
    #[error("unknown field `{0}`")]
    UnknownField(String),
}

impl ValidationError {
    pub fn fields(&self) -> &[EditableField] {
        match self {
            ValidationError::InvalidFields(fields) => fields,
            ValidationError::UnknownField(_) => &[],
        }
    }
}

fn join_fields(fields: &[EditableField]) -> String {
    fields
        .iter()
        .map(|field| field.wire_name())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Network(#[from] NetworkError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("no book is selected for this action")]
    NotArmed,
}
