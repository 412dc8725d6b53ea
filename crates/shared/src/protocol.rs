//! Endpoint layout of the book service, relative to its base URL.

use url::{ParseError, Url};

use crate::domain::BookId;

/// `GET {base}/get-books` returns the full collection as a JSON array.
pub const LIST_BOOKS_PATH: &str = "get-books";

/// Multipart field carrying the JSON-encoded record on `PUT {base}`.
pub const UPDATE_FORM_FIELD: &str = "book";

pub const UPDATE_FORM_MIME: &str = "application/json";

pub fn list_books_url(base_url: &str) -> Result<Url, ParseError> {
    with_segment(base_url, LIST_BOOKS_PATH)
}

/// `{base}/{id}`, with the id percent-encoded as a single path segment.
pub fn book_url(base_url: &str, id: &BookId) -> Result<Url, ParseError> {
    with_segment(base_url, &id.to_string())
}

pub fn update_book_url(base_url: &str) -> Result<Url, ParseError> {
    Url::parse(base_url.trim().trim_end_matches('/'))
}

fn with_segment(base_url: &str, segment: &str) -> Result<Url, ParseError> {
    let mut url = Url::parse(base_url.trim())?;
    url.path_segments_mut()
        .map_err(|()| ParseError::RelativeUrlWithCannotBeABaseBase)?
        .pop_if_empty()
        .push(segment);
    Ok(url)
}
