//! HTTP implementation of [`BookApi`] against the book service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client, Response,
};
use shared::{
    domain::{Book, BookId},
    protocol::{book_url, list_books_url, update_book_url, UPDATE_FORM_FIELD, UPDATE_FORM_MIME},
};
use tracing::debug;

use crate::{
    error::{NetworkError, Operation},
    BookApi,
};

pub struct HttpBookClient {
    http: Client,
    base_url: String,
}

impl HttpBookClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn check_status(operation: Operation, response: Response) -> Result<Response, NetworkError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(NetworkError::Status {
            operation,
            status: status.as_u16(),
        })
    }
}

fn invalid_url(operation: Operation) -> impl FnOnce(url::ParseError) -> NetworkError {
    move |source| NetworkError::InvalidUrl { operation, source }
}

fn transport(operation: Operation) -> impl FnOnce(reqwest::Error) -> NetworkError {
    move |source| NetworkError::Transport { operation, source }
}

#[async_trait]
impl BookApi for HttpBookClient {
    async fn list_books(&self) -> Result<Vec<Book>, NetworkError> {
        let operation = Operation::ListBooks;
        let url = list_books_url(&self.base_url).map_err(invalid_url(operation))?;
        debug!(%url, "GET book list");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(transport(operation))?;
        check_status(operation, response)?
            .json()
            .await
            .map_err(|source| NetworkError::Decode { operation, source })
    }

    async fn delete_book(&self, id: &BookId) -> Result<(), NetworkError> {
        let operation = Operation::DeleteBook;
        let url = book_url(&self.base_url, id).map_err(invalid_url(operation))?;
        debug!(%url, "DELETE book");
        let response = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(transport(operation))?;
        check_status(operation, response)?;
        Ok(())
    }

    async fn update_book(&self, book: &Book) -> Result<(), NetworkError> {
        let operation = Operation::UpdateBook;
        let payload = serde_json::to_string(book)
            .map_err(|source| NetworkError::Encode { operation, source })?;
        let part = Part::text(payload)
            .mime_str(UPDATE_FORM_MIME)
            .map_err(transport(operation))?;
        let form = Form::new().part(UPDATE_FORM_FIELD, part);
        let url = update_book_url(&self.base_url).map_err(invalid_url(operation))?;
        debug!(%url, id = %book.id, "PUT book");
        let response = self
            .http
            .put(url)
            .multipart(form)
            .send()
            .await
            .map_err(transport(operation))?;
        check_status(operation, response)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
