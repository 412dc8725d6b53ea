use std::{
    collections::VecDeque,
    sync::atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use shared::domain::{Book, BookId};
use tokio::sync::{oneshot, Mutex};

use crate::{
    error::{NetworkError, Operation},
    BookApi,
};

pub(crate) fn book(id: i64, title: &str) -> Book {
    Book {
        id: BookId::from(id),
        title: title.to_string(),
        author: "Frank Herbert".to_string(),
        genre: "SF".to_string(),
        page_count: 412,
        description: "A desert planet.".to_string(),
        read: false,
    }
}

pub(crate) fn status_error(operation: Operation, status: u16) -> NetworkError {
    NetworkError::Status { operation, status }
}

struct ScriptedList {
    gate: Option<oneshot::Receiver<()>>,
    result: Result<Vec<Book>, NetworkError>,
}

/// In-memory book service that honors deletes and updates, counts calls, and
/// can hold list responses until released.
#[derive(Default)]
pub(crate) struct FakeLibrary {
    books: Mutex<Vec<Book>>,
    scripted_lists: Mutex<VecDeque<ScriptedList>>,
    delete_failure: Mutex<Option<u16>>,
    update_failure: Mutex<Option<u16>>,
    updated: Mutex<Vec<Book>>,
    list_calls: AtomicUsize,
    delete_calls: AtomicUsize,
    update_calls: AtomicUsize,
}

impl FakeLibrary {
    pub(crate) fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: Mutex::new(books),
            ..Self::default()
        }
    }

    pub(crate) async fn books(&self) -> Vec<Book> {
        self.books.lock().await.clone()
    }

    /// Next list call answers with `result` instead of the stored books.
    pub(crate) async fn script_list(&self, result: Result<Vec<Book>, NetworkError>) {
        self.scripted_lists
            .lock()
            .await
            .push_back(ScriptedList { gate: None, result });
    }

    /// Like [`FakeLibrary::script_list`], but the call stays pending until the
    /// returned sender fires.
    pub(crate) async fn script_gated_list(
        &self,
        result: Result<Vec<Book>, NetworkError>,
    ) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.scripted_lists.lock().await.push_back(ScriptedList {
            gate: Some(rx),
            result,
        });
        tx
    }

    pub(crate) async fn fail_deletes_with(&self, status: u16) {
        *self.delete_failure.lock().await = Some(status);
    }

    pub(crate) async fn fail_updates_with(&self, status: u16) {
        *self.update_failure.lock().await = Some(status);
    }

    pub(crate) async fn updated(&self) -> Vec<Book> {
        self.updated.lock().await.clone()
    }

    pub(crate) fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn network_calls(&self) -> usize {
        self.list_calls() + self.delete_calls() + self.update_calls()
    }
}

#[async_trait]
impl BookApi for FakeLibrary {
    async fn list_books(&self) -> Result<Vec<Book>, NetworkError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let scripted = self.scripted_lists.lock().await.pop_front();
        match scripted {
            Some(ScriptedList { gate, result }) => {
                if let Some(gate) = gate {
                    let _ = gate.await;
                }
                result
            }
            None => Ok(self.books.lock().await.clone()),
        }
    }

    async fn delete_book(&self, id: &BookId) -> Result<(), NetworkError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(status) = *self.delete_failure.lock().await {
            return Err(status_error(Operation::DeleteBook, status));
        }
        self.books.lock().await.retain(|book| &book.id != id);
        Ok(())
    }

    async fn update_book(&self, book: &Book) -> Result<(), NetworkError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(status) = *self.update_failure.lock().await {
            return Err(status_error(Operation::UpdateBook, status));
        }
        self.updated.lock().await.push(book.clone());
        let mut books = self.books.lock().await;
        if let Some(stored) = books.iter_mut().find(|stored| stored.id == book.id) {
            *stored = book.clone();
        }
        Ok(())
    }
}
