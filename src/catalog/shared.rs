use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::catalog::search::{self, NotFound};
use crate::catalog::store::CatalogStore;
use crate::core::{Book, BookId, Patron, PatronId};

/// Thread-safe catalog for concurrent callers.
///
/// Each collection sits behind its own lock, so a writer appending a book
/// only blocks readers of the book list. Query results are cloned out of the
/// lock.
#[derive(Debug, Default)]
pub struct SharedCatalog {
    books: RwLock<Vec<Book>>,
    patrons: RwLock<Vec<Patron>>,
}

// A panic while holding a guard cannot leave a half-pushed entry, so the data
// behind a poisoned lock is still consistent.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

impl SharedCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_book(&self, book: Book) {
        tracing::debug!(id = %book.id(), title = book.title(), "adding book");
        write(&self.books).push(book);
    }

    pub fn find_book_by_id(&self, id: BookId) -> Result<Book, NotFound> {
        search::find_by_id(&read(&self.books), id.0).cloned()
    }

    pub fn search_books(&self, keyword: &str) -> Vec<Book> {
        search::search(&read(&self.books), keyword)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn add_patron(&self, patron: Patron) {
        tracing::debug!(id = %patron.id(), name = patron.name(), "adding patron");
        write(&self.patrons).push(patron);
    }

    pub fn find_patron_by_id(&self, id: PatronId) -> Result<Patron, NotFound> {
        search::find_by_id(&read(&self.patrons), id.0).cloned()
    }

    pub fn search_patrons(&self, keyword: &str) -> Vec<Patron> {
        search::search(&read(&self.patrons), keyword)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn book_count(&self) -> usize {
        read(&self.books).len()
    }

    pub fn patron_count(&self) -> usize {
        read(&self.patrons).len()
    }
}

impl From<CatalogStore> for SharedCatalog {
    fn from(store: CatalogStore) -> Self {
        let (books, patrons) = store.into_parts();
        Self {
            books: RwLock::new(books),
            patrons: RwLock::new(patrons),
        }
    }
}
