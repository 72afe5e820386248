use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::catalog::search::{self, NotFound};
use crate::core::{Book, BookId, Patron, PatronId};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Seed catalog version for compatibility checking
pub const CATALOG_VERSION: &str = "1.0.0";

/// Serializable catalog format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogData {
    pub version: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub books: Vec<Book>,
    #[serde(default)]
    pub patrons: Vec<Patron>,
}

/// In-memory catalog of books and patrons.
///
/// Both collections are append-only and kept in insertion order. Lookups and
/// searches borrow the store immutably, so they can never alter its contents.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    books: Vec<Book>,
    patrons: Vec<Patron>,
}

impl CatalogStore {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a seed catalog from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&content)?;
        tracing::debug!(
            path = %path.display(),
            books = catalog.book_count(),
            patrons = catalog.patron_count(),
            "loaded seed catalog"
        );
        Ok(catalog)
    }

    /// Parse a seed catalog from a JSON string, keeping file order
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;

        // Version check (warn but don't fail)
        if data.version != CATALOG_VERSION {
            tracing::warn!(
                "Catalog version mismatch (expected {}, found {})",
                CATALOG_VERSION,
                data.version
            );
        }

        let mut catalog = Self::new();
        for book in data.books {
            catalog.add_book(book);
        }
        for patron in data.patrons {
            catalog.add_patron(patron);
        }

        Ok(catalog)
    }

    /// Export catalog to JSON
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let data = CatalogData {
            version: CATALOG_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            books: self.books.clone(),
            patrons: self.patrons.clone(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    /// Append a book. Duplicate ids are accepted.
    pub fn add_book(&mut self, book: Book) {
        tracing::debug!(id = %book.id(), title = book.title(), "adding book");
        self.books.push(book);
    }

    /// First book added with `id`
    pub fn find_book_by_id(&self, id: BookId) -> Result<&Book, NotFound> {
        search::find_by_id(&self.books, id.0)
    }

    /// Books whose title contains `keyword`, ignoring case
    pub fn search_books(&self, keyword: &str) -> Vec<&Book> {
        search::search(&self.books, keyword)
    }

    /// Append a patron. Duplicate ids are accepted.
    pub fn add_patron(&mut self, patron: Patron) {
        tracing::debug!(id = %patron.id(), name = patron.name(), "adding patron");
        self.patrons.push(patron);
    }

    /// First patron added with `id`
    pub fn find_patron_by_id(&self, id: PatronId) -> Result<&Patron, NotFound> {
        search::find_by_id(&self.patrons, id.0)
    }

    /// Patrons whose name contains `keyword`, ignoring case
    pub fn search_patrons(&self, keyword: &str) -> Vec<&Patron> {
        search::search(&self.patrons, keyword)
    }

    /// All books in insertion order
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// All patrons in insertion order
    pub fn patrons(&self) -> &[Patron] {
        &self.patrons
    }

    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    pub fn patron_count(&self) -> usize {
        self.patrons.len()
    }

    /// Check if catalog has neither books nor patrons
    pub fn is_empty(&self) -> bool {
        self.books.is_empty() && self.patrons.is_empty()
    }

    /// Hand both collections over to the caller
    pub fn into_parts(self) -> (Vec<Book>, Vec<Patron>) {
        (self.books, self.patrons)
    }
}
