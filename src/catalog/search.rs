use thiserror::Error;

use crate::core::{Book, EntryKind, Patron};

/// Returned by identity lookups when no entry carries the requested id
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind} with id {id} not found")]
pub struct NotFound {
    pub kind: EntryKind,
    pub id: i32,
}

/// An entry that can be looked up by id and matched by keyword
pub trait CatalogEntry {
    const KIND: EntryKind;

    /// Raw identity value
    fn entry_id(&self) -> i32;

    /// The text field keyword search runs against
    fn search_text(&self) -> &str;
}

impl CatalogEntry for Book {
    const KIND: EntryKind = EntryKind::Book;

    fn entry_id(&self) -> i32 {
        self.id().0
    }

    fn search_text(&self) -> &str {
        self.title()
    }
}

impl CatalogEntry for Patron {
    const KIND: EntryKind = EntryKind::Patron;

    fn entry_id(&self) -> i32 {
        self.id().0
    }

    fn search_text(&self) -> &str {
        self.name()
    }
}

/// Case-insensitive substring matcher.
/// An empty keyword matches everything.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    needle: String,
}

impl KeywordMatcher {
    #[must_use]
    pub fn new(keyword: &str) -> Self {
        Self {
            needle: keyword.to_lowercase(),
        }
    }

    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        self.needle.is_empty() || text.to_lowercase().contains(&self.needle)
    }
}

/// First entry with the given id, scanning in insertion order
pub fn find_by_id<T: CatalogEntry>(entries: &[T], id: i32) -> Result<&T, NotFound> {
    entries
        .iter()
        .find(|entry| entry.entry_id() == id)
        .ok_or(NotFound { kind: T::KIND, id })
}

/// All entries whose search text contains `keyword`, in insertion order
pub fn search<'a, T: CatalogEntry>(entries: &'a [T], keyword: &str) -> Vec<&'a T> {
    let matcher = KeywordMatcher::new(keyword);
    entries
        .iter()
        .filter(|entry| matcher.matches(entry.search_text()))
        .collect()
}
