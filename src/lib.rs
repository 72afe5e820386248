//! # library-catalog
//!
//! An in-memory catalog of library books and patrons.
//!
//! Books and patrons are appended to a [`CatalogStore`] and can then be looked
//! up by id or searched by keyword. Lookups report a miss with an explicit
//! [`NotFound`] value; keyword searches are case-insensitive substring matches
//! that return results in insertion order.
//!
//! ## Example
//!
//! ```rust
//! use library_catalog::{Availability, Book, CatalogStore, Patron, PatronId};
//!
//! let mut catalog = CatalogStore::new();
//! catalog.add_book(Book::new(1, "The Hobbit", "J.R.R. Tolkien", "Fantasy", Availability::Available));
//! catalog.add_patron(Patron::new(5, "Alice", "alice@example.com"));
//!
//! for book in catalog.search_books("hobbit") {
//!     println!("{book}");
//! }
//!
//! assert!(catalog.find_patron_by_id(PatronId(5)).is_ok());
//! assert!(catalog.find_patron_by_id(PatronId(6)).is_err());
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Catalog storage, lookup and keyword search
//! - [`core`]: Book, patron and identity types
//! - [`cli`]: Command-line interface and interactive shell
//! - [`web`]: Web server for browser-based search

pub mod catalog;
pub mod cli;
pub mod core;
pub mod web;

// Re-export commonly used types for convenience
pub use catalog::search::NotFound;
pub use catalog::shared::SharedCatalog;
pub use catalog::store::CatalogStore;
pub use crate::core::types::*;
pub use crate::core::{Book, Patron};
