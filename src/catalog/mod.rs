//! Book and patron catalog storage and querying.
//!
//! [`store::CatalogStore`] owns two append-only collections and answers
//! identity lookups and keyword searches against them. Identity lookups
//! return [`search::NotFound`] on a miss; searches return an empty list.
//!
//! ## Example
//!
//! ```rust
//! use library_catalog::catalog::store::CatalogStore;
//! use library_catalog::core::{Availability, Book, BookId};
//!
//! let mut catalog = CatalogStore::new();
//! catalog.add_book(Book::new(1, "The Hobbit", "Tolkien", "Fantasy", Availability::Available));
//! catalog.add_book(Book::new(2, "Hobbiton Tales", "Anon", "Fantasy", Availability::Borrowed));
//!
//! assert_eq!(catalog.search_books("HOBBIT").len(), 2);
//! assert!(catalog.find_book_by_id(BookId(3)).is_err());
//! ```
//!
//! ## Seed Catalogs
//!
//! A store can be populated at start-up from a JSON file and exported back
//! to the same format:
//!
//! ```rust,no_run
//! use library_catalog::catalog::store::CatalogStore;
//! use std::path::Path;
//!
//! let catalog = CatalogStore::load_from_file(Path::new("library.json")).unwrap();
//! let json = catalog.to_json().unwrap();
//! ```
//!
//! [`shared::SharedCatalog`] wraps the same operations for concurrent use.

pub mod search;
pub mod shared;
pub mod store;
