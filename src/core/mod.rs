//! Core data types for the library catalog.
//!
//! - [`Book`]: a catalogued book with title, author, genre and availability
//! - [`Patron`]: a registered borrower with contact details
//! - [`BookId`], [`PatronId`]: externally assigned integer identities
//! - [`Availability`]: the circulation tag carried by every book
//!
//! Entries are immutable once constructed. Identities are not required to be
//! unique; the catalog resolves duplicates by insertion order.

pub mod book;
pub mod patron;
pub mod types;

pub use book::Book;
pub use patron::Patron;
pub use types::{Availability, BookId, EntryKind, PatronId};
