//! Web interface for the library catalog.
//!
//! Serves a single search page plus a small JSON API over a
//! [`SharedCatalog`](crate::catalog::shared::SharedCatalog):
//!
//! - `GET /api/books?q=` and `GET /api/patrons?q=`: keyword search
//! - `GET /api/books/{id}` and `GET /api/patrons/{id}`: identity lookup
//! - `POST /api/books` and `POST /api/patrons`: append an entry
//! - `GET /api/catalog`: collection sizes

pub mod server;
