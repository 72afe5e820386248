use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Identity of a book, assigned by whoever creates the entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(pub i32);

impl BookId {
    #[must_use]
    pub fn new(id: i32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a patron, assigned by whoever creates the entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatronId(pub i32);

impl PatronId {
    #[must_use]
    pub fn new(id: i32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PatronId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Circulation status of a book.
///
/// No catalog operation moves a book between states; the tag is set when the
/// book is constructed and stays that way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Availability {
    #[default]
    Available,
    Borrowed,
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available => write!(f, "AVAILABLE"),
            Self::Borrowed => write!(f, "BORROWED"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown availability '{0}' (expected AVAILABLE or BORROWED)")]
pub struct ParseAvailabilityError(pub String);

impl FromStr for Availability {
    type Err = ParseAvailabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "available" => Ok(Self::Available),
            "borrowed" => Ok(Self::Borrowed),
            _ => Err(ParseAvailabilityError(s.to_string())),
        }
    }
}

/// Kind of catalog entry, used when reporting lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Book,
    Patron,
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Book => write!(f, "Book"),
            Self::Patron => write!(f, "Patron"),
        }
    }
}
