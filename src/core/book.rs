use serde::{Deserialize, Serialize};

use crate::core::types::{Availability, BookId};

/// A book held by the library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    id: BookId,
    title: String,
    author: String,
    genre: String,
    #[serde(default)]
    availability: Availability,
}

impl Book {
    pub fn new(
        id: i32,
        title: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
        availability: Availability,
    ) -> Self {
        Self {
            id: BookId::new(id),
            title: title.into(),
            author: author.into(),
            genre: genre.into(),
            availability,
        }
    }

    #[must_use]
    pub fn id(&self) -> BookId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    #[must_use]
    pub fn genre(&self) -> &str {
        &self.genre
    }

    #[must_use]
    pub fn availability(&self) -> Availability {
        self.availability
    }
}

impl std::fmt::Display for Book {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Book{{id={}, title='{}', author='{}', genre='{}', availability={}}}",
            self.id, self.title, self.author, self.genre, self.availability
        )
    }
}
