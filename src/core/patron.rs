use serde::{Deserialize, Serialize};

use crate::core::types::PatronId;

/// A registered library patron
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patron {
    id: PatronId,
    name: String,
    contact_info: String,
}

impl Patron {
    pub fn new(id: i32, name: impl Into<String>, contact_info: impl Into<String>) -> Self {
        Self {
            id: PatronId::new(id),
            name: name.into(),
            contact_info: contact_info.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> PatronId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn contact_info(&self) -> &str {
        &self.contact_info
    }
}

impl std::fmt::Display for Patron {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Patron{{id={}, name='{}', contactInfo='{}'}}",
            self.id, self.name, self.contact_info
        )
    }
}
