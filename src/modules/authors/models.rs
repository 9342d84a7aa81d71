use serde::{Deserialize, Serialize};

use folio_db::EntityId;
use folio_http::validate::{self, FieldError};

/// Persisted author record.
#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
}

/// Author shape returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorDto {
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
}

impl From<Author> for AuthorDto {
    fn from(author: Author) -> Self {
        Self {
            id: author.id,
            first_name: author.first_name,
            last_name: author.last_name,
        }
    }
}

/// Payload for creating an author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorCreateDto {
    pub first_name: String,
    pub last_name: String,
}

impl AuthorCreateDto {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        validate::require("first_name", &self.first_name, &mut errors);
        validate::require("last_name", &self.last_name, &mut errors);
        errors
    }

    /// Build the record to persist. The store assigns the real id.
    pub fn into_record(self) -> Author {
        Author {
            id: 0,
            first_name: self.first_name,
            last_name: self.last_name,
        }
    }
}

/// Payload for replacing an author record. Carries the record id, which must
/// match the path parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorUpdateDto {
    pub id: EntityId,
    pub first_name: String,
    pub last_name: String,
}

impl AuthorUpdateDto {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        validate::require_id("id", self.id, &mut errors);
        validate::require("first_name", &self.first_name, &mut errors);
        validate::require("last_name", &self.last_name, &mut errors);
        errors
    }

    pub fn into_record(self) -> Author {
        Author {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
        }
    }
}
