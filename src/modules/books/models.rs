use serde::{Deserialize, Serialize};

use folio_db::EntityId;
use folio_http::validate::{self, FieldError};

/// Persisted book record. `author_id` is a non-owning reference checked only
/// at creation time; deleting the author later leaves the book in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: EntityId,
    pub title: String,
    pub year: Option<i32>,
    pub isbn: String,
    pub summary: Option<String>,
    pub image: Option<String>,
    pub author_id: EntityId,
}

/// Book shape returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDto {
    pub id: EntityId,
    pub title: String,
    pub year: Option<i32>,
    pub isbn: String,
    pub summary: Option<String>,
    pub image: Option<String>,
    pub author_id: EntityId,
}

impl From<Book> for BookDto {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
            year: book.year,
            isbn: book.isbn,
            summary: book.summary,
            image: book.image,
            author_id: book.author_id,
        }
    }
}

/// Payload for creating a book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookCreateDto {
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
    pub isbn: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    pub author_id: EntityId,
}

impl BookCreateDto {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        validate::require("title", &self.title, &mut errors);
        validate::require("isbn", &self.isbn, &mut errors);
        validate::require_id("author_id", self.author_id, &mut errors);
        errors
    }

    /// Build the record to persist. The store assigns the real id.
    pub fn into_record(self) -> Book {
        Book {
            id: 0,
            title: self.title,
            year: self.year,
            isbn: self.isbn,
            summary: self.summary,
            image: self.image,
            author_id: self.author_id,
        }
    }
}

/// Payload for replacing a book record. Carries the record id, which must
/// match the path parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookUpdateDto {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub year: Option<i32>,
    pub isbn: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    pub author_id: EntityId,
}

impl BookUpdateDto {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        validate::require_id("id", self.id, &mut errors);
        validate::require("title", &self.title, &mut errors);
        validate::require("isbn", &self.isbn, &mut errors);
        validate::require_id("author_id", self.author_id, &mut errors);
        errors
    }

    pub fn into_record(self) -> Book {
        Book {
            id: self.id,
            title: self.title,
            year: self.year,
            isbn: self.isbn,
            summary: self.summary,
            image: self.image,
            author_id: self.author_id,
        }
    }
}
