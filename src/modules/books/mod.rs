pub mod models;
pub mod repository;
pub mod routes;

use std::sync::Arc;

use async_trait::async_trait;
use axum::routing::get;
use axum::Router;

use folio_kernel::{InitCtx, Module};

use crate::modules::authors::repository::AuthorRepository;
use repository::BookRepository;
use routes::BooksState;

/// Books resource module.
///
/// Carries no role guard: book routes are open to any caller, unlike the
/// authors module. The asymmetry is inherited behavior; see DESIGN.md.
pub struct BooksModule {
    books: Arc<dyn BookRepository>,
    authors: Arc<dyn AuthorRepository>,
}

impl BooksModule {
    pub fn new(books: Arc<dyn BookRepository>, authors: Arc<dyn AuthorRepository>) -> Self {
        Self { books, authors }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        let state = BooksState {
            books: self.books.clone(),
            authors: self.authors.clone(),
        };

        Router::new()
            .route("/", get(routes::list_books).post(routes::create_book))
            .route(
                "/{id}",
                get(routes::get_book)
                    .put(routes::update_book)
                    .delete(routes::delete_book),
            )
            .with_state(state)
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(serde_json::json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List books",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "List of books",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/BookDto" }
                                        }
                                    }
                                }
                            },
                            "500": {
                                "description": "Internal server error",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            }
                        }
                    },
                    "post": {
                        "summary": "Create a book",
                        "description": "The referenced author must already exist; an unknown author_id is a caller input error.",
                        "tags": ["Books"],
                        "requestBody": {
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/BookCreateDto" }
                                }
                            }
                        },
                        "responses": {
                            "201": {
                                "description": "Created book with its generated id",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/BookDto" }
                                    }
                                }
                            },
                            "400": { "description": "Payload failed validation or the author does not exist" },
                            "500": { "description": "Internal server error" }
                        }
                    }
                },
                "/{id}": {
                    "get": {
                        "summary": "Get a book by id",
                        "tags": ["Books"],
                        "parameters": [
                            { "name": "id", "in": "path", "required": true, "schema": { "type": "integer", "format": "int64" } }
                        ],
                        "responses": {
                            "200": {
                                "description": "The book record",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/BookDto" }
                                    }
                                }
                            },
                            "404": { "description": "No book with that id" },
                            "500": { "description": "Internal server error" }
                        }
                    },
                    "put": {
                        "summary": "Replace a book record",
                        "tags": ["Books"],
                        "parameters": [
                            { "name": "id", "in": "path", "required": true, "schema": { "type": "integer", "format": "int64" } }
                        ],
                        "requestBody": {
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/BookUpdateDto" }
                                }
                            }
                        },
                        "responses": {
                            "204": { "description": "Book replaced" },
                            "400": { "description": "Bad id, mismatched ids, or failed validation" },
                            "404": { "description": "No book with that id" },
                            "500": { "description": "Internal server error" }
                        }
                    },
                    "delete": {
                        "summary": "Delete a book record",
                        "tags": ["Books"],
                        "parameters": [
                            { "name": "id", "in": "path", "required": true, "schema": { "type": "integer", "format": "int64" } }
                        ],
                        "responses": {
                            "204": { "description": "Book deleted" },
                            "400": { "description": "Bad id" },
                            "404": { "description": "No book with that id" },
                            "500": { "description": "Internal server error" }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "BookDto": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer", "format": "int64" },
                            "title": { "type": "string" },
                            "year": { "type": "integer", "nullable": true },
                            "isbn": { "type": "string" },
                            "summary": { "type": "string", "nullable": true },
                            "image": { "type": "string", "nullable": true },
                            "author_id": { "type": "integer", "format": "int64" }
                        },
                        "required": ["id", "title", "isbn", "author_id"]
                    },
                    "BookCreateDto": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string" },
                            "year": { "type": "integer", "nullable": true },
                            "isbn": { "type": "string" },
                            "summary": { "type": "string", "nullable": true },
                            "image": { "type": "string", "nullable": true },
                            "author_id": { "type": "integer", "format": "int64" }
                        },
                        "required": ["title", "isbn", "author_id"]
                    },
                    "BookUpdateDto": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer", "format": "int64" },
                            "title": { "type": "string" },
                            "year": { "type": "integer", "nullable": true },
                            "isbn": { "type": "string" },
                            "summary": { "type": "string", "nullable": true },
                            "image": { "type": "string", "nullable": true },
                            "author_id": { "type": "integer", "format": "int64" }
                        },
                        "required": ["id", "title", "isbn", "author_id"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create the books module backed by the given stores.
pub fn create_module(
    books: Arc<dyn BookRepository>,
    authors: Arc<dyn AuthorRepository>,
) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(books, authors))
}
