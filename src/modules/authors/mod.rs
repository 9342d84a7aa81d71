pub mod models;
pub mod repository;
pub mod routes;

use std::sync::Arc;

use async_trait::async_trait;
use axum::routing::{get, post, put};
use axum::Router;

use folio_authz::{require_role, Role};
use folio_kernel::{InitCtx, Module};

use repository::AuthorRepository;
use routes::AuthorsState;

/// Authors resource module.
///
/// Reads require the Customer role, writes the Administrator role. Books is
/// deliberately not gated the same way; see DESIGN.md.
pub struct AuthorsModule {
    repo: Arc<dyn AuthorRepository>,
}

impl AuthorsModule {
    pub fn new(repo: Arc<dyn AuthorRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl Module for AuthorsModule {
    fn name(&self) -> &'static str {
        "authors"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "authors module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        let state = AuthorsState {
            repo: self.repo.clone(),
        };

        let reads = Router::new()
            .route("/", get(routes::list_authors))
            .route("/{id}", get(routes::get_author))
            .route_layer(axum::middleware::from_fn_with_state(
                Role::Customer,
                require_role,
            ));

        let writes = Router::new()
            .route("/", post(routes::create_author))
            .route(
                "/{id}",
                put(routes::update_author).delete(routes::delete_author),
            )
            .route_layer(axum::middleware::from_fn_with_state(
                Role::Administrator,
                require_role,
            ));

        reads.merge(writes).with_state(state)
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(serde_json::json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List authors",
                        "tags": ["Authors"],
                        "responses": {
                            "200": {
                                "description": "List of authors",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/AuthorDto" }
                                        }
                                    }
                                }
                            },
                            "403": { "description": "Missing the Customer role" },
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
                        "summary": "Create an author",
                        "tags": ["Authors"],
                        "requestBody": {
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/AuthorCreateDto" }
                                }
                            }
                        },
                        "responses": {
                            "201": {
                                "description": "Created author with its generated id",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/AuthorDto" }
                                    }
                                }
                            },
                            "400": { "description": "Payload failed validation" },
                            "403": { "description": "Missing the Administrator role" },
                            "500": { "description": "Internal server error" }
                        }
                    }
                },
                "/{id}": {
                    "get": {
                        "summary": "Get an author by id",
                        "tags": ["Authors"],
                        "parameters": [
                            { "name": "id", "in": "path", "required": true, "schema": { "type": "integer", "format": "int64" } }
                        ],
                        "responses": {
                            "200": {
                                "description": "The author record",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/AuthorDto" }
                                    }
                                }
                            },
                            "403": { "description": "Missing the Customer role" },
                            "404": { "description": "No author with that id" },
                            "500": { "description": "Internal server error" }
                        }
                    },
                    "put": {
                        "summary": "Replace an author record",
                        "tags": ["Authors"],
                        "parameters": [
                            { "name": "id", "in": "path", "required": true, "schema": { "type": "integer", "format": "int64" } }
                        ],
                        "requestBody": {
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/AuthorUpdateDto" }
                                }
                            }
                        },
                        "responses": {
                            "204": { "description": "Author replaced" },
                            "400": { "description": "Bad id, mismatched ids, or failed validation" },
                            "403": { "description": "Missing the Administrator role" },
                            "404": { "description": "No author with that id" },
                            "500": { "description": "Internal server error" }
                        }
                    },
                    "delete": {
                        "summary": "Delete an author record",
                        "tags": ["Authors"],
                        "parameters": [
                            { "name": "id", "in": "path", "required": true, "schema": { "type": "integer", "format": "int64" } }
                        ],
                        "responses": {
                            "204": { "description": "Author deleted" },
                            "400": { "description": "Bad id" },
                            "403": { "description": "Missing the Administrator role" },
                            "404": { "description": "No author with that id" },
                            "500": { "description": "Internal server error" }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "AuthorDto": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer", "format": "int64" },
                            "first_name": { "type": "string" },
                            "last_name": { "type": "string" }
                        },
                        "required": ["id", "first_name", "last_name"]
                    },
                    "AuthorCreateDto": {
                        "type": "object",
                        "properties": {
                            "first_name": { "type": "string" },
                            "last_name": { "type": "string" }
                        },
                        "required": ["first_name", "last_name"]
                    },
                    "AuthorUpdateDto": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer", "format": "int64" },
                            "first_name": { "type": "string" },
                            "last_name": { "type": "string" }
                        },
                        "required": ["id", "first_name", "last_name"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "authors module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "authors module stopped");
        Ok(())
    }
}

/// Create the authors module backed by the in-memory store.
pub fn create_module(repo: Arc<dyn AuthorRepository>) -> Arc<dyn Module> {
    Arc::new(AuthorsModule::new(repo))
}
