//! Application wiring: stores, modules, registry, and router assembly.

use std::sync::Arc;

use axum::Router;

use folio_kernel::settings::Settings;
use folio_kernel::ModuleRegistry;

use crate::modules::authors::repository::{AuthorRepository, MemAuthorRepository};
use crate::modules::books::repository::{BookRepository, MemBookRepository};
use crate::modules::{authors, books};

/// Build the module registry with every resource module registered against
/// the in-memory entity stores.
pub fn build_registry() -> ModuleRegistry {
    let author_repo: Arc<dyn AuthorRepository> = Arc::new(MemAuthorRepository::new());
    let book_repo: Arc<dyn BookRepository> = Arc::new(MemBookRepository::new());

    let mut registry = ModuleRegistry::new();
    registry.register(authors::create_module(author_repo.clone()));
    registry.register(books::create_module(book_repo, author_repo));
    registry
}

/// Build the production router. Black-box tests serve this on an ephemeral
/// port to exercise the full HTTP surface.
pub fn build_app(settings: &Settings) -> Router {
    let registry = build_registry();
    folio_http::build_router(&registry, settings)
}
