//! Folio application library.
//!
//! Hosts the catalog's resource modules (authors, books) and the wiring
//! that assembles them into the HTTP application.

pub mod bootstrap;
pub mod modules;
