//! Boundary shapes for the external identity flow.
//!
//! Registration and login are served by a separate identity system; this
//! module only carries the credential DTO and its validation so the client
//! side can check payloads before posting them.

pub mod models;

pub use models::UserDto;
