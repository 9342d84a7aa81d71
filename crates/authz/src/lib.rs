//! Role-based authorization for Folio routes.
//!
//! The identity provider lives upstream of this service and is trusted to
//! inject the caller's role claims into a request header. Routes opt into a
//! required role with [`require_role`]; the guard fails closed, so a missing
//! or unreadable claim set yields 403 rather than a pass-through.

pub mod guard;
pub mod roles;

pub use guard::{require_role, ROLE_HEADER};
pub use roles::{Role, RoleClaims};
