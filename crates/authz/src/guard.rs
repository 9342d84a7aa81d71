use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use folio_http::error::AppError;

use crate::roles::{Role, RoleClaims};

/// Header the upstream identity layer uses to convey the caller's roles,
/// comma-separated.
pub const ROLE_HEADER: &str = "x-auth-roles";

/// Route guard requiring a role claim.
///
/// Attach with `axum::middleware::from_fn_with_state(role, require_role)`.
/// Fails closed: a missing header, an unreadable value, or a claim set
/// without the required role all produce 403.
pub async fn require_role(
    State(required): State<Role>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let claims = req
        .headers()
        .get(ROLE_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(RoleClaims::from_header)
        .unwrap_or_default();

    if !claims.has(required) {
        tracing::warn!(required = %required, "request denied: missing role claim");
        return Err(AppError::forbidden(format!(
            "requires the {required} role"
        )));
    }

    Ok(next.run(req).await)
}
