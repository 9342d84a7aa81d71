use serde::{Deserialize, Serialize};

use folio_http::validate::{self, FieldError};

/// Credential shape exchanged with the identity service's register and
/// login endpoints. This service only defines and validates the shape; the
/// endpoints themselves are served elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDto {
    pub email: String,
    pub password: String,
}

impl UserDto {
    pub const PASSWORD_MIN: usize = 6;
    pub const PASSWORD_MAX: usize = 10;

    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        validate::require_email("email", &self.email, &mut errors);
        validate::require_length(
            "password",
            &self.password,
            Self::PASSWORD_MIN,
            Self::PASSWORD_MAX,
            &mut errors,
        );
        errors
    }
}
