use std::fmt;
use std::str::FromStr;

/// Roles recognized by the catalog service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Customer,
    Administrator,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "Customer",
            Role::Administrator => "Administrator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("customer") {
            Ok(Role::Customer)
        } else if s.eq_ignore_ascii_case("administrator") {
            Ok(Role::Administrator)
        } else {
            Err(UnknownRole(s.to_string()))
        }
    }
}

/// The set of role claims presented by a request.
///
/// Unknown role names are dropped during parsing; a claim this service does
/// not recognize grants nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleClaims {
    roles: Vec<Role>,
}

impl RoleClaims {
    pub fn new(roles: Vec<Role>) -> Self {
        Self { roles }
    }

    /// Parse a comma-separated header value into a claim set.
    pub fn from_header(value: &str) -> Self {
        let roles = value
            .split(',')
            .filter_map(|entry| entry.parse::<Role>().ok())
            .collect();
        Self { roles }
    }

    pub fn has(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parsing_is_case_insensitive() {
        assert_eq!("Customer".parse::<Role>().unwrap(), Role::Customer);
        assert_eq!("administrator".parse::<Role>().unwrap(), Role::Administrator);
        assert_eq!(" ADMINISTRATOR ".parse::<Role>().unwrap(), Role::Administrator);
    }

    #[test]
    fn unknown_roles_fail_to_parse() {
        assert!("Librarian".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn claims_parse_comma_separated_header() {
        let claims = RoleClaims::from_header("Customer, Administrator");
        assert!(claims.has(Role::Customer));
        assert!(claims.has(Role::Administrator));
    }

    #[test]
    fn unknown_claims_grant_nothing() {
        let claims = RoleClaims::from_header("Librarian, root");
        assert!(claims.is_empty());
        assert!(!claims.has(Role::Customer));
    }

    #[test]
    fn empty_header_yields_empty_claims() {
        assert!(RoleClaims::from_header("").is_empty());
    }
}
