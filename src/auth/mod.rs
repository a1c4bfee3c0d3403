pub mod verifier;

use serde::{Deserialize, Serialize};

pub use verifier::{CredentialVerifier, JwtVerifier, VerificationError};

/// Account role carried in the `role` claim of a credential.
///
/// The set is closed: a correctly signed token naming any other role fails
/// verification instead of slipping past the role checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    EventCreator,
    BusinessOwner,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::EventCreator => "EVENT_CREATOR",
            Role::BusinessOwner => "BUSINESS_OWNER",
        }
    }

    /// Whether this role may enter the `/admin` area.
    pub fn may_enter_admin(&self) -> bool {
        match self {
            Role::Admin => true,
            Role::EventCreator | Role::BusinessOwner => false,
        }
    }

    /// Whether this role may enter the `/creator` area.
    pub fn may_enter_creator(&self) -> bool {
        match self {
            Role::EventCreator => true,
            Role::Admin | Role::BusinessOwner => false,
        }
    }

    /// Whether the generic dashboard should bounce this role to its own landing area.
    pub fn has_dedicated_landing(&self) -> bool {
        match self {
            Role::Admin => true,
            Role::EventCreator | Role::BusinessOwner => false,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded credential payload.
///
/// Only `role` is required; the remaining registered claims are kept when the
/// issuer sends them so they can be shown by `/api/session` and `gatectl`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl Claims {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            sub: None,
            exp: None,
            iat: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_names() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        assert_eq!(
            serde_json::to_string(&Role::EventCreator).unwrap(),
            "\"EVENT_CREATOR\""
        );
        let role: Role = serde_json::from_str("\"BUSINESS_OWNER\"").unwrap();
        assert_eq!(role, Role::BusinessOwner);
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let parsed = serde_json::from_str::<Claims>(r#"{"role":"SUPERUSER"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_area_permissions() {
        assert!(Role::Admin.may_enter_admin());
        assert!(!Role::EventCreator.may_enter_admin());
        assert!(!Role::BusinessOwner.may_enter_admin());

        assert!(Role::EventCreator.may_enter_creator());
        assert!(!Role::Admin.may_enter_creator());
        assert!(!Role::BusinessOwner.may_enter_creator());

        assert!(Role::Admin.has_dedicated_landing());
        assert!(!Role::BusinessOwner.has_dedicated_landing());
    }
}
