//! Caller identity and role metadata resolved by the auth middleware.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Roles accepted by the registry. Only `Admin` may mutate treaties;
/// every authenticated role may read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    PolicyOfficer,
    Auditor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::PolicyOfficer => "policy_officer",
            Role::Auditor => "auditor",
        }
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "policy_officer" => Ok(Role::PolicyOfficer),
            "auditor" => Ok(Role::Auditor),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated caller, inserted as a request extension by
/// `middleware::auth` after credential verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub role: Role,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_str() {
        for role in [Role::Admin, Role::PolicyOfficer, Role::Auditor] {
            assert_eq!(Role::from_str(role.as_str()), Ok(role));
        }
    }

    #[test]
    fn role_parse_is_case_insensitive() {
        assert_eq!(Role::from_str("ADMIN"), Ok(Role::Admin));
        assert_eq!(Role::from_str("Policy_Officer"), Ok(Role::PolicyOfficer));
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(Role::from_str("superuser").is_err());
    }

    #[test]
    fn only_admin_is_admin() {
        let admin = AuthUser {
            id: "u1".into(),
            role: Role::Admin,
        };
        let auditor = AuthUser {
            id: "u2".into(),
            role: Role::Auditor,
        };
        assert!(admin.is_admin());
        assert!(!auditor.is_admin());
    }
}
