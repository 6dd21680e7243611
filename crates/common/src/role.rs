//! Role vocabulary for the Keystead platform
//!
//! A role is a closed enumeration stored as a custom claim on the identity
//! provider's user record and embedded into every token the provider issues
//! afterwards. Claims arrive as loosely-typed JSON; they are decoded into
//! [`Role`] at the trust boundary and unknown values normalize to
//! [`Role::None`] there, so no untyped value travels into business logic.

use serde::{Deserialize, Serialize};

/// Platform role. Absence of a role claim reads as `None`, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Tenant,
    None,
}

impl Role {
    /// The accepted wire values, in declaration order.
    pub const VALID_VALUES: [&'static str; 4] = ["admin", "manager", "tenant", "none"];

    /// Strict parse for request input. Returns `None` for anything outside
    /// the closed enumeration; the caller decides how to report it.
    pub fn parse_strict(value: &str) -> Option<Role> {
        match value {
            "admin" => Some(Role::Admin),
            "manager" => Some(Role::Manager),
            "tenant" => Some(Role::Tenant),
            "none" => Some(Role::None),
            _ => None,
        }
    }

    /// Lenient decode for stored claims. A missing, non-string, or
    /// unrecognized claim value normalizes to `Role::None` rather than
    /// propagating garbage past the boundary.
    pub fn from_claim_value(value: Option<&serde_json::Value>) -> Role {
        value
            .and_then(|v| v.as_str())
            .and_then(Role::parse_strict)
            .unwrap_or(Role::None)
    }

    /// Check if this role is the administrator role
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Manager => write!(f, "manager"),
            Role::Tenant => write!(f, "tenant"),
            Role::None => write!(f, "none"),
        }
    }
}

/// The claims payload written to an identity's metadata on every role
/// assignment.
///
/// Carries the role plus its `admin` boolean mirror, kept redundantly for
/// token checks that only look at a single flag. The fields are private and
/// the only constructor derives the mirror from the role, so
/// `admin != (role == admin)` is unrepresentable. Both fields go to the
/// claims store in a single update call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleClaims {
    role: Role,
    admin: bool,
}

impl RoleClaims {
    /// Build the claims payload for a role, deriving the admin mirror.
    pub fn for_role(role: Role) -> Self {
        Self {
            role,
            admin: role.is_admin(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn admin(&self) -> bool {
        self.admin
    }
}
