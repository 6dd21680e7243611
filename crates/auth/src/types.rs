//! Verified caller types
//!
//! An [`Actor`] only ever comes from a cryptographically verified token.
//! Its role string is decoded into the closed enumeration here, at the
//! trust boundary; unknown values normalize to `Role::None` immediately.

use keystead_common::Role;

use crate::claims::TokenClaims;

/// The verified caller of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub uid: String,
    pub email: Option<String>,
    pub role: Role,
    /// The `admin` mirror claim as embedded in the presented token. This is
    /// the claim authorization checks read; it reflects the claims at
    /// token-issue time, not any write that happened since.
    pub admin: bool,
}

impl Actor {
    /// Decode verified token claims into a typed actor.
    pub fn from_claims(claims: &TokenClaims) -> Self {
        let role = claims
            .role
            .as_deref()
            .and_then(Role::parse_strict)
            .unwrap_or(Role::None);

        Self {
            uid: claims.sub.clone(),
            email: claims.email.clone(),
            role,
            admin: claims.admin.unwrap_or(false),
        }
    }

    /// Check if the presented token carries the admin claim
    pub fn is_admin(&self) -> bool {
        self.admin
    }
}
