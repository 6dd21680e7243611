//! JWT claims types

use serde::{Deserialize, Serialize};

/// Raw claims of an identity-provider token.
///
/// `role` and `admin` are the custom claims the directory writes; both are
/// optional on the wire because tokens issued before the first assignment
/// carry neither. They are decoded into typed form by [`crate::Actor`].
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Email
    pub email: Option<String>,
    /// Issued at
    pub iat: u64,
    /// Expires at
    pub exp: u64,
    /// Audience
    pub aud: String,
    /// Role custom claim, raw wire value
    #[serde(default)]
    pub role: Option<String>,
    /// Admin mirror custom claim
    #[serde(default)]
    pub admin: Option<bool>,
}
