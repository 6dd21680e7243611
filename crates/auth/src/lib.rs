//! Authentication boundary for the Keystead role service
//!
//! Verifies the identity provider's bearer tokens and decodes their claims
//! into a typed [`Actor`] right at the trust boundary, so no loosely-typed
//! claim value travels into business logic. Also provides the axum
//! extractor used by every callable operation and the client-side
//! [`SessionStore`].

mod claims;
mod config;
mod error;
mod extractors;
mod session;
mod types;
mod verifier;

pub use claims::TokenClaims;
pub use config::AuthConfig;
pub use error::AuthError;
pub use extractors::AuthUser;
pub use session::{SessionSnapshot, SessionStore, SubscriptionHandle};
pub use types::Actor;
pub use verifier::TokenVerifier;
