//! Token verifier
//!
//! The whole authentication backend of this service: no user table, no
//! session rows. The verified token *is* the caller's authorization state,
//! fixed at token-issue time — a role written after issue is invisible
//! until the subject refreshes (the stale-claim window).

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use crate::claims::TokenClaims;
use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::types::Actor;

/// Verifies bearer tokens and produces typed actors.
///
/// Domain states expose this via `FromRef`:
/// ```ignore
/// impl FromRef<MyDomainState> for TokenVerifier {
///     fn from_ref(state: &MyDomainState) -> Self {
///         state.verifier.clone()
///     }
/// }
/// ```
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("decoding_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl TokenVerifier {
    pub fn new(config: AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);

        match &config.audience {
            Some(aud) => validation.set_audience(&[aud]),
            None => validation.validate_aud = false,
        }
        if let Some(iss) = &config.issuer {
            validation.set_issuer(&[iss]);
        }

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_ref()),
            validation,
        }
    }

    /// Verify a bearer token and decode its claims into an [`Actor`].
    pub fn verify(&self, token: &str) -> Result<Actor, AuthError> {
        let data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token verification failed");
                AuthError::InvalidToken
            })?;

        Ok(Actor::from_claims(&data.claims))
    }
}
