//! Axum extractors for authentication
//!
//! Generic over any state `S` where `TokenVerifier: FromRef<S>`.
//! This is axum's idiomatic nested-state pattern.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::error::AuthError;
use crate::types::Actor;
use crate::verifier::TokenVerifier;

/// Authenticated caller extractor.
///
/// A missing or malformed Authorization header rejects with 401 before the
/// handler runs; handlers only ever see a verified [`Actor`].
#[derive(Debug)]
pub struct AuthUser(pub Actor);

impl<S> FromRequestParts<S> for AuthUser
where
    TokenVerifier: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingAuthorization)?;

        let token = header
            .to_str()
            .ok()
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or(AuthError::InvalidAuthorizationFormat)?;

        let actor = TokenVerifier::from_ref(state).verify(token)?;

        Ok(AuthUser(actor))
    }
}
