//! Identity lifecycle hook handlers
//!
//! The identity provider delivers an event for every created account.
//! The hook acknowledges unconditionally once authenticated — account
//! creation must never be blocked or rolled back by a failure here.

use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};
use serde::Deserialize;

use keystead_common::{Error, Result};
use keystead_directory::IdentityRecord;

use crate::api::middleware::RolesState;
use crate::domain::assign_default_role;

/// Header carrying the provider's shared hook secret.
const HOOK_SECRET_HEADER: &str = "x-webhook-secret";

/// Identity-created event payload from the provider
#[derive(Debug, Deserialize)]
pub struct IdentityCreatedEvent {
    pub record: IdentityRecord,
}

/// Handle an identity-created event
///
/// **POST /v1/hooks/identity-created**
///
/// When a hook secret is configured, requests must present it; anything
/// else is rejected before side effects. Past that check the handler
/// always returns 204 — trigger failures are logged and swallowed, never
/// surfaced to the provider.
pub async fn identity_created(
    State(state): State<RolesState>,
    headers: HeaderMap,
    Json(event): Json<IdentityCreatedEvent>,
) -> Result<StatusCode> {
    if let Some(expected) = &state.hook_secret {
        let presented = headers
            .get(HOOK_SECRET_HEADER)
            .and_then(|v| v.to_str().ok());
        if presented != Some(expected.as_str()) {
            return Err(Error::Unauthenticated(
                "Invalid or missing hook secret".to_string(),
            ));
        }
    } else {
        tracing::warn!("Hook secret not configured; accepting identity-created event unverified");
    }

    tracing::info!(uid = %event.record.uid, "Identity created event received");
    assign_default_role(state.directory.as_ref(), &event.record.uid).await;

    Ok(StatusCode::NO_CONTENT)
}
