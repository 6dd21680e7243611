//! Roles domain state and auth integration

use std::sync::Arc;

use axum::extract::FromRef;
use keystead_auth::TokenVerifier;
use keystead_directory::DirectoryService;

use crate::domain::RoleAuthority;

/// Application state for the roles domain
#[derive(Clone)]
pub struct RolesState {
    pub directory: Arc<dyn DirectoryService>,
    pub verifier: TokenVerifier,
    pub authority: RoleAuthority,
    /// Shared secret expected on lifecycle-hook requests. `None` disables
    /// the check (local development against the mock directory).
    pub hook_secret: Option<String>,
}

impl FromRef<RolesState> for TokenVerifier {
    fn from_ref(state: &RolesState) -> Self {
        state.verifier.clone()
    }
}
