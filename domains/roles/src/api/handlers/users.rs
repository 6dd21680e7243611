//! User listing API handler

use axum::{extract::State, Json};
use serde::Serialize;

use keystead_auth::AuthUser;
use keystead_common::{Error, Result, Role};
use keystead_directory::IdentityRecord;

use crate::api::middleware::RolesState;

/// Upper bound on continuation-token pages followed in one listing.
/// Guards against a misbehaving store handing back a token loop.
const MAX_LIST_PAGES: usize = 1000;

/// One identity as shown in the admin dashboard.
///
/// `role` is normalized to the closed enumeration; a stored claim outside
/// it projects as `none` rather than passing through raw. Timestamps are
/// the provider's formatted strings, uninterpreted.
#[derive(Debug, Serialize)]
pub struct DisplayUser {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub role: Role,
    pub disabled: bool,
    pub creation_time: String,
    pub last_sign_in_time: String,
}

impl From<IdentityRecord> for DisplayUser {
    fn from(record: IdentityRecord) -> Self {
        let role = record.role();
        Self {
            uid: record.uid,
            email: record.email,
            display_name: record.display_name,
            role,
            disabled: record.disabled,
            creation_time: record.created_at,
            last_sign_in_time: record.last_sign_in_at,
        }
    }
}

/// Response for the user listing operation
#[derive(Debug, Serialize)]
pub struct ListUsersResponse {
    pub users: Vec<DisplayUser>,
}

/// List every identity with its role
///
/// **GET /v1/users**
///
/// Admin only, checked before any directory I/O; there is no bootstrap
/// carve-out here — the bootstrap operator must self-promote (and refresh
/// their token) before they can list users. Follows the continuation-token
/// chain to exhaustion and returns everyone in one response; the unbounded
/// response size is an accepted scaling limit. Any directory error aborts
/// the whole listing — a partial admin-visible list could mask missing
/// accounts.
pub async fn list_users_with_roles(
    AuthUser(actor): AuthUser,
    State(state): State<RolesState>,
) -> Result<Json<ListUsersResponse>> {
    if !actor.is_admin() {
        return Err(Error::PermissionDenied("Not permitted".to_string()));
    }

    let mut users = Vec::new();
    let mut page_token: Option<String> = None;

    for _ in 0..MAX_LIST_PAGES {
        let page = state
            .directory
            .list_users(page_token.as_deref())
            .await
            .map_err(|e| Error::Internal(format!("Failed to list users: {}", e)))?;

        users.extend(page.users.into_iter().map(DisplayUser::from));

        match page.next_page_token {
            Some(token) => page_token = Some(token),
            None => {
                tracing::debug!(count = users.len(), actor = %actor.uid, "User listing complete");
                return Ok(Json(ListUsersResponse { users }));
            }
        }
    }

    Err(Error::Internal(format!(
        "User listing did not terminate after {} pages",
        MAX_LIST_PAGES
    )))
}
