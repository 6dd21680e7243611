//! Role mutation API handler
//!
//! Implements the single role-assignment operation with ordered
//! validation, delegation to the role authority, and one claims write.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use keystead_auth::AuthUser;
use keystead_common::{Error, Result, Role, RoleClaims, ValidatedJson};

use crate::api::middleware::RolesState;
use crate::domain::{Decision, DenyReason};

/// Request for assigning a role to a user.
///
/// `role` stays a raw string through deserialization so an out-of-set
/// value can be reported back by name instead of failing opaquely.
#[derive(Debug, Deserialize, Validate)]
pub struct SetUserRoleRequest {
    /// Identity being assigned
    #[validate(length(min = 1, message = "uid must not be empty"))]
    pub uid: String,

    /// Requested role wire value
    #[validate(length(min = 1, message = "role must not be empty"))]
    pub role: String,
}

/// Response for a successful role assignment
#[derive(Debug, Serialize)]
pub struct SetUserRoleResponse {
    pub message: String,
}

/// Error for a role value outside the closed enumeration, naming the
/// offending value and the valid set.
fn invalid_role_error(value: &str) -> Error {
    Error::InvalidArgument(format!(
        "Invalid role \"{}\"; valid roles are: {}",
        value,
        Role::VALID_VALUES.join(", ")
    ))
}

/// Assign a role to a user
///
/// **POST /v1/roles**
///
/// Validation order is load-bearing: authentication first (the extractor
/// rejects before this body runs), then input shape, then the closed role
/// enumeration, then authorization. Each failure is terminal.
///
/// The effect is one claims-update call carrying both the role and its
/// admin mirror, so no intermediate state with only one of them set is
/// ever observable. Subjects keep their old claims until their next token
/// refresh; this endpoint does not touch live sessions.
pub async fn set_user_role(
    AuthUser(actor): AuthUser,
    State(state): State<RolesState>,
    ValidatedJson(request): ValidatedJson<SetUserRoleRequest>,
) -> Result<Json<SetUserRoleResponse>> {
    let requested =
        Role::parse_strict(&request.role).ok_or_else(|| invalid_role_error(&request.role))?;

    let decision = state
        .authority
        .authorize(Some(&actor), &request.uid, requested)
        .await?;

    let grant = match decision {
        Decision::Allow(grant) => grant,
        Decision::Deny(DenyReason::Unauthenticated) => {
            return Err(Error::Unauthenticated("Authentication required".to_string()));
        }
        Decision::Deny(DenyReason::SelfDemotion) => {
            return Err(Error::PermissionDenied(
                "Administrators cannot remove their own admin role".to_string(),
            ));
        }
        // Low-detail by design: a deny must not reveal whether the subject
        // exists or what role it holds.
        Decision::Deny(DenyReason::NotPermitted) => {
            return Err(Error::PermissionDenied("Not permitted".to_string()));
        }
    };

    state
        .directory
        .set_role_claims(&request.uid, RoleClaims::for_role(requested))
        .await
        .map_err(|e| Error::Internal(format!("Failed to update role claims: {}", e)))?;

    tracing::info!(
        actor = %actor.uid,
        subject = %request.uid,
        role = %requested,
        grant = ?grant,
        "Role assigned"
    );

    Ok(Json(SetUserRoleResponse {
        message: format!("Role {} assigned to user {}", requested, request.uid),
    }))
}
