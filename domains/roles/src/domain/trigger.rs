//! Default role assignment
//!
//! Runs once per newly created identity. Fire-and-forget relative to
//! account creation: a directory failure here is logged and swallowed, the
//! account is simply left without a role claim (reads as `none`) until an
//! admin corrects it. There is no automatic retry target and no caller to
//! report to.

use keystead_common::{Role, RoleClaims};
use keystead_directory::DirectoryService;

/// Assign the baseline role to a newly created identity.
///
/// Every new account starts as `tenant`. The first administrator is not
/// minted here: the bootstrap operator self-promotes through the role
/// mutation endpoint, where the grant has an authenticated actor and an
/// audit trail.
pub async fn assign_default_role(directory: &dyn DirectoryService, uid: &str) {
    match directory
        .set_role_claims(uid, RoleClaims::for_role(Role::Tenant))
        .await
    {
        Ok(()) => {
            tracing::info!(uid = %uid, role = %Role::Tenant, "Default role assigned");
        }
        Err(e) => {
            tracing::error!(
                error = %e,
                uid = %uid,
                "Failed to assign default role; account left without a role claim"
            );
        }
    }
}
