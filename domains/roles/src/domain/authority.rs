//! Role authority
//!
//! Decides whether a caller may assign a role to a subject. The rules live
//! in [`decide`], a pure function over already-fetched facts, so the whole
//! decision table is unit-testable without I/O. [`RoleAuthority::authorize`]
//! wraps it and performs the single directory lookup (the subject's stored
//! email) only when the bootstrap exception is reachable.
//!
//! The bootstrap exception is the only way into the admin role without an
//! existing admin: the configured operator account may promote itself,
//! once authenticated. It is keyed on uid equality, so granting admin to a
//! *different* account is structurally impossible even if that account's
//! email collided with the bootstrap email.

use std::sync::Arc;

use keystead_auth::Actor;
use keystead_common::{Error, Role};
use keystead_directory::{DirectoryError, DirectoryService};

/// Why an assignment was allowed. Recorded in logs for audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grant {
    /// The caller's verified token carries the admin claim.
    AdminActor,
    /// The bootstrap exception: the operator account promoting itself.
    Bootstrap,
}

/// Why an assignment was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// No verified caller identity.
    Unauthenticated,
    /// An admin may not remove their own admin role; a system that reaches
    /// zero admins has no way back in through this endpoint.
    SelfDemotion,
    /// Caller lacks privilege.
    NotPermitted,
}

/// Outcome of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow(Grant),
    Deny(DenyReason),
}

/// Pure decision over fetched facts. Same inputs, same decision.
///
/// `subject_email` is the subject's email as stored by the directory —
/// never a caller-asserted value. `None` covers both "no stored email"
/// and "lookup not performed"; the bootstrap branch denies either way.
pub fn decide(
    actor: Option<&Actor>,
    subject_uid: &str,
    subject_email: Option<&str>,
    requested: Role,
    bootstrap_email: &str,
) -> Decision {
    let Some(actor) = actor else {
        return Decision::Deny(DenyReason::Unauthenticated);
    };

    if actor.is_admin() {
        if actor.uid == subject_uid && requested != Role::Admin {
            return Decision::Deny(DenyReason::SelfDemotion);
        }
        return Decision::Allow(Grant::AdminActor);
    }

    // Bootstrap exception: self-targeted admin grant by the operator
    // account, matched against the directory's stored email.
    if requested == Role::Admin
        && actor.uid == subject_uid
        && subject_email == Some(bootstrap_email)
    {
        return Decision::Allow(Grant::Bootstrap);
    }

    Decision::Deny(DenyReason::NotPermitted)
}

/// Returns whether [`decide`] could reach the bootstrap branch for these
/// inputs, i.e. whether the subject-email lookup is worth performing.
fn bootstrap_reachable(actor: &Actor, subject_uid: &str, requested: Role) -> bool {
    !actor.is_admin() && requested == Role::Admin && actor.uid == subject_uid
}

/// The authorization decision point for role assignment.
#[derive(Clone)]
pub struct RoleAuthority {
    directory: Arc<dyn DirectoryService>,
    bootstrap_email: String,
}

impl RoleAuthority {
    pub fn new(directory: Arc<dyn DirectoryService>, bootstrap_email: String) -> Self {
        Self {
            directory,
            bootstrap_email,
        }
    }

    /// Decide whether `actor` may set `requested` on `subject_uid`.
    ///
    /// Performs at most one directory lookup, and only when the bootstrap
    /// exception is reachable. A directory failure during that lookup is an
    /// error, never an allow.
    pub async fn authorize(
        &self,
        actor: Option<&Actor>,
        subject_uid: &str,
        requested: Role,
    ) -> Result<Decision, Error> {
        let subject_email = match actor {
            Some(a) if bootstrap_reachable(a, subject_uid, requested) => {
                match self.directory.get_user(subject_uid).await {
                    Ok(subject) => subject.email,
                    // Unknown subject: fall through to a plain deny so the
                    // response does not reveal whether the account exists.
                    Err(DirectoryError::UserNotFound(_)) => None,
                    Err(e) => {
                        return Err(Error::Internal(format!(
                            "Failed to load subject for authorization: {}",
                            e
                        )));
                    }
                }
            }
            _ => None,
        };

        Ok(decide(
            actor,
            subject_uid,
            subject_email.as_deref(),
            requested,
            &self.bootstrap_email,
        ))
    }
}
