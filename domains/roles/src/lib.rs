//! Roles domain: role authority, callable endpoints, default-role trigger
//!
//! The security-critical core of Keystead. A small amount of carefully
//! ordered logic: the authority decides, the mutation endpoint writes role
//! claims, the listing endpoint projects them, and the lifecycle trigger
//! assigns the baseline role to every new account.

pub mod api;
pub mod domain;

pub use api::{routes, RolesState};
pub use domain::{assign_default_role, decide, Decision, DenyReason, Grant, RoleAuthority};
