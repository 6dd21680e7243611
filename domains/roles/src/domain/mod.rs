//! Roles domain logic

pub mod authority;
pub mod trigger;

pub use authority::{decide, Decision, DenyReason, Grant, RoleAuthority};
pub use trigger::assign_default_role;
