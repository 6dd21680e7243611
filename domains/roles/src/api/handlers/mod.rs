//! API request handlers for the roles domain

pub mod hooks;
pub mod roles;
pub mod users;
