//! HTTP API layer for the roles domain

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use middleware::RolesState;
pub use routes::routes;
