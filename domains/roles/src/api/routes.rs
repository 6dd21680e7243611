//! Route definitions for the roles domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{hooks, roles, users};
use super::middleware::RolesState;

/// Create role management routes
fn role_routes() -> Router<RolesState> {
    Router::new()
        .route("/v1/roles", post(roles::set_user_role))
        .route("/v1/users", get(users::list_users_with_roles))
}

/// Create identity lifecycle hook routes
fn hook_routes() -> Router<RolesState> {
    Router::new().route("/v1/hooks/identity-created", post(hooks::identity_created))
}

/// Create all roles domain API routes
pub fn routes() -> Router<RolesState> {
    Router::new().merge(role_routes()).merge(hook_routes())
}
