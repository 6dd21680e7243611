//! Keystead application composition root
//!
//! Composes the roles domain router with its collaborators.

use std::sync::Arc;

use axum::Router;
use keystead_auth::{AuthConfig, TokenVerifier};
use keystead_common::Config;
use keystead_directory::{DirectoryConfig, DirectoryService, DirectoryServiceFactory};
use keystead_roles::{RoleAuthority, RolesState};

/// Create the main application router with all routes and middleware
pub async fn create_app(config: Config) -> Result<Router, anyhow::Error> {
    // Create the directory service from environment
    let directory_config = DirectoryConfig::from_env()?;
    let directory: Arc<dyn DirectoryService> =
        Arc::from(DirectoryServiceFactory::create(directory_config)?);

    // Token verification against the identity provider's signing secret
    let verifier = TokenVerifier::new(AuthConfig {
        jwt_secret: config.jwt_secret.clone(),
        issuer: config.jwt_issuer.clone(),
        audience: config.jwt_audience.clone(),
    });

    let authority = RoleAuthority::new(
        Arc::clone(&directory),
        config.bootstrap_admin_email.clone(),
    );

    let roles_state = RolesState {
        directory,
        verifier,
        authority,
        hook_secret: config.hook_secret.clone(),
    };

    // Build router — compose domain routes with shared infrastructure routes
    let app = Router::new()
        .route("/health", axum::routing::get(health_check))
        .route(
            "/",
            axum::routing::get(|| async { "Keystead Role Service v0.1.0" }),
        )
        .merge(keystead_roles::routes().with_state(roles_state));

    Ok(app)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
