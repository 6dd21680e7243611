//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config. The bootstrap operator's
//! email in particular must never be a literal in code.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Email of the operator account allowed to bootstrap itself into the
    /// first administrator. Checked against the identity provider's stored
    /// email, never against caller-asserted input.
    pub bootstrap_admin_email: String,

    /// Secret for verifying the identity provider's HS256 tokens
    pub jwt_secret: String,
    pub jwt_issuer: Option<String>,
    pub jwt_audience: Option<String>,

    /// Shared secret the identity provider presents on lifecycle hooks
    pub hook_secret: Option<String>,

    /// Runtime configuration
    pub log_level: String,
    pub rust_log: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let config = Self {
            bootstrap_admin_email: env::var("BOOTSTRAP_ADMIN_EMAIL")
                .map_err(|_| anyhow::anyhow!("BOOTSTRAP_ADMIN_EMAIL is required"))?,

            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET is required"))?,
            jwt_issuer: env::var("JWT_ISSUER").ok(),
            jwt_audience: env::var("JWT_AUDIENCE").ok(),

            hook_secret: env::var("HOOK_SECRET").ok(),

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "keystead=debug".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
        };

        Ok(config)
    }
}
