//! Shared vocabulary, configuration, and error handling for Keystead
//!
//! This crate provides common functionality used across the Keystead role
//! service:
//! - Configuration management following 12-factor principles
//! - The four-code error taxonomy shared by every callable operation
//! - The role vocabulary (`Role`, `RoleClaims`)
//! - Reusable axum extractors

pub mod config;
pub mod error;
pub mod extractors;
pub mod role;

pub use config::Config;
pub use error::{Error, Result};
pub use extractors::ValidatedJson;
pub use role::{Role, RoleClaims};
