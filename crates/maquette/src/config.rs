//! Configuration types for the introspection engine.
//!
//! This module provides configuration structures that control how type
//! names are classified. All types implement [`serde::Deserialize`] for
//! flexible loading from external sources.
//!
//! # Example
//!
//! ```
//! # use maquette::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert!(config.policy().is_primitive("int"));
//! ```

use serde::Deserialize;

use crate::policy::TypePolicy;

/// Top-level application configuration.
///
/// Currently holds the [`TypePolicy`] section; fields that are not set
/// fall back to the policy defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Type classification policy section.
    #[serde(default)]
    policy: TypePolicy,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified classification policy.
    pub fn new(policy: TypePolicy) -> Self {
        Self { policy }
    }

    /// Returns the type classification policy.
    pub fn policy(&self) -> &TypePolicy {
        &self.policy
    }
}
