//! Settings schema definitions.
//!
//! This module defines the settings structure for the configuration form.
//! All types derive Serde traits for deserialization from a TOML file.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Namespace of the connector configuration document.
pub const CONFIGURATION_NAMESPACE: &str = "http://genldap.coe.cordys.com/1.2/configuration";

/// Root settings for the configuration form.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Document transformation rules.
    pub transform: TransformConfig,

    /// Developer aids.
    pub debug: DebugConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Rules applied by the load and save paths.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Namespace of the `configuration` element.
    pub namespace: String,

    /// Require `configuration` and `server` to be in `namespace` when locating
    /// the configuration node. Off by default: local names are enough.
    pub strict_namespace: bool,

    /// Local name of elements whose text is a stored password.
    pub password_element: String,

    /// Qualified names of editor bookkeeping attributes removed on save.
    pub bookkeeping_attributes: Vec<String>,

    /// Optional template document used when no configuration is found.
    /// The built-in template is used when unset.
    pub template_path: Option<PathBuf>,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            namespace: CONFIGURATION_NAMESPACE.to_string(),
            strict_namespace: false,
            password_element: "password".to_string(),
            bookkeeping_attributes: vec![
                "inserted".to_string(),
                "sync_id".to_string(),
                "clientattr:sync_id".to_string(),
            ],
            template_path: None,
        }
    }
}

impl TransformConfig {
    /// Namespace to enforce during lookup, if strict matching is on.
    pub fn required_namespace(&self) -> Option<&str> {
        self.strict_namespace.then_some(self.namespace.as_str())
    }
}

/// Developer aids.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DebugConfig {
    /// Users for whom the test-save control is shown and debug events are logged.
    pub users: Vec<String>,
}

impl DebugConfig {
    pub fn is_debug_user(&self, user: &str) -> bool {
        self.users.iter().any(|u| u == user)
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log line format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}
