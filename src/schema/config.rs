//! Validator configuration
//!
//! Hosts can embed this in their own configuration file; every field has a
//! default, so `{}` is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::observability::Severity;

use super::types::ANONYMOUS_STRUCT_NAME;

/// Configuration for a [`Validator`](super::Validator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Name given to the struct built from a raw interface passed to
    /// `validate_interface`.
    pub anonymous_name: String,
    /// Severity at which rejected records are logged.
    pub failure_level: Severity,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            anonymous_name: ANONYMOUS_STRUCT_NAME.to_string(),
            failure_level: Severity::Debug,
        }
    }
}

impl ValidatorConfig {
    /// Config that never logs rejected records
    pub fn quiet() -> Self {
        Self {
            failure_level: Severity::Off,
            ..Self::default()
        }
    }

    /// Config that logs rejected records at WARN
    pub fn loud() -> Self {
        Self {
            failure_level: Severity::Warn,
            ..Self::default()
        }
    }

    /// Overrides the anonymous struct name
    pub fn with_anonymous_name(mut self, name: impl Into<String>) -> Self {
        self.anonymous_name = name.into();
        self
    }
}
