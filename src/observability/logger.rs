//! Structured event logging on top of `tracing`
//!
//! - One log line = one event
//! - Fields rendered in deterministic (alphabetical) order
//! - Failure severity is configurable; the crate never installs a subscriber

use std::fmt;

use serde::{Deserialize, Serialize};

/// Level at which rejected records are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Not reported
    Off,
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Off => "OFF",
            Severity::Trace => "TRACE",
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }

    /// Whether an event at this severity would reach the current subscriber
    pub fn is_enabled(&self) -> bool {
        match self {
            Severity::Off => false,
            Severity::Trace => tracing::enabled!(tracing::Level::TRACE),
            Severity::Debug => tracing::enabled!(tracing::Level::DEBUG),
            Severity::Info => tracing::enabled!(tracing::Level::INFO),
            Severity::Warn => tracing::enabled!(tracing::Level::WARN),
            Severity::Error => tracing::enabled!(tracing::Level::ERROR),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Emits `event` with `fields` at `severity`.
///
/// Nothing is rendered unless the level is enabled.
pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
    if !severity.is_enabled() {
        return;
    }
    let fields = render_fields(fields);
    match severity {
        Severity::Off => {}
        Severity::Trace => tracing::trace!(fields = %fields, "{}", event),
        Severity::Debug => tracing::debug!(fields = %fields, "{}", event),
        Severity::Info => tracing::info!(fields = %fields, "{}", event),
        Severity::Warn => tracing::warn!(fields = %fields, "{}", event),
        Severity::Error => tracing::error!(fields = %fields, "{}", event),
    }
}

/// Renders `key=value` pairs sorted by key.
///
/// Values containing whitespace, quotes or `=` are quoted.
pub fn render_fields(fields: &[(&str, &str)]) -> String {
    let mut sorted: Vec<_> = fields.iter().collect();
    sorted.sort_by_key(|(k, _)| *k);

    let mut output = String::with_capacity(64);
    for (i, (key, value)) in sorted.into_iter().enumerate() {
        if i > 0 {
            output.push(' ');
        }
        output.push_str(key);
        output.push('=');
        if value.is_empty() || value.contains(|c: char| c.is_whitespace() || c == '"' || c == '=') {
            output.push_str(&format!("{:?}", value));
        } else {
            output.push_str(value);
        }
    }
    output
}
