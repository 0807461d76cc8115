//! Observability for structcheck
//!
//! Validation lifecycle events are emitted through `tracing`:
//! - `VALIDATION_START` / `VALIDATION_COMPLETE` at DEBUG
//! - `VALIDATION_FAILED` at the configured severity
//! - `FIELD_CHECKED` / `DEFAULT_APPLIED` at TRACE
//!
//! Observability is read-only: it has no effect on validation results.
//!
//! # Usage
//!
//! ```ignore
//! use structcheck::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::ValidationStart, &[("struct", "Event")]);
//! ```

use std::fmt;

mod events;
mod logger;

pub use events::Event;
pub use logger::{log, render_fields, Severity};

/// Log a lifecycle event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_fine_grained() {
        Severity::Trace
    } else {
        Severity::Debug
    };
    log(severity, event.as_str(), fields);
}

/// Log a rejected record at `severity`.
///
/// `error` is only formatted when the level is enabled.
pub fn log_failure(severity: Severity, struct_name: &str, error: &dyn fmt::Display) {
    if !severity.is_enabled() {
        return;
    }
    let error = error.to_string();
    log(
        severity,
        Event::ValidationFailed.as_str(),
        &[("error", error.as_str()), ("struct", struct_name)],
    );
}
