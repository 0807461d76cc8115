//! Observable validation events
//!
//! Events are explicit and typed.

use std::fmt;

/// Observable events during validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Top-level validation of a record begins
    ValidationStart,
    /// Record satisfied its struct
    ValidationComplete,
    /// Record was rejected
    ValidationFailed,
    /// A single field passed its rule
    FieldChecked,
    /// An absent field received a default value
    DefaultApplied,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ValidationStart => "VALIDATION_START",
            Event::ValidationComplete => "VALIDATION_COMPLETE",
            Event::ValidationFailed => "VALIDATION_FAILED",
            Event::FieldChecked => "FIELD_CHECKED",
            Event::DefaultApplied => "DEFAULT_APPLIED",
        }
    }

    /// Returns true for per-field events, which are logged at TRACE
    pub fn is_fine_grained(&self) -> bool {
        matches!(self, Event::FieldChecked | Event::DefaultApplied)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
