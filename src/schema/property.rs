//! Candidate values handed to field rules
//!
//! A field that is absent from the record is represented by [`Missing`],
//! never by JSON `null`. Rules see either a present value or the marker.

use std::fmt;

use serde_json::Value;

/// Marker for a field that the record does not contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Missing {
    name: String,
}

impl Missing {
    /// Creates the marker for the named field
    pub fn property(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Name of the absent field
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<missing '{}'>", self.name)
    }
}

/// The value a rule is asked to judge.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// The record has no such key
    Missing(Missing),
    /// The record holds this value, possibly `null`
    Present(Value),
}

impl FieldValue {
    /// Looks `field` up in `record`
    pub fn lookup(record: &serde_json::Map<String, Value>, field: &str) -> Self {
        match record.get(field) {
            Some(value) => FieldValue::Present(value.clone()),
            None => FieldValue::Missing(Missing::property(field)),
        }
    }

    /// Returns true for the missing marker
    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing(_))
    }

    /// Returns the present value, if any
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            FieldValue::Present(value) => Some(value),
            FieldValue::Missing(_) => None,
        }
    }

    /// Consumes the candidate, returning the present value
    pub fn into_value(self) -> Option<Value> {
        match self {
            FieldValue::Present(value) => Some(value),
            FieldValue::Missing(_) => None,
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        FieldValue::Present(value)
    }
}

impl From<Missing> for FieldValue {
    fn from(missing: Missing) -> Self {
        FieldValue::Missing(missing)
    }
}

/// Returns true if `value` is the missing marker.
///
/// Custom predicates built with [`Predicate::new`](super::Predicate::new)
/// can use this to treat absence explicitly.
pub fn is_missing(value: &FieldValue) -> bool {
    value.is_missing()
}
