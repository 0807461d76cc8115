//! Predicates: the leaf rules of a struct
//!
//! A predicate judges a [`FieldValue`] and answers with a [`Verdict`]. The
//! verdict may carry a replacement value that the engine writes back into
//! the record (this is how defaults are applied). A failing verdict may
//! carry the nested struct failure that explains it. A predicate may also
//! fail with its own domain error, which the engine reports instead of a
//! plain `InvalidValue`.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use super::errors::{StructError, StructResult};
use super::property::FieldValue;

/// Outcome of a single predicate call
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    /// Whether the value is acceptable
    pub passed: bool,
    /// Value to store under the field instead of the candidate
    pub replacement: Option<Value>,
    /// Why a nested struct rejected the value, when one did
    pub cause: Option<StructError>,
}

impl Verdict {
    pub fn pass() -> Self {
        Self {
            passed: true,
            replacement: None,
            cause: None,
        }
    }

    pub fn fail() -> Self {
        Self {
            passed: false,
            replacement: None,
            cause: None,
        }
    }

    /// Passing verdict that replaces the candidate with `value`
    pub fn pass_with(value: Value) -> Self {
        Self {
            passed: true,
            replacement: Some(value),
            cause: None,
        }
    }

    /// Failing verdict explained by a nested struct failure
    pub fn fail_with(cause: StructError) -> Self {
        Self {
            passed: false,
            replacement: None,
            cause: Some(cause),
        }
    }

    /// Attaches a failure cause to an existing verdict
    pub fn with_cause(mut self, cause: Option<StructError>) -> Self {
        self.cause = cause;
        self
    }

    /// Attaches a replacement to an existing verdict
    pub fn with_replacement(mut self, replacement: Option<Value>) -> Self {
        self.replacement = replacement;
        self
    }
}

impl From<bool> for Verdict {
    fn from(passed: bool) -> Self {
        Self {
            passed,
            replacement: None,
            cause: None,
        }
    }
}

/// Result of calling a predicate
pub type PredicateResult = StructResult<Verdict>;

type CheckFn = dyn Fn(&FieldValue) -> PredicateResult + Send + Sync;

/// A shareable, immutable validation function.
#[derive(Clone)]
pub struct Predicate {
    label: Arc<str>,
    check: Arc<CheckFn>,
}

impl Predicate {
    /// Builds a predicate with the full contract: it sees the missing
    /// marker, may offer a replacement and may fail with a domain error.
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(&FieldValue) -> PredicateResult + Send + Sync + 'static,
    {
        Self {
            label: Arc::from("predicate"),
            check: Arc::new(check),
        }
    }

    /// Builds a predicate from a plain test on present values.
    ///
    /// A missing field never satisfies it.
    pub fn from_fn<F>(test: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self::new(move |candidate| {
            Ok(candidate.as_value().map_or(false, |value| test(value)).into())
        })
    }

    /// Builds a predicate from a test that may reject with a message.
    ///
    /// `Err(message)` becomes a [`StructError::Rejected`].
    pub fn try_from_fn<F>(test: F) -> Self
    where
        F: Fn(&Value) -> Result<bool, String> + Send + Sync + 'static,
    {
        Self::new(move |candidate| match candidate.as_value() {
            Some(value) => test(value).map(Verdict::from).map_err(StructError::Rejected),
            None => Ok(Verdict::fail()),
        })
    }

    /// Sets the label shown in debug output and rule descriptions
    pub fn named(mut self, label: impl Into<String>) -> Self {
        let label: String = label.into();
        self.label = Arc::from(label);
        self
    }

    /// Label of this predicate
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Judges a candidate value
    pub fn check(&self, candidate: &FieldValue) -> PredicateResult {
        (self.check)(candidate)
    }

    /// Judges a present value, ignoring any replacement
    pub fn test(&self, value: &Value) -> StructResult<bool> {
        self.check(&FieldValue::Present(value.clone()))
            .map(|verdict| verdict.passed)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Predicate").field(&self.label).finish()
    }
}
