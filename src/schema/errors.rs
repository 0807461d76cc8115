//! Struct validation error types
//!
//! Error codes:
//! - STRUCT_UNEXPECTED_PROPERTY
//! - STRUCT_MISSING_PROPERTY
//! - STRUCT_INVALID_VALUE
//! - STRUCT_INVALID_RULE
//! - STRUCT_NOT_AN_OBJECT
//! - STRUCT_REJECTED
//! - STRUCT_VALIDATION_FAILED
//!
//! Every failure leaving [`validate`](super::validate) is a
//! `StructValidationFailed` whose `cause` chain leads to the leaf failure.

use std::fmt;

use thiserror::Error;

/// Stable error codes for each failure kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructErrorCode {
    /// Record holds keys the exhaustive struct does not declare
    UnexpectedProperty,
    /// Nested struct field had no value
    MissingProperty,
    /// Field rule rejected the value
    InvalidValue,
    /// Field rule cannot be evaluated
    InvalidRule,
    /// Value handed to the engine is not an object
    NotAnObject,
    /// Domain error raised by a custom predicate
    Rejected,
    /// Top-level wrapper naming the failing struct
    StructValidationFailed,
}

impl StructErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            StructErrorCode::UnexpectedProperty => "STRUCT_UNEXPECTED_PROPERTY",
            StructErrorCode::MissingProperty => "STRUCT_MISSING_PROPERTY",
            StructErrorCode::InvalidValue => "STRUCT_INVALID_VALUE",
            StructErrorCode::InvalidRule => "STRUCT_INVALID_RULE",
            StructErrorCode::NotAnObject => "STRUCT_NOT_AN_OBJECT",
            StructErrorCode::Rejected => "STRUCT_REJECTED",
            StructErrorCode::StructValidationFailed => "STRUCT_VALIDATION_FAILED",
        }
    }
}

impl fmt::Display for StructErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Struct validation failure
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StructError {
    #[error("Unexpected {} '{}'", property_noun(.0), join_fields(.0))]
    UnexpectedProperty(Vec<String>),

    #[error("Missing value for property: '{0}'")]
    MissingProperty(String),

    #[error("Invalid value for property '{field}'{}", cause_suffix(.cause))]
    InvalidValue {
        field: String,
        #[source]
        cause: Option<Box<StructError>>,
    },

    #[error("Cannot use '{0}' as struct value validator")]
    InvalidRule(String),

    #[error("Expected an object to validate, got {0}")]
    NotAnObject(String),

    #[error("{0}")]
    Rejected(String),

    #[error("Struct '{name}' failed validation: {cause}")]
    StructValidationFailed {
        name: String,
        #[source]
        cause: Box<StructError>,
    },
}

impl StructError {
    /// Invalid value with no further cause
    pub fn invalid_value(field: impl Into<String>) -> Self {
        StructError::InvalidValue {
            field: field.into(),
            cause: None,
        }
    }

    /// Invalid value caused by a nested failure
    pub fn invalid_value_caused_by(field: impl Into<String>, cause: StructError) -> Self {
        StructError::InvalidValue {
            field: field.into(),
            cause: Some(Box::new(cause)),
        }
    }

    /// Domain error for custom predicates
    pub fn rejected(message: impl Into<String>) -> Self {
        StructError::Rejected(message.into())
    }

    /// Wraps `self` in a `StructValidationFailed` for `name`, unless it
    /// already is one.
    pub fn wrap_once(self, name: &str) -> Self {
        match self {
            wrapped @ StructError::StructValidationFailed { .. } => wrapped,
            cause => StructError::StructValidationFailed {
                name: name.to_string(),
                cause: Box::new(cause),
            },
        }
    }

    /// Returns the error code
    pub fn code(&self) -> StructErrorCode {
        match self {
            StructError::UnexpectedProperty(_) => StructErrorCode::UnexpectedProperty,
            StructError::MissingProperty(_) => StructErrorCode::MissingProperty,
            StructError::InvalidValue { .. } => StructErrorCode::InvalidValue,
            StructError::InvalidRule(_) => StructErrorCode::InvalidRule,
            StructError::NotAnObject(_) => StructErrorCode::NotAnObject,
            StructError::Rejected(_) => StructErrorCode::Rejected,
            StructError::StructValidationFailed { .. } => StructErrorCode::StructValidationFailed,
        }
    }

    /// Name of the struct this error was raised for, if it is a wrapper
    pub fn struct_name(&self) -> Option<&str> {
        match self {
            StructError::StructValidationFailed { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Field this error points at, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            StructError::InvalidValue { field, .. } | StructError::MissingProperty(field) => {
                Some(field)
            }
            _ => None,
        }
    }

    /// The next error down the chain
    pub fn cause(&self) -> Option<&StructError> {
        match self {
            StructError::InvalidValue { cause, .. } => cause.as_deref(),
            StructError::StructValidationFailed { cause, .. } => Some(cause),
            _ => None,
        }
    }

    /// The innermost error of the chain
    pub fn root_cause(&self) -> &StructError {
        let mut current = self;
        while let Some(next) = current.cause() {
            current = next;
        }
        current
    }

    /// Names of the structs along the chain, outermost first
    pub fn chain(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut current = Some(self);
        while let Some(err) = current {
            if let Some(name) = err.struct_name() {
                names.push(name);
            }
            current = err.cause();
        }
        names
    }

    /// Whether the chain ends in bad data rather than a domain error or a
    /// broken rule.
    ///
    /// Combinators turn data failures of struct members into a failing
    /// verdict; anything else propagates.
    pub fn is_data_failure(&self) -> bool {
        !matches!(
            self.root_cause(),
            StructError::Rejected(_) | StructError::InvalidRule(_)
        )
    }
}

fn property_noun(fields: &[String]) -> &'static str {
    if fields.len() == 1 {
        "property"
    } else {
        "properties"
    }
}

fn join_fields(fields: &[String]) -> String {
    fields.join(", ")
}

fn cause_suffix(cause: &Option<Box<StructError>>) -> String {
    cause.as_ref().map(|c| format!(": {}", c)).unwrap_or_default()
}

/// Result type for struct validation
pub type StructResult<T> = Result<T, StructError>;
