//! Struct validator for records
//!
//! Validation semantics:
//! - The record must be an object
//! - Exhaustive structs reject undeclared keys
//! - Every declared field is checked, in declaration order
//! - Absent fields are handed to their rule as the missing marker
//! - Replacements offered by predicates are written back into the record
//! - Nested structs never default: an absent nested field is an error
//!
//! Every failure is wrapped exactly once per struct boundary, so a failure
//! deep inside nested structs reads outer struct → inner struct → leaf.
//!
//! Mutation is not transactional: defaults applied before a failing field
//! stay in the record.

use serde_json::Value;

use crate::observability::{self, log_event_with_fields, Event};

use super::config::ValidatorConfig;
use super::errors::{StructError, StructResult};
use super::property::FieldValue;
use super::type_tag::TypeTag;
use super::types::{Interface, Rule, Struct};

/// Validates records against structs.
///
/// Holds only configuration; structs are passed per call and are never
/// mutated, so one validator can serve any number of structs.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    /// Creates a validator with the given configuration.
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validates `record` against `schema`, applying defaults in place.
    ///
    /// # Errors
    ///
    /// Returns `StructError::StructValidationFailed` naming `schema`, whose
    /// cause chain leads to the failing field:
    /// - undeclared keys in an exhaustive struct (STRUCT_UNEXPECTED_PROPERTY)
    /// - a rule rejecting its value (STRUCT_INVALID_VALUE)
    /// - an absent nested struct field (STRUCT_MISSING_PROPERTY)
    /// - an unresolved rule (STRUCT_INVALID_RULE)
    /// - a domain error from a custom predicate (STRUCT_REJECTED)
    pub fn validate(&self, record: &mut Value, schema: &Struct) -> StructResult<()> {
        log_event_with_fields(Event::ValidationStart, &[("struct", schema.name())]);

        match check_struct(record, schema) {
            Ok(()) => {
                log_event_with_fields(Event::ValidationComplete, &[("struct", schema.name())]);
                Ok(())
            }
            Err(err) => {
                observability::log_failure(self.config.failure_level, schema.name(), &err);
                Err(err)
            }
        }
    }

    /// Validates `record` against a raw interface, treated as a
    /// non-exhaustive struct named after `anonymous_name`.
    pub fn validate_interface(&self, record: &mut Value, interface: Interface) -> StructResult<()> {
        let schema = Struct::of(self.config.anonymous_name.clone(), interface, false);
        self.validate(record, &schema)
    }
}

/// Validates `record` against `schema` with the default configuration.
///
/// See [`Validator::validate`].
pub fn validate(record: &mut Value, schema: &Struct) -> StructResult<()> {
    Validator::default().validate(record, schema)
}

/// Validates `record` against a raw interface with the default
/// configuration. See [`Validator::validate_interface`].
pub fn validate_interface(record: &mut Value, interface: Interface) -> StructResult<()> {
    Validator::default().validate_interface(record, interface)
}

/// Recursive entry point shared by nested structs and combinators.
pub(crate) fn check_struct(record: &mut Value, schema: &Struct) -> StructResult<()> {
    check_fields(record, schema).map_err(|err| err.wrap_once(schema.name()))
}

fn check_fields(record: &mut Value, schema: &Struct) -> StructResult<()> {
    let obj = match record.as_object_mut() {
        Some(obj) => obj,
        None => return Err(StructError::NotAnObject(TypeTag::of(record).to_string())),
    };

    if schema.is_exhaustive() {
        let unexpected: Vec<String> = obj
            .keys()
            .filter(|key| !schema.interface().contains_key(key))
            .cloned()
            .collect();
        if !unexpected.is_empty() {
            return Err(StructError::UnexpectedProperty(unexpected));
        }
    }

    for (field, rule) in schema.interface().iter() {
        match rule {
            Rule::Predicate(predicate) => {
                let candidate = FieldValue::lookup(obj, field);
                let verdict = predicate
                    .check(&candidate)
                    .map_err(|err| attach_nested_failure(field, err))?;

                if !verdict.passed {
                    return Err(match verdict.cause {
                        Some(cause) => StructError::invalid_value_caused_by(field, cause),
                        None => StructError::invalid_value(field),
                    });
                }

                if let Some(replacement) = verdict.replacement {
                    if candidate.is_missing() {
                        log_event_with_fields(
                            Event::DefaultApplied,
                            &[("field", field), ("struct", schema.name())],
                        );
                    }
                    obj.insert(field.to_string(), replacement);
                }
            }
            Rule::Struct(nested) => {
                let value = obj
                    .get_mut(field)
                    .ok_or_else(|| StructError::MissingProperty(field.to_string()))?;
                check_struct(value, nested)
                    .map_err(|cause| StructError::invalid_value_caused_by(field, cause))?;
            }
            Rule::Unresolved(name) => {
                return Err(StructError::InvalidRule(name.clone()));
            }
        }

        log_event_with_fields(Event::FieldChecked, &[("field", field), ("struct", schema.name())]);
    }

    Ok(())
}

/// Ties an error raised inside a nested struct (for example a domain error
/// from an `array_of(struct)` element) to the field being checked. Other
/// errors pass through untouched.
fn attach_nested_failure(field: &str, err: StructError) -> StructError {
    match err {
        nested @ StructError::StructValidationFailed { .. } => {
            StructError::invalid_value_caused_by(field, nested)
        }
        other => other,
    }
}
