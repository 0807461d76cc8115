//! Struct validation subsystem
//!
//! A [`Struct`] names a set of expected fields and a rule for each. Records
//! are JSON objects; [`validate`] checks one against a struct, writes
//! defaults into it, and reports the first failure as a chained
//! [`StructError`].
//!
//! # Design Principles
//!
//! - Structs are immutable and shareable across threads
//! - Absence is a variant ([`FieldValue::Missing`]), never `null`
//! - Rules are resolved when the interface is built
//! - Every declared field is checked before success is reported
//! - Failures are wrapped exactly once per struct boundary

mod combinators;
mod config;
mod errors;
mod predicate;
mod property;
mod type_tag;
mod types;
mod validator;

pub mod builtin;

pub use combinators::{all_of, any_of, array_of, class_of, not, optional, optional_or};
pub use config::ValidatorConfig;
pub use errors::{StructError, StructErrorCode, StructResult};
pub use predicate::{Predicate, PredicateResult, Verdict};
pub use property::{is_missing, FieldValue, Missing};
pub use type_tag::TypeTag;
pub use types::{Interface, Rule, Struct, ANONYMOUS_STRUCT_NAME};
pub use validator::{validate, validate_interface, Validator};
