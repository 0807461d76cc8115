//! structcheck - declarative structural validation for JSON records
//!
//! Describe the shape of a record as a named [`Struct`], compose field
//! rules from built-in predicates and combinators, and validate records
//! against it:
//!
//! ```
//! use serde_json::json;
//! use structcheck::{array_of, optional_or, validate, Interface, Struct};
//!
//! let book = Struct::new(
//!     "Book",
//!     Interface::new()
//!         .field("title", "is_string")
//!         .field("tags", array_of("is_string"))
//!         .field("edition", optional_or("is_int", 1)),
//! );
//!
//! let mut record = json!({ "title": "a book", "tags": ["rust"] });
//! validate(&mut record, &book).unwrap();
//! assert_eq!(record["edition"], json!(1));
//! ```

pub mod observability;
pub mod schema;

pub use schema::{
    all_of, any_of, array_of, builtin, class_of, is_missing, not, optional, optional_or, validate,
    validate_interface, FieldValue, Interface, Missing, Predicate, PredicateResult, Rule, Struct,
    StructError, StructErrorCode, StructResult, TypeTag, Validator, ValidatorConfig, Verdict,
};
