//! Built-in named predicates
//!
//! These can be referenced by name when declaring an interface:
//!
//! ```ignore
//! Interface::new().field("name", "is_string").field("age", "is_int")
//! ```
//!
//! An unknown name is kept as an unresolved rule and reported as
//! `InvalidRule` when validation reaches it.

use serde_json::Value;

use super::predicate::Predicate;

/// Names accepted by [`lookup`]
pub const NAMES: &[&str] = &[
    "is_string",
    "is_int",
    "is_float",
    "is_numeric",
    "is_bool",
    "is_null",
    "is_array",
    "is_object",
    "is_scalar",
];

/// Resolves a built-in predicate by name
pub fn lookup(name: &str) -> Option<Predicate> {
    let predicate = match name {
        "is_string" => is_string(),
        "is_int" => is_int(),
        "is_float" => is_float(),
        "is_numeric" => is_numeric(),
        "is_bool" => is_bool(),
        "is_null" => is_null(),
        "is_array" => is_array(),
        "is_object" => is_object(),
        "is_scalar" => is_scalar(),
        _ => return None,
    };
    Some(predicate)
}

pub fn is_string() -> Predicate {
    Predicate::from_fn(Value::is_string).named("is_string")
}

/// Integral JSON number
pub fn is_int() -> Predicate {
    Predicate::from_fn(|v| v.is_i64() || v.is_u64()).named("is_int")
}

/// Number stored with a fractional representation; `10` is not a float
pub fn is_float() -> Predicate {
    Predicate::from_fn(Value::is_f64).named("is_float")
}

/// Any number, or a string that parses as one
pub fn is_numeric() -> Predicate {
    Predicate::from_fn(|v| match v {
        Value::Number(_) => true,
        Value::String(s) => s.trim().parse::<f64>().map_or(false, f64::is_finite),
        _ => false,
    })
    .named("is_numeric")
}

pub fn is_bool() -> Predicate {
    Predicate::from_fn(Value::is_boolean).named("is_bool")
}

/// JSON `null`; a missing field is not null
pub fn is_null() -> Predicate {
    Predicate::from_fn(Value::is_null).named("is_null")
}

pub fn is_array() -> Predicate {
    Predicate::from_fn(Value::is_array).named("is_array")
}

pub fn is_object() -> Predicate {
    Predicate::from_fn(Value::is_object).named("is_object")
}

/// String, number or bool
pub fn is_scalar() -> Predicate {
    Predicate::from_fn(|v| v.is_string() || v.is_number() || v.is_boolean()).named("is_scalar")
}
