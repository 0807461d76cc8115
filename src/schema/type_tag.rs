//! Runtime type tags for JSON values
//!
//! Tags form a small hierarchy:
//! - any
//!   - null, bool, array, object
//!   - number: int, float
//!   - string: datetime (RFC 3339)
//!
//! [`class_of`](super::class_of) accepts a value whose tag is the requested
//! one or derives from it.

use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Declared type identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    /// Root of the hierarchy
    Any,
    Null,
    Bool,
    /// Any JSON number
    Number,
    /// Number stored as an integer
    #[serde(rename = "int")]
    Integer,
    /// Number stored with a fractional representation
    Float,
    String,
    /// String holding an RFC 3339 timestamp
    DateTime,
    Array,
    Object,
}

impl TypeTag {
    /// Returns the tag name used in messages and parsing
    pub fn type_name(&self) -> &'static str {
        match self {
            TypeTag::Any => "any",
            TypeTag::Null => "null",
            TypeTag::Bool => "bool",
            TypeTag::Number => "number",
            TypeTag::Integer => "int",
            TypeTag::Float => "float",
            TypeTag::String => "string",
            TypeTag::DateTime => "datetime",
            TypeTag::Array => "array",
            TypeTag::Object => "object",
        }
    }

    /// Direct parent in the hierarchy; `None` only for `Any`
    pub fn parent(&self) -> Option<TypeTag> {
        match self {
            TypeTag::Any => None,
            TypeTag::Integer | TypeTag::Float => Some(TypeTag::Number),
            TypeTag::DateTime => Some(TypeTag::String),
            _ => Some(TypeTag::Any),
        }
    }

    /// Returns true if `self` is `ancestor` or one of its descendants
    pub fn derives_from(&self, ancestor: TypeTag) -> bool {
        let mut current = Some(*self);
        while let Some(tag) = current {
            if tag == ancestor {
                return true;
            }
            current = tag.parent();
        }
        false
    }

    /// Most specific tag for a runtime value
    pub fn of(value: &Value) -> TypeTag {
        match value {
            Value::Null => TypeTag::Null,
            Value::Bool(_) => TypeTag::Bool,
            Value::Number(n) => {
                if n.is_i64() || n.is_u64() {
                    TypeTag::Integer
                } else {
                    TypeTag::Float
                }
            }
            Value::String(s) => {
                if DateTime::parse_from_rfc3339(s).is_ok() {
                    TypeTag::DateTime
                } else {
                    TypeTag::String
                }
            }
            Value::Array(_) => TypeTag::Array,
            Value::Object(_) => TypeTag::Object,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

impl FromStr for TypeTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any" => Ok(TypeTag::Any),
            "null" => Ok(TypeTag::Null),
            "bool" => Ok(TypeTag::Bool),
            "number" => Ok(TypeTag::Number),
            "int" => Ok(TypeTag::Integer),
            "float" => Ok(TypeTag::Float),
            "string" => Ok(TypeTag::String),
            "datetime" => Ok(TypeTag::DateTime),
            "array" => Ok(TypeTag::Array),
            "object" => Ok(TypeTag::Object),
            other => Err(format!("unknown type tag '{}'", other)),
        }
    }
}
