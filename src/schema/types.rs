//! Struct type definitions
//!
//! A [`Struct`] is a named, immutable schema: an ordered [`Interface`] of
//! field rules plus an exhaustiveness flag. Field rules are resolved into
//! [`Rule`] variants when the interface is built:
//! - a [`Predicate`] is kept as is
//! - a `Struct` becomes a nested schema
//! - a raw `Interface` becomes an anonymous, non-exhaustive nested schema
//! - a name is looked up among the built-in predicates

use std::sync::Arc;

use serde_json::Value;

use super::builtin;
use super::errors::StructResult;
use super::predicate::Predicate;
use super::validator;

/// Name given to structs built from a raw interface
pub const ANONYMOUS_STRUCT_NAME: &str = "Struct";

/// Rule attached to a single field
#[derive(Debug, Clone)]
pub enum Rule {
    /// Leaf check
    Predicate(Predicate),
    /// Nested schema validated recursively
    Struct(Arc<Struct>),
    /// Name that matched no built-in predicate
    Unresolved(String),
}

impl Rule {
    /// Short description used in `InvalidRule` messages
    pub fn describe(&self) -> String {
        match self {
            Rule::Predicate(p) => p.label().to_string(),
            Rule::Struct(s) => format!("struct {}", s.name()),
            Rule::Unresolved(name) => name.clone(),
        }
    }
}

impl From<Predicate> for Rule {
    fn from(predicate: Predicate) -> Self {
        Rule::Predicate(predicate)
    }
}

impl From<Struct> for Rule {
    fn from(schema: Struct) -> Self {
        Rule::Struct(Arc::new(schema))
    }
}

impl From<Arc<Struct>> for Rule {
    fn from(schema: Arc<Struct>) -> Self {
        Rule::Struct(schema)
    }
}

impl From<&Struct> for Rule {
    fn from(schema: &Struct) -> Self {
        Rule::Struct(Arc::new(schema.clone()))
    }
}

impl From<Interface> for Rule {
    fn from(interface: Interface) -> Self {
        Rule::Struct(Arc::new(Struct::anonymous(interface)))
    }
}

impl From<&str> for Rule {
    fn from(name: &str) -> Self {
        builtin::lookup(name)
            .map(Rule::Predicate)
            .unwrap_or_else(|| Rule::Unresolved(name.to_string()))
    }
}

impl From<String> for Rule {
    fn from(name: String) -> Self {
        Rule::from(name.as_str())
    }
}

/// Ordered mapping of field name to rule
#[derive(Debug, Clone, Default)]
pub struct Interface {
    fields: Vec<(String, Rule)>,
}

impl Interface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a field, builder style
    pub fn field(mut self, name: impl Into<String>, rule: impl Into<Rule>) -> Self {
        self.insert(name, rule);
        self
    }

    /// Declares a field. Redeclaring a field replaces its rule but keeps
    /// its original position.
    pub fn insert(&mut self, name: impl Into<String>, rule: impl Into<Rule>) {
        let name = name.into();
        let rule = rule.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = rule,
            None => self.fields.push((name, rule)),
        }
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.fields.iter().any(|(field, _)| field == name)
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, rule)| rule)
    }

    /// Fields in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.fields.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, R> FromIterator<(K, R)> for Interface
where
    K: Into<String>,
    R: Into<Rule>,
{
    fn from_iter<I: IntoIterator<Item = (K, R)>>(iter: I) -> Self {
        let mut interface = Interface::new();
        for (name, rule) in iter {
            interface.insert(name, rule);
        }
        interface
    }
}

/// Named, immutable schema
#[derive(Debug, Clone)]
pub struct Struct {
    name: String,
    interface: Interface,
    exhaustive: bool,
}

impl Struct {
    /// Creates an exhaustive struct: records may hold no undeclared keys.
    pub fn new(name: impl Into<String>, interface: Interface) -> Self {
        Self::of(name, interface, true)
    }

    /// Creates a struct with explicit exhaustiveness
    pub fn of(name: impl Into<String>, interface: Interface, exhaustive: bool) -> Self {
        Self {
            name: name.into(),
            interface,
            exhaustive,
        }
    }

    /// Creates the non-exhaustive struct a raw interface stands for
    pub fn anonymous(interface: Interface) -> Self {
        Self::of(ANONYMOUS_STRUCT_NAME, interface, false)
    }

    /// Allows undeclared keys in validated records
    pub fn non_exhaustive(mut self) -> Self {
        self.exhaustive = false;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn interface(&self) -> &Interface {
        &self.interface
    }

    pub fn is_exhaustive(&self) -> bool {
        self.exhaustive
    }

    /// Validates `record` against this struct with the default
    /// configuration. See [`validate`](super::validate).
    pub fn validate(&self, record: &mut Value) -> StructResult<()> {
        validator::validate(record, self)
    }
}
