//! Predicate combinators
//!
//! Each combinator builds a new [`Predicate`] from rules. Members are given
//! as anything convertible into a [`Rule`]: predicates, structs, raw
//! interfaces or built-in names.
//!
//! ```ignore
//! let event = Struct::new("Event", Interface::new()
//!     .field("id", all_of(["is_string", "is_numeric"]))
//!     .field("date", any_of([class_of(TypeTag::DateTime), is_null()]))
//!     .field("tickets", array_of(not("is_null")))
//!     .field("worries", optional_or("is_string", "no")));
//! ```
//!
//! Members are checked when the predicate runs, not when it is built; a
//! member of the wrong kind fails with `InvalidRule` at that point.

use serde_json::Value;

use super::errors::{StructError, StructResult};
use super::predicate::{Predicate, PredicateResult, Verdict};
use super::property::FieldValue;
use super::type_tag::TypeTag;
use super::types::Rule;
use super::validator::check_struct;

/// Passes iff every member passes. Stops at the first failure; an empty
/// list passes.
///
/// Members must be predicates. A replacement offered by one member is what
/// later members see, and the last one is surfaced.
pub fn all_of<I, R>(rules: I) -> Predicate
where
    I: IntoIterator<Item = R>,
    R: Into<Rule>,
{
    let members = collect(rules);
    let label = format!("all_of({})", describe(&members));

    Predicate::new(move |candidate| {
        let mut replacement: Option<Value> = None;
        for member in &members {
            let predicate = expect_predicate(member)?;
            let verdict = match &replacement {
                Some(value) => predicate.check(&FieldValue::Present(value.clone()))?,
                None => predicate.check(candidate)?,
            };
            if !verdict.passed {
                return Ok(Verdict::fail().with_cause(verdict.cause));
            }
            if verdict.replacement.is_some() {
                replacement = verdict.replacement;
            }
        }
        Ok(Verdict::pass().with_replacement(replacement))
    })
    .named(label)
}

/// Passes iff at least one member passes. Stops at the first success; an
/// empty list fails.
///
/// Struct members are validated against a copy of the value. A struct that
/// rejects the data counts as a failed alternative; defaults it applied on
/// success are surfaced as the replacement. Domain errors and broken rules
/// inside a struct member propagate.
pub fn any_of<I, R>(rules: I) -> Predicate
where
    I: IntoIterator<Item = R>,
    R: Into<Rule>,
{
    let members = collect(rules);
    let label = format!("any_of({})", describe(&members));

    Predicate::new(move |candidate| {
        for member in &members {
            let verdict = check_member(member, candidate)?;
            if verdict.passed {
                return Ok(verdict);
            }
        }
        Ok(Verdict::fail())
    })
    .named(label)
}

/// Passes iff the value is an array and every element satisfies `rule`.
///
/// Fails for anything that is not an array, including a missing field. A
/// struct rule validates each element; when one is rejected the verdict
/// carries the nested failure so the chain names the element's struct.
pub fn array_of(rule: impl Into<Rule>) -> Predicate {
    let member = rule.into();
    let label = format!("array_of({})", member.describe());

    Predicate::new(move |candidate| {
        let Some(Value::Array(items)) = candidate.as_value() else {
            return Ok(Verdict::fail());
        };
        if let Rule::Unresolved(name) = &member {
            return Err(StructError::InvalidRule(name.clone()));
        }

        let mut updated: Option<Vec<Value>> = None;
        for (index, item) in items.iter().enumerate() {
            let verdict = check_member(&member, &FieldValue::Present(item.clone()))?;
            if !verdict.passed {
                return Ok(Verdict::fail().with_cause(verdict.cause));
            }
            if let Some(value) = verdict.replacement {
                updated.get_or_insert_with(|| items.clone())[index] = value;
            }
        }
        Ok(Verdict::pass().with_replacement(updated.map(Value::Array)))
    })
    .named(label)
}

/// Passes iff the value's type tag is `tag` or derives from it.
pub fn class_of(tag: TypeTag) -> Predicate {
    Predicate::from_fn(move |value| TypeTag::of(value).derives_from(tag))
        .named(format!("class_of({})", tag))
}

/// Negates a predicate. Domain errors still propagate; replacements and
/// failure causes are dropped.
pub fn not(rule: impl Into<Rule>) -> Predicate {
    let member = rule.into();
    let label = format!("not({})", member.describe());

    Predicate::new(move |candidate| {
        let verdict = expect_predicate(&member)?.check(candidate)?;
        Ok((!verdict.passed).into())
    })
    .named(label)
}

/// Makes a field optional: a missing field passes without consulting
/// `rule`; a present one must satisfy it.
pub fn optional(rule: impl Into<Rule>) -> Predicate {
    let member = rule.into();
    let label = format!("optional({})", member.describe());

    Predicate::new(move |candidate| {
        if candidate.is_missing() {
            return Ok(Verdict::pass());
        }
        check_member(&member, candidate)
    })
    .named(label)
}

/// Makes a field optional with a default: a missing field is replaced by
/// `default`, which must then satisfy `rule`.
pub fn optional_or(rule: impl Into<Rule>, default: impl Into<Value>) -> Predicate {
    let member = rule.into();
    let default = default.into();
    let label = format!("optional_or({}, {})", member.describe(), default);

    Predicate::new(move |candidate| {
        if !candidate.is_missing() {
            return check_member(&member, candidate);
        }
        let verdict = check_member(&member, &FieldValue::Present(default.clone()))?;
        let replacement = verdict.replacement.clone().unwrap_or_else(|| default.clone());
        Ok(verdict.with_replacement(Some(replacement)))
    })
    .named(label)
}

fn collect<I, R>(rules: I) -> Vec<Rule>
where
    I: IntoIterator<Item = R>,
    R: Into<Rule>,
{
    rules.into_iter().map(Into::into).collect()
}

fn describe(members: &[Rule]) -> String {
    members
        .iter()
        .map(Rule::describe)
        .collect::<Vec<_>>()
        .join(", ")
}

fn expect_predicate(member: &Rule) -> StructResult<&Predicate> {
    match member {
        Rule::Predicate(predicate) => Ok(predicate),
        other => Err(StructError::InvalidRule(other.describe())),
    }
}

/// Checks a predicate or struct member.
///
/// A struct that rejects the data yields a failing verdict carrying the
/// failure; domain errors and broken rules propagate.
fn check_member(member: &Rule, candidate: &FieldValue) -> PredicateResult {
    match member {
        Rule::Predicate(predicate) => predicate.check(candidate),
        Rule::Struct(schema) => {
            let Some(value) = candidate.as_value() else {
                return Ok(Verdict::fail());
            };
            let mut copy = value.clone();
            match check_struct(&mut copy, schema) {
                Ok(()) => Ok(Verdict::pass().with_replacement(changed(value, copy))),
                Err(err) if err.is_data_failure() => Ok(Verdict::fail_with(err)),
                Err(err) => Err(err),
            }
        }
        Rule::Unresolved(name) => Err(StructError::InvalidRule(name.clone())),
    }
}

fn changed(original: &Value, validated: Value) -> Option<Value> {
    (*original != validated).then_some(validated)
}
