//! Substitution context handed to the rendering engine.
//!
//! A **Value Object** built once per run from the resolved arguments and the
//! template's fixed values. Every argument name ends up bound, either to a
//! scalar or to a list.
//!
//! ## Merge policy
//!
//! Results are grouped by argument name in encounter order (user values
//! first, then fixed values):
//!
//! | Group | Binding |
//! |-------|---------|
//! | 1 result, repeatable, `""` | empty list |
//! | 1 result, repeatable | one-element list |
//! | 1 result, not repeatable | scalar |
//! | n results, all repeatable | list, encounter order |
//! | n results, any not repeatable | first value, scalar |

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::domain::entities::argument::ArgumentResult;

/// A bound value: one string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ContextValue {
    Scalar(String),
    List(Vec<String>),
}

impl ContextValue {
    /// Form used inside destination paths: lists are joined with `,`.
    pub fn as_path_segment(&self) -> String {
        match self {
            Self::Scalar(s) => s.clone(),
            Self::List(items) => items.join(","),
        }
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s),
            Self::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::Scalar(_) => None,
            Self::List(items) => Some(items),
        }
    }
}

impl fmt::Display for ContextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(s) => f.write_str(s),
            Self::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

/// Name → value bindings for one render run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RenderContext {
    variables: BTreeMap<String, ContextValue>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collapse resolved arguments and fixed values into bindings.
    pub fn from_results(resolved: &[ArgumentResult], fixed: &[ArgumentResult]) -> Self {
        let mut groups: Vec<(&str, Vec<&ArgumentResult>)> = Vec::new();

        for result in resolved.iter().chain(fixed) {
            match groups.iter_mut().find(|(name, _)| *name == result.name()) {
                Some((_, members)) => members.push(result),
                None => groups.push((result.name(), vec![result])),
            }
        }

        let variables = groups
            .into_iter()
            .map(|(name, members)| (name.to_string(), merge_group(&members)))
            .collect();

        Self { variables }
    }

    /// Add or replace a binding, consuming self.
    pub fn with_variable(mut self, key: impl Into<String>, value: ContextValue) -> Self {
        self.variables.insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.variables.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContextValue)> {
        self.variables.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Replace every `{name}` placeholder with its binding.
    ///
    /// Unknown placeholders are left as-is.
    /// Values are inserted once: a value containing `{other}` stays literal.
    pub fn substitute(&self, pattern: &str) -> String {
        let mut result = String::with_capacity(pattern.len());
        let mut rest = pattern;

        while let Some(open) = rest.find('{') {
            result.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let binding = after
                .find('}')
                .and_then(|close| self.variables.get(&after[..close]).map(|v| (close, v)));
            match binding {
                Some((close, value)) => {
                    result.push_str(&value.as_path_segment());
                    rest = &after[close + 1..];
                }
                None => {
                    result.push('{');
                    rest = after;
                }
            }
        }
        result.push_str(rest);
        result
    }

    /// `name = value`, one binding per line.
    pub fn describe(&self) -> Vec<String> {
        self.variables
            .iter()
            .map(|(k, v)| format!("{k} = {v}"))
            .collect()
    }
}

fn merge_group(members: &[&ArgumentResult]) -> ContextValue {
    match members {
        [single] if single.argument.is_repeatable() => {
            if single.value.is_empty() {
                ContextValue::List(Vec::new())
            } else {
                ContextValue::List(vec![single.value.clone()])
            }
        }
        [single] => ContextValue::Scalar(single.value.clone()),
        many if many.iter().all(|r| r.argument.is_repeatable()) => {
            ContextValue::List(many.iter().map(|r| r.value.clone()).collect())
        }
        // Non-repeatable duplicates: first value wins.
        many => ContextValue::Scalar(many[0].value.clone()),
    }
}
