//! Recursive merge of structured values.
//!
//! Mappings merge key by key, sequences concatenate, and everything else is
//! replaced by the source side. Keys in the override set (`entrypoint` and
//! `command` by default) always take the source value whole, since a command
//! list concatenated with another command list is a different command.

use crate::error::{MussError, Result};
use serde_yaml::{Mapping, Value};

/// Keys whose values are replaced rather than merged.
pub const DEFAULT_OVERRIDE_KEYS: &[&str] = &["entrypoint", "command"];

/// Merge `source` onto `target` with the default override keys.
pub fn merge(target: &Mapping, source: &Mapping) -> Result<Mapping> {
    Merger::default().merge(target, source)
}

/// A merge configured with a set of override keys.
#[derive(Debug, Clone)]
pub struct Merger {
    override_keys: Vec<String>,
}

impl Default for Merger {
    fn default() -> Self {
        Self::with_override_keys(DEFAULT_OVERRIDE_KEYS.iter().copied())
    }
}

impl Merger {
    pub fn with_override_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            override_keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Return a new mapping with `source` merged onto `target`.
    ///
    /// Keys keep their first-seen position: keys of `target` in their order,
    /// followed by keys only present in `source`.
    ///
    /// # Errors
    ///
    /// `MergeConflict` when `target` holds a mapping or sequence at a
    /// non-override key and `source` holds a value of a different shape.
    pub fn merge(&self, target: &Mapping, source: &Mapping) -> Result<Mapping> {
        self.merge_at(&mut Vec::new(), target, source)
    }

    fn is_override(&self, key: &Value) -> bool {
        key.as_str()
            .is_some_and(|k| self.override_keys.iter().any(|o| o == k))
    }

    fn merge_at(&self, path: &mut Vec<String>, target: &Mapping, source: &Mapping) -> Result<Mapping> {
        let mut result = target.clone();

        for (key, incoming) in source {
            let merged = match result.get(key) {
                Some(current) if !self.is_override(key) => {
                    path.push(key_label(key));
                    let merged = self.merge_values(path, current, incoming);
                    path.pop();
                    merged?
                }
                _ => incoming.clone(),
            };
            result.insert(key.clone(), merged);
        }

        Ok(result)
    }

    fn merge_values(&self, path: &mut Vec<String>, current: &Value, incoming: &Value) -> Result<Value> {
        match (current, incoming) {
            (Value::Mapping(current), Value::Mapping(incoming)) => {
                Ok(Value::Mapping(self.merge_at(path, current, incoming)?))
            }
            (Value::Sequence(current), Value::Sequence(incoming)) => {
                let mut joined = Vec::with_capacity(current.len() + incoming.len());
                joined.extend(current.iter().cloned());
                joined.extend(incoming.iter().cloned());
                Ok(Value::Sequence(joined))
            }
            (Value::Mapping(_), _) | (Value::Sequence(_), _) => Err(MussError::MergeConflict {
                key: path.join("."),
                target_kind: kind(current),
                source_kind: kind(incoming),
            }),
            _ => Ok(incoming.clone()),
        }
    }
}

/// A short name for the shape of a value, used in error messages.
pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

fn key_label(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_else(|_| kind(other).to_string()),
    }
}
