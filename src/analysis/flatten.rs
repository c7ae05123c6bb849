//! Flattening of nested JSON documents into dotted/indexed scalar keys
//!
//! Object fields join their parent path with `.`, array positions append
//! `[i]`. Only one level of array nesting is ever expanded on a path;
//! anything deeper collapses to an `Array[N]` placeholder, so every value
//! in a [`FlatRecord`] is a scalar or a length summary.

use crate::analysis::config::{AnalysisConfig, ArrayPolicy, ShapeMode};
use crate::error::{AnalysisError, AnalysisResult};
use serde::{Serialize, Serializer};
use serde_json::{Number, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Flattened document: path key to non-container value
pub type FlatRecord = BTreeMap<String, FlatValue>;

/// A leaf of a flattened document
#[derive(Debug, Clone, PartialEq)]
pub enum FlatValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    /// An array collapsed to its length
    ArraySummary(usize),
    /// An object collapsed to its field count (top-level shape mode only)
    ObjectSummary(usize),
}

impl FlatValue {
    /// Convert a JSON scalar; containers are summarized
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => FlatValue::Null,
            Value::Bool(b) => FlatValue::Bool(*b),
            Value::Number(n) => FlatValue::Number(n.clone()),
            Value::String(s) => FlatValue::String(s.clone()),
            Value::Array(items) => FlatValue::ArraySummary(items.len()),
            Value::Object(map) => FlatValue::ObjectSummary(map.len()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FlatValue::Null)
    }

    pub fn is_summary(&self) -> bool {
        matches!(self, FlatValue::ArraySummary(_) | FlatValue::ObjectSummary(_))
    }
}

impl fmt::Display for FlatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlatValue::Null => write!(f, "null"),
            FlatValue::Bool(b) => write!(f, "{}", b),
            FlatValue::Number(n) => write!(f, "{}", n),
            FlatValue::String(s) => write!(f, "{}", s),
            FlatValue::ArraySummary(len) => write!(f, "Array[{}]", len),
            FlatValue::ObjectSummary(len) => write!(f, "Object{{{}}}", len),
        }
    }
}

impl Serialize for FlatValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FlatValue::Null => serializer.serialize_unit(),
            FlatValue::Bool(b) => serializer.serialize_bool(*b),
            FlatValue::Number(n) => n.serialize(serializer),
            FlatValue::String(s) => serializer.serialize_str(s),
            summary => serializer.collect_str(summary),
        }
    }
}

/// Converts JSON trees into flat records
#[derive(Debug, Clone)]
pub struct Flattener {
    mode: ShapeMode,
    array_policy: ArrayPolicy,
    max_depth: Option<usize>,
}

impl Default for Flattener {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}

impl Flattener {
    pub fn new(array_policy: ArrayPolicy) -> Self {
        Self {
            array_policy,
            ..Default::default()
        }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            mode: config.shape_mode,
            array_policy: config.array_policy,
            max_depth: config.max_depth,
        }
    }

    pub fn mode(&self) -> ShapeMode {
        self.mode
    }

    /// Produce the record whose keys define the document's shape
    pub fn shape_record(&self, value: &Value) -> AnalysisResult<FlatRecord> {
        match (self.mode, value) {
            (ShapeMode::TopLevel, Value::Object(map)) => Ok(map
                .iter()
                .map(|(key, value)| (key.clone(), FlatValue::from_json(value)))
                .collect()),
            _ => self.flatten(value),
        }
    }

    /// Flatten a whole document
    pub fn flatten(&self, value: &Value) -> AnalysisResult<FlatRecord> {
        self.flatten_with_prefix(value, "")
    }

    /// Flatten a value whose keys are placed under `prefix`
    pub fn flatten_with_prefix(&self, value: &Value, prefix: &str) -> AnalysisResult<FlatRecord> {
        let mut record = FlatRecord::new();
        self.visit(value, prefix, 0, true, &mut record)?;
        Ok(record)
    }

    fn visit(
        &self,
        value: &Value,
        prefix: &str,
        depth: usize,
        may_expand_array: bool,
        out: &mut FlatRecord,
    ) -> AnalysisResult<()> {
        self.check_depth(prefix, depth)?;

        match value {
            Value::Object(map) => {
                for (key, child) in map {
                    let path = if prefix.is_empty() {
                        key.clone()
                    } else {
                        format!("{}.{}", prefix, key)
                    };

                    match child {
                        Value::Object(_) => {
                            self.visit(child, &path, depth + 1, may_expand_array, out)?
                        }
                        Value::Array(items) if may_expand_array && self.expands(items) => {
                            self.visit_elements(items, &path, depth + 1, out)?
                        }
                        other => {
                            out.insert(path, FlatValue::from_json(other));
                        }
                    }
                }
            }
            Value::Array(items) if may_expand_array => {
                self.visit_elements(items, prefix, depth + 1, out)?
            }
            other => {
                out.insert(prefix.to_string(), FlatValue::from_json(other));
            }
        }

        Ok(())
    }

    fn visit_elements(
        &self,
        items: &[Value],
        prefix: &str,
        depth: usize,
        out: &mut FlatRecord,
    ) -> AnalysisResult<()> {
        for (index, item) in items.iter().enumerate() {
            let path = format!("{}[{}]", prefix, index);
            match item {
                Value::Object(_) => self.visit(item, &path, depth + 1, false, out)?,
                other => {
                    out.insert(path, FlatValue::from_json(other));
                }
            }
        }
        Ok(())
    }

    /// Whether an array under an object field is expanded into indexed keys
    ///
    /// Arrays holding only empty objects would expand to nothing and drop the
    /// field from the shape, so they stay summarized.
    fn expands(&self, items: &[Value]) -> bool {
        match self.array_policy {
            ArrayPolicy::Summarize => false,
            ArrayPolicy::ExpandRecords => {
                items.iter().all(Value::is_object)
                    && items
                        .iter()
                        .any(|item| item.as_object().is_some_and(|map| !map.is_empty()))
            }
        }
    }

    fn check_depth(&self, prefix: &str, depth: usize) -> AnalysisResult<()> {
        match self.max_depth {
            Some(limit) if depth > limit => Err(AnalysisError::DepthExceeded {
                path: if prefix.is_empty() {
                    "<root>".to_string()
                } else {
                    prefix.to_string()
                },
                limit,
            }),
            _ => Ok(()),
        }
    }
}

/// Flatten with the default policy
pub fn flatten(value: &Value) -> AnalysisResult<FlatRecord> {
    Flattener::default().flatten(value)
}
