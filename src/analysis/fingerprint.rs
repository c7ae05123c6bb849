//! Order-independent structural signatures

use crate::analysis::flatten::FlatRecord;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Sorted, duplicate-free key sequence of one document
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct ShapeFingerprint(Vec<String>);

impl ShapeFingerprint {
    pub fn from_record(record: &FlatRecord) -> Self {
        // BTreeMap keys are already unique and ordered
        Self(record.keys().cloned().collect())
    }

    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: BTreeSet<String> = keys.into_iter().map(Into::into).collect();
        Self(set.into_iter().collect())
    }

    pub fn keys(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0
            .binary_search_by(|probe| probe.as_str().cmp(key))
            .is_ok()
    }
}

impl fmt::Display for ShapeFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(", "))
    }
}
