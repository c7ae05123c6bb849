//! Corpus-wide field frequency, common fields and shape grouping
//!
//! Aggregation is two-pass by nature: every document's fingerprint has to be
//! seen before the common-field set exists, so [`CorpusAggregator::ingest`]
//! only groups documents and [`CorpusAggregator::finish`] derives the
//! frequency table and per-group deviations.

use crate::analysis::fingerprint::ShapeFingerprint;
use crate::analysis::flatten::{FlatRecord, Flattener};
use crate::error::{AnalysisError, AnalysisResult};
use crate::parser::Document;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// A document belonging to a shape group
#[derive(Debug, Clone, Serialize)]
pub struct GroupMember {
    pub name: String,
    pub path: PathBuf,
    /// Flattened record, kept only when tabular export was requested
    #[serde(skip)]
    pub record: Option<FlatRecord>,
}

/// Documents sharing one fingerprint
#[derive(Debug, Clone, Serialize)]
pub struct ShapeGroup {
    /// 1-based position in discovery order
    pub id: usize,
    pub fingerprint: ShapeFingerprint,
    pub members: Vec<GroupMember>,
    /// Common fields absent from this shape
    pub missing: Vec<String>,
    /// Fields of this shape that are not common
    pub extra: Vec<String>,
}

impl ShapeGroup {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.name.as_str())
    }
}

/// Deviation of one document from the common schema
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviationReport {
    pub file_name: String,
    pub group: usize,
    pub missing: Vec<String>,
    pub extra: Vec<String>,
}

/// A document skipped under continue-on-error
#[derive(Debug, Clone, Serialize)]
pub struct FailedDocument {
    pub path: PathBuf,
    pub message: String,
}

/// Immutable result of aggregating a corpus
#[derive(Debug, Clone, Default, Serialize)]
pub struct CorpusAnalysis {
    pub total_documents: usize,
    pub field_frequency: BTreeMap<String, usize>,
    pub common_fields: BTreeSet<String>,
    pub groups: Vec<ShapeGroup>,
    pub deviations: Vec<DeviationReport>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<FailedDocument>,
}

impl CorpusAnalysis {
    pub fn is_empty(&self) -> bool {
        self.total_documents == 0
    }

    /// Share of documents containing `key`, in percent; 0 for an empty corpus
    pub fn frequency_percent(&self, key: &str) -> f64 {
        if self.total_documents == 0 {
            return 0.0;
        }
        let count = self.field_frequency.get(key).copied().unwrap_or(0);
        count as f64 / self.total_documents as f64 * 100.0
    }

    /// Frequencies ordered by count descending, then key
    pub fn sorted_frequencies(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> = self
            .field_frequency
            .iter()
            .map(|(key, count)| (key.as_str(), *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }

    pub fn group(&self, id: usize) -> Option<&ShapeGroup> {
        id.checked_sub(1).and_then(|index| self.groups.get(index))
    }

    /// Group containing the named document
    pub fn group_of(&self, file_name: &str) -> Option<&ShapeGroup> {
        self.deviation_for(file_name)
            .and_then(|deviation| self.group(deviation.group))
    }

    pub fn deviation_for(&self, file_name: &str) -> Option<&DeviationReport> {
        self.deviations.iter().find(|d| d.file_name == file_name)
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Incremental builder for [`CorpusAnalysis`]
#[derive(Debug)]
pub struct CorpusAggregator {
    flattener: Flattener,
    retain_records: bool,
    groups: Vec<ShapeGroup>,
    index: HashMap<ShapeFingerprint, usize>,
    /// Group index per document, in discovery order
    discovery: Vec<(usize, String)>,
    failures: Vec<FailedDocument>,
}

impl CorpusAggregator {
    pub fn new(flattener: Flattener, retain_records: bool) -> Self {
        Self {
            flattener,
            retain_records,
            groups: Vec::new(),
            index: HashMap::new(),
            discovery: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn document_count(&self) -> usize {
        self.discovery.len()
    }

    /// Flatten a parsed document and add it to its shape group
    pub fn ingest(&mut self, document: &Document) -> AnalysisResult<()> {
        let record = self.flattener.shape_record(&document.content)?;
        self.ingest_record(&document.name, &document.path, record);
        Ok(())
    }

    /// Add an already flattened record
    pub fn ingest_record(&mut self, name: &str, path: &Path, record: FlatRecord) {
        let fingerprint = ShapeFingerprint::from_record(&record);
        trace!(document = name, keys = fingerprint.len(), "fingerprinted");

        let groups = &mut self.groups;
        let group_index = *self.index.entry(fingerprint).or_insert_with_key(|fingerprint| {
            groups.push(ShapeGroup {
                id: groups.len() + 1,
                fingerprint: fingerprint.clone(),
                members: Vec::new(),
                missing: Vec::new(),
                extra: Vec::new(),
            });
            groups.len() - 1
        });

        self.groups[group_index].members.push(GroupMember {
            name: name.to_string(),
            path: path.to_path_buf(),
            record: self.retain_records.then_some(record),
        });
        self.discovery.push((group_index, name.to_string()));
    }

    /// Remember a document that could not be loaded
    pub fn record_failure(&mut self, path: &Path, error: &AnalysisError) {
        self.failures.push(FailedDocument {
            path: path.to_path_buf(),
            message: error.user_message(),
        });
    }

    /// Derive frequencies, common fields and deviations
    pub fn finish(self) -> CorpusAnalysis {
        let total_documents = self.discovery.len();

        let mut field_frequency: BTreeMap<String, usize> = BTreeMap::new();
        for group in &self.groups {
            for key in group.fingerprint.keys() {
                *field_frequency.entry(key.clone()).or_insert(0) += group.len();
            }
        }

        // Empty when there are no documents, since the table is empty too
        let common_fields: BTreeSet<String> = field_frequency
            .iter()
            .filter(|(_, count)| **count == total_documents)
            .map(|(key, _)| key.clone())
            .collect();

        let mut groups = self.groups;
        for group in &mut groups {
            group.missing = common_fields
                .iter()
                .filter(|key| !group.fingerprint.contains(key))
                .cloned()
                .collect();
            group.extra = group
                .fingerprint
                .keys()
                .iter()
                .filter(|key| !common_fields.contains(*key))
                .cloned()
                .collect();
        }

        let deviations = self
            .discovery
            .into_iter()
            .map(|(group_index, file_name)| {
                let group = &groups[group_index];
                DeviationReport {
                    file_name,
                    group: group.id,
                    missing: group.missing.clone(),
                    extra: group.extra.clone(),
                }
            })
            .collect();

        debug!(
            documents = total_documents,
            groups = groups.len(),
            common = common_fields.len(),
            "aggregation finished"
        );

        CorpusAnalysis {
            total_documents,
            field_frequency,
            common_fields,
            groups,
            deviations,
            failures: self.failures,
        }
    }
}

/// Aggregate an in-memory corpus, failing on the first unflattenable document
pub fn aggregate<'a, I>(documents: I, flattener: Flattener) -> AnalysisResult<CorpusAnalysis>
where
    I: IntoIterator<Item = &'a Document>,
{
    let mut aggregator = CorpusAggregator::new(flattener, true);
    for document in documents {
        aggregator.ingest(document)?;
    }
    Ok(aggregator.finish())
}
