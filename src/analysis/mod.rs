//! Shape inference and grouping
//!
//! Documents are flattened into dotted/indexed keys, fingerprinted by their
//! sorted key set, and aggregated into frequency tables and shape groups.

pub mod aggregator;
pub mod config;
pub mod engine;
pub mod fingerprint;
pub mod flatten;
pub mod stats;

pub use aggregator::{
    aggregate, CorpusAggregator, CorpusAnalysis, DeviationReport, FailedDocument, GroupMember,
    ShapeGroup,
};
pub use config::{AnalysisConfig, ArrayPolicy, ShapeMode};
pub use engine::{AnalysisEngine, ScanReport};
pub use fingerprint::ShapeFingerprint;
pub use flatten::{flatten, FlatRecord, FlatValue, Flattener};
pub use stats::AnalysisStatistics;

pub use crate::error::AnalysisResult;
