//! JSON corpus shape inference
//!
//! Inventories a directory of JSON documents, flattens each into dotted and
//! indexed keys, groups documents with identical key sets and reports which
//! fields every document shares and which are missing or extra per group.

pub mod analysis;
pub mod cli;
pub mod error;
pub mod parser;
pub mod report;

// Re-export commonly used types
pub use analysis::{
    aggregate, flatten, AnalysisConfig, AnalysisEngine, CorpusAnalysis, FlatRecord, FlatValue,
    Flattener, ScanReport, ShapeFingerprint, ShapeGroup,
};
pub use error::{AnalysisError, ParseError};
pub use parser::{Document, JsonSource};

/// Analyze a directory with default configuration
pub fn analyze_directory(dir: &std::path::Path) -> Result<CorpusAnalysis, AnalysisError> {
    analyze_directory_with_config(dir, &AnalysisConfig::default())
}

/// Analyze a directory with custom configuration
pub fn analyze_directory_with_config(
    dir: &std::path::Path,
    config: &AnalysisConfig,
) -> Result<CorpusAnalysis, AnalysisError> {
    let engine = AnalysisEngine::new(config.clone())?;
    Ok(engine.scan(dir)?.analysis)
}
