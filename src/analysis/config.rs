//! Configuration options for corpus shape analysis

use crate::error::{AnalysisError, AnalysisResult};
use serde::{Deserialize, Serialize};

/// Which keys make up a document's shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeMode {
    /// Every flattened path of the document
    Flattened,
    /// Only the keys of a top-level object
    TopLevel,
}

/// How arrays nested under object fields are flattened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArrayPolicy {
    /// Always collapse to an `Array[N]` placeholder
    Summarize,
    /// Expand arrays of objects one level into indexed keys
    ExpandRecords,
}

/// Analysis configuration options
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub shape_mode: ShapeMode,
    pub array_policy: ArrayPolicy,
    /// Maximum object nesting depth
    pub max_depth: Option<usize>,
    /// Maximum size of a single input file in bytes
    pub max_file_size: u64,
    /// Descend into subdirectories
    pub recursive: bool,
    /// Sort discovered paths so reports are reproducible
    pub sort_files: bool,
    /// Keep each document's flattened record for tabular export
    pub retain_records: bool,
    /// Collect per-file failures instead of aborting the run
    pub continue_on_error: bool,
    /// Number of file names listed per group in the text report
    pub preview_limit: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            shape_mode: ShapeMode::Flattened,
            array_policy: ArrayPolicy::ExpandRecords,
            max_depth: Some(1000),
            max_file_size: 100 * 1024 * 1024, // 100MB
            recursive: false,
            sort_files: true,
            retain_records: false,
            continue_on_error: false,
            preview_limit: 5,
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration matching the plain top-level key inventory
    pub fn top_level() -> Self {
        Self {
            shape_mode: ShapeMode::TopLevel,
            ..Default::default()
        }
    }

    pub fn with_shape_mode(mut self, mode: ShapeMode) -> Self {
        self.shape_mode = mode;
        self
    }

    pub fn with_array_policy(mut self, policy: ArrayPolicy) -> Self {
        self.array_policy = policy;
        self
    }

    pub fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn with_sorted_files(mut self, sorted: bool) -> Self {
        self.sort_files = sorted;
        self
    }

    pub fn with_retained_records(mut self, retain: bool) -> Self {
        self.retain_records = retain;
        self
    }

    pub fn with_continue_on_error(mut self, enabled: bool) -> Self {
        self.continue_on_error = enabled;
        self
    }

    pub fn with_preview_limit(mut self, limit: usize) -> Self {
        self.preview_limit = limit;
        self
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> AnalysisResult<()> {
        if self.preview_limit == 0 {
            return Err(AnalysisError::configuration(
                "Preview limit must be at least 1",
            ));
        }

        if self.max_file_size < 1024 {
            return Err(AnalysisError::configuration(
                "Maximum file size must be at least 1KB",
            ));
        }

        if let Some(depth) = self.max_depth {
            if depth == 0 {
                return Err(AnalysisError::configuration("Max depth must be at least 1"));
            }
        }

        Ok(())
    }
}

/// Parse a size string (e.g., "100MB", "1GB", "500KB", "2048")
pub fn parse_size_limit(limit: &str) -> AnalysisResult<u64> {
    let limit_str = limit.trim().to_uppercase();
    let invalid = || AnalysisError::configuration(format!("Invalid size limit: {}", limit));

    let (number, multiplier) = if let Some(size) = limit_str.strip_suffix("GB") {
        (size, 1024.0 * 1024.0 * 1024.0)
    } else if let Some(size) = limit_str.strip_suffix("MB") {
        (size, 1024.0 * 1024.0)
    } else if let Some(size) = limit_str.strip_suffix("KB") {
        (size, 1024.0)
    } else if let Some(size) = limit_str.strip_suffix('B') {
        (size, 1.0)
    } else {
        (limit_str.as_str(), 1.0)
    };

    let value = number.trim().parse::<f64>().map_err(|_| invalid())?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }

    Ok((value * multiplier) as u64)
}
