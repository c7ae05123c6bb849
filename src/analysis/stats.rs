//! Statistics and timing for analysis runs

use crate::analysis::aggregator::CorpusAnalysis;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Summary statistics for one analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisStatistics {
    /// Number of `.json` files found by the directory listing
    pub files_discovered: usize,
    /// Number of documents that made it into the analysis
    pub documents_analyzed: usize,
    /// Number of documents skipped under continue-on-error
    pub documents_failed: usize,
    /// Number of distinct shapes
    pub group_count: usize,
    /// Number of distinct flattened keys
    pub distinct_fields: usize,
    /// Number of keys present in every document
    pub common_fields: usize,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
    /// Timestamp of when statistics were collected
    pub collected_at: chrono::DateTime<chrono::Utc>,
}

impl Default for AnalysisStatistics {
    fn default() -> Self {
        Self {
            files_discovered: 0,
            documents_analyzed: 0,
            documents_failed: 0,
            group_count: 0,
            distinct_fields: 0,
            common_fields: 0,
            processing_time_ms: 0,
            collected_at: chrono::Utc::now(),
        }
    }
}

impl AnalysisStatistics {
    pub fn from_analysis(
        analysis: &CorpusAnalysis,
        files_discovered: usize,
        processing_time: Duration,
    ) -> Self {
        Self {
            files_discovered,
            documents_analyzed: analysis.total_documents,
            documents_failed: analysis.failures.len(),
            group_count: analysis.groups.len(),
            distinct_fields: analysis.field_frequency.len(),
            common_fields: analysis.common_fields.len(),
            processing_time_ms: processing_time.as_millis() as u64,
            collected_at: chrono::Utc::now(),
        }
    }

    /// Share of documents matching the most common shape, in percent
    pub fn consistency_percent(&self, analysis: &CorpusAnalysis) -> f32 {
        if analysis.total_documents == 0 {
            return 0.0;
        }
        let largest = analysis.groups.iter().map(|g| g.len()).max().unwrap_or(0);
        largest as f32 / analysis.total_documents as f32 * 100.0
    }

    /// Get a formatted summary
    pub fn summary(&self) -> String {
        format!(
            "Analyzed {} of {} files in {:.1}s - {} shapes, {} fields ({} common)",
            self.documents_analyzed,
            self.files_discovered,
            self.processing_time_ms as f32 / 1000.0,
            self.group_count,
            self.distinct_fields,
            self.common_fields
        )
    }
}

/// Wall-clock tracker for a run
pub struct PerformanceTracker {
    start_time: Instant,
}

impl PerformanceTracker {
    pub fn start() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }

    pub fn finish(self, analysis: &CorpusAnalysis, files_discovered: usize) -> AnalysisStatistics {
        AnalysisStatistics::from_analysis(analysis, files_discovered, self.start_time.elapsed())
    }
}
