//! Directory scanning pipeline: list, load, flatten, aggregate

use crate::analysis::aggregator::{CorpusAggregator, CorpusAnalysis};
use crate::analysis::config::AnalysisConfig;
use crate::analysis::flatten::{FlatRecord, Flattener};
use crate::analysis::stats::{AnalysisStatistics, PerformanceTracker};
use crate::error::{AnalysisError, AnalysisResult};
use crate::parser::directory::find_json_files;
use crate::parser::Document;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Output of a directory scan
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub root: PathBuf,
    pub analysis: CorpusAnalysis,
    pub statistics: AnalysisStatistics,
}

/// Main analysis engine
pub struct AnalysisEngine {
    config: AnalysisConfig,
}

impl AnalysisEngine {
    /// Create a new engine; the configuration is validated first
    pub fn new(config: AnalysisConfig) -> AnalysisResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// List the `.json` files the scan would read
    pub fn discover(&self, root: &Path) -> AnalysisResult<Vec<PathBuf>> {
        if !root.is_dir() {
            return Err(AnalysisError::Io {
                message: "not a directory".to_string(),
                path: Some(root.to_path_buf()),
            });
        }
        find_json_files(root, self.config.recursive, self.config.sort_files)
            .map_err(|e| AnalysisError::io(&e, Some(root)))
    }

    /// Analyze every JSON document under `root`
    pub fn scan(&self, root: &Path) -> AnalysisResult<ScanReport> {
        self.scan_with_progress(root, |_| {})
    }

    /// Analyze every JSON document under `root`, reporting each file as it is read
    pub fn scan_with_progress<F>(&self, root: &Path, on_file: F) -> AnalysisResult<ScanReport>
    where
        F: FnMut(&Path),
    {
        let paths = self.discover(root)?;
        info!(root = %root.display(), files = paths.len(), "discovered JSON files");
        self.scan_paths(root, &paths, on_file)
    }

    /// Analyze an already discovered list of files, named relative to `root`
    pub fn scan_paths<F>(
        &self,
        root: &Path,
        paths: &[PathBuf],
        mut on_file: F,
    ) -> AnalysisResult<ScanReport>
    where
        F: FnMut(&Path),
    {
        let tracker = PerformanceTracker::start();
        let mut aggregator =
            CorpusAggregator::new(Flattener::from_config(&self.config), self.config.retain_records);

        for path in paths {
            on_file(path);
            match Document::load(root, path, &self.config)
                .and_then(|document| aggregator.ingest(&document))
            {
                Ok(()) => debug!(path = %path.display(), "document ingested"),
                Err(e) if self.config.continue_on_error => {
                    warn!(path = %path.display(), error = %e, "skipping document");
                    aggregator.record_failure(path, &e);
                }
                Err(e) => return Err(e),
            }
        }

        let analysis = aggregator.finish();
        let statistics = tracker.finish(&analysis, paths.len());
        info!("{}", statistics.summary());

        Ok(ScanReport {
            root: root.to_path_buf(),
            analysis,
            statistics,
        })
    }

    /// Re-read a document's record for export when it was not retained
    pub fn reload_record(&self, path: &Path) -> AnalysisResult<FlatRecord> {
        let root = path.parent().unwrap_or(path);
        let document = Document::load(root, path, &self.config)?;
        Flattener::from_config(&self.config).shape_record(&document.content)
    }
}
