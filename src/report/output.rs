//! Writing reports and tables into the output directory

use crate::analysis::AnalysisResult;
use crate::error::AnalysisError;
use crate::report::table::GroupTable;
use crate::report::ReportFormat;
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const REPORT_STEM: &str = "json_analysis_report";

/// Paths produced by one run
#[derive(Debug, Clone, Default)]
pub struct WrittenFiles {
    pub report: Option<PathBuf>,
    pub tables: Vec<PathBuf>,
}

/// Places output files in a directory, creating it as needed
#[derive(Debug, Clone)]
pub struct OutputWriter {
    dir: PathBuf,
    timestamp: Option<DateTime<Local>>,
}

impl OutputWriter {
    /// Report names carry the time of `now` when `timestamped` is set
    pub fn new(dir: impl Into<PathBuf>, timestamped: bool) -> Self {
        Self {
            dir: dir.into(),
            timestamp: timestamped.then(Local::now),
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn report_file_name(&self, format: ReportFormat) -> String {
        match &self.timestamp {
            Some(ts) => format!(
                "{}_{}.{}",
                ts.format("%Y%m%d-%H%M%S"),
                REPORT_STEM,
                format.extension()
            ),
            None => format!("{}.{}", REPORT_STEM, format.extension()),
        }
    }

    pub fn table_file_name(group: usize) -> String {
        format!("group_{}_table.csv", group)
    }

    pub fn write_report(&self, format: ReportFormat, content: &str) -> AnalysisResult<PathBuf> {
        let path = self.dir.join(self.report_file_name(format));
        self.write_file(&path, content)?;
        info!(path = %path.display(), "report written");
        Ok(path)
    }

    pub fn write_table(&self, table: &GroupTable) -> AnalysisResult<PathBuf> {
        let path = self.dir.join(Self::table_file_name(table.group));
        self.write_file(&path, &table.to_csv())?;
        info!(path = %path.display(), rows = table.rows.len(), "table written");
        Ok(path)
    }

    fn write_file(&self, path: &Path, content: &str) -> AnalysisResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| AnalysisError::io(&e, Some(self.dir.as_path())))?;
        fs::write(path, content).map_err(|e| AnalysisError::io(&e, Some(path)))
    }
}
