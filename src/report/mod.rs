//! Rendering of analysis results as text, JSON and CSV tables

pub mod output;
pub mod table;

use crate::analysis::{AnalysisResult, AnalysisStatistics, CorpusAnalysis, ScanReport};
use crate::error::AnalysisError;
use serde::Serialize;
use std::fmt::Write;
use std::path::Path;

pub use output::{OutputWriter, WrittenFiles};
pub use table::GroupTable;

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Json => "json",
        }
    }

    pub fn render(&self, report: &ScanReport, preview_limit: usize) -> AnalysisResult<String> {
        match self {
            ReportFormat::Text => Ok(render_text(&report.analysis, preview_limit)),
            ReportFormat::Json => render_json(report),
        }
    }
}

/// Human-readable summary report
pub fn render_text(analysis: &CorpusAnalysis, preview_limit: usize) -> String {
    let mut report = String::new();
    // Writing to a String cannot fail
    let _ = write_text(&mut report, analysis, preview_limit);
    report
}

fn write_text(
    out: &mut String,
    analysis: &CorpusAnalysis,
    preview_limit: usize,
) -> std::fmt::Result {
    writeln!(out, "JSON Files Analysis Report")?;
    writeln!(out, "Total files analyzed: {}", analysis.total_documents)?;
    writeln!(out)?;

    writeln!(out, "Field Frequency:")?;
    for (field, count) in analysis.sorted_frequencies() {
        writeln!(
            out,
            "  {}: {} ({:.2}%)",
            field,
            count,
            analysis.frequency_percent(field)
        )?;
    }

    writeln!(out)?;
    writeln!(out, "Missing Fields:")?;
    for deviation in analysis.deviations.iter().filter(|d| !d.missing.is_empty()) {
        writeln!(out, "  {}: {}", deviation.file_name, deviation.missing.join(", "))?;
    }

    writeln!(out)?;
    writeln!(out, "Extra Fields:")?;
    for deviation in analysis.deviations.iter().filter(|d| !d.extra.is_empty()) {
        writeln!(out, "  {}: {}", deviation.file_name, deviation.extra.join(", "))?;
    }

    writeln!(out)?;
    writeln!(out, "File Grouping:")?;
    for group in &analysis.groups {
        writeln!(out, "  Group {} ({} files):", group.id, group.len())?;
        writeln!(out, "    Fields: {}", group.fingerprint)?;
        let preview: Vec<&str> = group.member_names().take(preview_limit).collect();
        let ellipsis = if group.len() > preview_limit { "..." } else { "" };
        writeln!(out, "    Files: {}{}", preview.join(", "), ellipsis)?;
    }

    if analysis.has_failures() {
        writeln!(out)?;
        writeln!(out, "Skipped Files:")?;
        for failure in &analysis.failures {
            writeln!(out, "  {}: {}", failure.path.display(), failure.message)?;
        }
    }

    Ok(())
}

#[derive(Serialize)]
struct JsonReport<'a> {
    root: &'a Path,
    statistics: &'a AnalysisStatistics,
    #[serde(flatten)]
    analysis: &'a CorpusAnalysis,
}

/// Machine-readable report
pub fn render_json(report: &ScanReport) -> AnalysisResult<String> {
    let document = JsonReport {
        root: &report.root,
        statistics: &report.statistics,
        analysis: &report.analysis,
    };
    serde_json::to_string_pretty(&document)
        .map_err(|e| AnalysisError::export(format!("Cannot serialize report: {}", e)))
}
