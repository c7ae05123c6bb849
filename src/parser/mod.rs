//! JSON document loading

pub mod directory;

use crate::analysis::config::AnalysisConfig;
use crate::error::{AnalysisError, AnalysisResult, ParseError, ParseResult};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Source for parsing operations
#[derive(Debug, Clone)]
pub enum JsonSource {
    String(String),
    File(PathBuf),
}

impl JsonSource {
    /// Parse JSON from this source
    pub fn parse(&self) -> AnalysisResult<Value> {
        match self {
            JsonSource::String(content) => Ok(parse_from_string(content)?),
            JsonSource::File(path) => {
                let content = std::fs::read_to_string(path)
                    .map_err(|e| AnalysisError::io(&e, Some(path.as_path())))?;
                parse_from_string(&content).map_err(|e| e.with_path(path.clone()).into())
            }
        }
    }

    /// Get a human-readable description of the source
    pub fn description(&self) -> String {
        match self {
            JsonSource::String(_) => "string input".to_string(),
            JsonSource::File(path) => format!("file: {}", path.display()),
        }
    }
}

/// One parsed document of the corpus
#[derive(Debug, Clone)]
pub struct Document {
    /// Display name, relative to the scanned directory
    pub name: String,
    pub path: PathBuf,
    pub content: Value,
}

impl Document {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, content: Value) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            content,
        }
    }

    /// Read and parse a document from disk, enforcing the configured size limit
    pub fn load(root: &Path, path: &Path, config: &AnalysisConfig) -> AnalysisResult<Self> {
        let metadata = std::fs::metadata(path).map_err(|e| AnalysisError::io(&e, Some(path)))?;
        if metadata.len() > config.max_file_size {
            return Err(AnalysisError::FileTooLarge {
                path: path.to_path_buf(),
                size: metadata.len(),
                limit: config.max_file_size,
            });
        }

        let content = JsonSource::File(path.to_path_buf()).parse()?;
        debug!(path = %path.display(), bytes = metadata.len(), "parsed document");

        Ok(Self::new(display_name(root, path), path, content))
    }
}

/// Name a file relative to the scanned root, using `/` separators
pub fn display_name(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Parse JSON from a string
fn parse_from_string(content: &str) -> ParseResult<Value> {
    if content.trim().is_empty() {
        return Err(ParseError::new("Empty JSON document".to_string(), None));
    }

    serde_json::from_str(content).map_err(|e| {
        let location = if e.line() > 0 {
            Some((e.line(), e.column()))
        } else {
            None
        };
        ParseError::new(format!("Invalid JSON: {}", e), location)
    })
}
