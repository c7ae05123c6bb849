//! Error types and handling infrastructure for corpus shape analysis

use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for analysis operations
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
    },

    #[error("JSON file too large: {size} bytes (limit: {limit} bytes)")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        limit: u64,
    },

    #[error("Maximum nesting depth {limit} exceeded at '{path}'")]
    DepthExceeded { path: String, limit: usize },

    #[error("Invalid configuration: {message}")]
    Configuration { message: String },

    #[error("Export failed: {message}")]
    Export { message: String },
}

impl AnalysisError {
    pub fn io(error: &std::io::Error, path: Option<&Path>) -> Self {
        Self::Io {
            message: error.to_string(),
            path: path.map(Path::to_path_buf),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn export(message: impl Into<String>) -> Self {
        Self::Export {
            message: message.into(),
        }
    }

    /// Path of the document the error refers to, when known
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Parse(err) => err.path.as_deref(),
            Self::Io { path, .. } => path.as_deref(),
            Self::FileTooLarge { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Create a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Parse(err) => {
                let prefix = match &err.path {
                    Some(path) => format!("{}: ", path.display()),
                    None => String::new(),
                };
                if let Some((line, col)) = err.location {
                    format!(
                        "{}JSON parse error at line {}, column {}: {}",
                        prefix, line, col, err.message
                    )
                } else {
                    format!("{}JSON parse error: {}", prefix, err.message)
                }
            }
            Self::Io {
                message,
                path: Some(path),
            } => format!("Cannot read {}: {}", path.display(), message),
            Self::FileTooLarge { path, size, limit } => format!(
                "{} is too large: {} bytes (limit: {} bytes)",
                path.display(),
                size,
                limit
            ),
            _ => self.to_string(),
        }
    }
}

/// JSON parsing errors
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub location: Option<(usize, usize)>,
    pub path: Option<PathBuf>,
}

impl ParseError {
    pub fn new(message: String, location: Option<(usize, usize)>) -> Self {
        Self {
            message,
            location,
            path: None,
        }
    }

    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.path = Some(path);
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(path) = &self.path {
            write!(f, "{}: ", path.display())?;
        }
        write!(f, "{}", self.message)?;
        if let Some((line, col)) = self.location {
            write!(f, " at line {}, column {}", line, col)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Result type for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Convenience result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;
