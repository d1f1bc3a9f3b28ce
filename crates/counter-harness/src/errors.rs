//! Error types for script loading and parsing.

use std::path::PathBuf;

use thiserror::Error;

/// A script line that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message} (in '{text}')")]
pub struct ScriptError {
    /// 1-indexed line number in the script.
    pub line: usize,
    /// The offending text, comments stripped.
    pub text: String,
    /// Description of the problem.
    pub message: String,
}

/// Failure loading a script from disk.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The script file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The script file was read but does not parse.
    #[error("{path}:{error}")]
    Parse {
        /// Path of the script.
        path: PathBuf,
        /// Parse failure.
        error: ScriptError,
    },
}

impl HarnessError {
    /// Wraps a parse error with the path it came from.
    #[must_use]
    pub fn parse(path: impl Into<PathBuf>, error: ScriptError) -> Self {
        Self::Parse {
            path: path.into(),
            error,
        }
    }
}
