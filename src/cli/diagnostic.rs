//! Miette-based error diagnostics for CLI errors.

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Problem file that could not be parsed, with source location.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(planar_lp::problem_file))]
pub struct ProblemFileError {
    pub message: String,

    #[source_code]
    pub src: String,

    #[label("here")]
    pub span: Option<SourceSpan>,

    #[help]
    pub help: Option<String>,
}

impl ProblemFileError {
    pub fn new(message: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            src: src.into(),
            span: None,
            help: None,
        }
    }

    #[must_use]
    pub fn with_span(mut self, offset: usize, len: usize) -> Self {
        self.span = Some((offset, len).into());
        self
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// Configuration file that failed to load or validate.
#[derive(Debug, Error, Diagnostic)]
#[error("invalid configuration in {path}: {message}")]
#[diagnostic(
    code(planar_lp::config),
    help("every section is optional; remove a key to fall back to its default")
)]
pub struct ConfigFileError {
    pub path: String,
    pub message: String,
}

impl ConfigFileError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}
