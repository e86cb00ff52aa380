//! Error types for layoutmap.
//!
//! Library crates use [`LayoutMapError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all layoutmap operations.
///
/// Only the first three variants can come out of an extraction; everything a
/// malformed layout fragment or a missing attribute can cause is absorbed by
/// the extractors themselves.
#[derive(Debug, thiserror::Error)]
pub enum LayoutMapError {
    /// The combined export is not well-formed XML.
    #[error("Invalid XML: the document could not be parsed")]
    XmlSyntax { detail: String },

    /// The outer `<ExportResult>` container is absent.
    #[error("Missing root element: expected <ExportResult>")]
    MissingRoot,

    /// The layout sub-section is absent.
    #[error("Missing layout data: expected <ExportResult>/<LayoutExport>/<Layouts>")]
    MissingLayoutData,

    /// Malformed request envelope or unknown task.
    #[error("protocol error: {message}")]
    Protocol { message: String },

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, LayoutMapError>;

impl LayoutMapError {
    /// Create an XML syntax error, keeping the parser's diagnostic as detail.
    pub fn xml_syntax(detail: impl Into<String>) -> Self {
        Self::XmlSyntax {
            detail: detail.into(),
        }
    }

    /// Create a protocol error from any displayable message.
    pub fn protocol(msg: impl Into<String>) -> Self {
        Self::Protocol {
            message: msg.into(),
        }
    }

    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Stable kind name reported to callers of the task envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::XmlSyntax { .. } => "XmlSyntaxError",
            Self::MissingRoot => "MissingRootError",
            Self::MissingLayoutData => "MissingLayoutDataError",
            Self::Protocol { .. } => "ProtocolError",
            Self::Config { .. } => "ConfigError",
            Self::Io { .. } => "IoError",
        }
    }

    /// Diagnostic trace: the kind and message, then one line per cause.
    pub fn stack(&self) -> String {
        let mut stack = format!("{}: {self}", self.kind());

        if let Self::XmlSyntax { detail } = self {
            stack.push_str(&format!("\n    caused by: {detail}"));
        }

        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            stack.push_str(&format!("\n    caused by: {err}"));
            source = err.source();
        }

        stack
    }
}
