//! Error taxonomy shared by all analyzer and chunker implementations.
//!
//! [`FrameworkError`] is the single error type that [`Analyzer`](crate::Analyzer)
//! and [`Chunker`](crate::Chunker) implementations return. Its variants
//! form a two-level hierarchy: `Framework` is the root kind, and the
//! other three refine it. Matching on the enum catches everything;
//! matching on a variant catches one kind.
//!
//! | Kind | Raised when |
//! |------|-------------|
//! | [`UnsupportedFormat`](FrameworkError::UnsupportedFormat) | the file's format is not declared by the implementation |
//! | [`Analysis`](FrameworkError::Analysis) | a supported file could not be analyzed |
//! | [`Chunking`](FrameworkError::Chunking) | unknown strategy, or the strategy itself failed |
//! | [`Framework`](FrameworkError::Framework) | anything else |
//!
//! None of the kinds is fatal: callers fall back to another
//! implementation, skip the document, or surface the message.

use std::fmt;
use std::path::Path;

use thiserror::Error;

/// Failure raised by an analyzer or chunker implementation.
///
/// `Display` renders exactly the carried message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameworkError {
    #[error("{0}")]
    Framework(String),

    #[error("{0}")]
    UnsupportedFormat(String),

    #[error("{0}")]
    Analysis(String),

    #[error("{0}")]
    Chunking(String),
}

pub type Result<T> = std::result::Result<T, FrameworkError>;

/// The kind of a [`FrameworkError`], without its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Framework,
    UnsupportedFormat,
    Analysis,
    Chunking,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Framework => "framework",
            Self::UnsupportedFormat => "unsupported_format",
            Self::Analysis => "analysis",
            Self::Chunking => "chunking",
        }
    }

    /// Whether this kind is `ancestor` or refines it.
    ///
    /// Every kind is a `Framework` error; the refinements are only
    /// themselves.
    pub fn is_a(&self, ancestor: ErrorKind) -> bool {
        *self == ancestor || ancestor == ErrorKind::Framework
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FrameworkError {
    pub fn framework(message: impl Into<String>) -> Self {
        Self::Framework(message.into())
    }

    pub fn unsupported_format(message: impl Into<String>) -> Self {
        Self::UnsupportedFormat(message.into())
    }

    pub fn analysis(message: impl Into<String>) -> Self {
        Self::Analysis(message.into())
    }

    pub fn chunking(message: impl Into<String>) -> Self {
        Self::Chunking(message.into())
    }

    /// `UnsupportedFormat` naming the rejected path and the declared formats.
    pub fn unsupported_format_for(path: &Path, formats: &[String]) -> Self {
        Self::UnsupportedFormat(format!(
            "Cannot analyze {}: supported formats are [{}]",
            path.display(),
            formats.join(", ")
        ))
    }

    /// `Chunking` for a strategy name the implementation does not declare.
    pub fn unknown_strategy(strategy: &str, supported: &[String]) -> Self {
        Self::Chunking(format!(
            "Unknown chunking strategy: {} (supported: [{}])",
            strategy,
            supported.join(", ")
        ))
    }

    /// `Analysis` wrapping the underlying failure of a supported file.
    pub fn analysis_failed(path: &Path, source: impl fmt::Display) -> Self {
        Self::Analysis(format!("Failed to analyze {}: {}", path.display(), source))
    }

    /// `Chunking` wrapping the failure of a strategy that was accepted.
    pub fn chunking_failed(strategy: &str, source: impl fmt::Display) -> Self {
        Self::Chunking(format!("Chunking with strategy '{}' failed: {}", strategy, source))
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Framework(_) => ErrorKind::Framework,
            Self::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            Self::Analysis(_) => ErrorKind::Analysis,
            Self::Chunking(_) => ErrorKind::Chunking,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Framework(m) | Self::UnsupportedFormat(m) | Self::Analysis(m) | Self::Chunking(m) => m,
        }
    }

    pub fn is_unsupported_format(&self) -> bool {
        matches!(self, Self::UnsupportedFormat(_))
    }
}

/// Failure converting a record to or from a generic mapping.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("'{key}' not found in {record}")]
    MissingKey { key: String, record: &'static str },

    #[error("invalid {record} mapping: {source}")]
    Invalid {
        record: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// A record value outside the documented contract.
///
/// Construction never checks these; call `validate()` on a record to
/// opt in.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContractViolation {
    #[error("confidence {0} is outside [0.0, 1.0]")]
    ConfidenceOutOfRange(f64),

    #[error("token_count {0} is negative")]
    NegativeTokenCount(i64),
}
