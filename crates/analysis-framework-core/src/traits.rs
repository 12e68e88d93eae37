//! Capability traits that analysis frameworks implement.
//!
//! An [`Analyzer`] turns a document file into a [`UnifiedAnalysisResult`];
//! a [`Chunker`] splits an analyzed document into [`ChunkInfo`]s. The
//! traits fix inputs, outputs and failure kinds only. Detection,
//! extraction and slicing logic belongs entirely to the implementation.
//!
//! Both traits are `Send + Sync` so one instance can serve many threads;
//! whether an implementation blocks, spawns or caches internally is its
//! own business.
//!
//! # Example
//!
//! ```rust
//! use std::path::Path;
//! use analysis_framework_core::{Analyzer, FrameworkError, Options, UnifiedAnalysisResult};
//!
//! struct XmlAnalyzer;
//!
//! impl Analyzer for XmlAnalyzer {
//!     fn analyze(&self, path: &Path, _options: &Options) -> Result<UnifiedAnalysisResult, FrameworkError> {
//!         self.ensure_supported(path)?;
//!         Ok(UnifiedAnalysisResult::new("S1000D XML", 0.9, "xml-analysis-framework"))
//!     }
//!
//!     fn supported_formats(&self) -> Vec<String> {
//!         vec![".xml".to_string()]
//!     }
//! }
//!
//! let err = XmlAnalyzer.analyze(Path::new("document.pdf"), &Options::new()).unwrap_err();
//! assert!(err.is_unsupported_format());
//! ```

use std::path::Path;

use crate::error::{FrameworkError, Result};
use crate::models::{ChunkInfo, UnifiedAnalysisResult};
use crate::strategy::ChunkStrategy;

/// Implementation-specific options, e.g. `{"extract_tables": true}`.
///
/// Keys an implementation does not recognize are ignored by convention.
pub type Options = serde_json::Map<String, serde_json::Value>;

/// Turns a document file into a [`UnifiedAnalysisResult`].
pub trait Analyzer: Send + Sync {
    /// Analyze the document at `path`.
    ///
    /// # Errors
    ///
    /// - [`FrameworkError::UnsupportedFormat`] if the path's format is not
    ///   in [`supported_formats`](Analyzer::supported_formats). This check
    ///   happens before any content is read; see
    ///   [`ensure_supported`](Analyzer::ensure_supported).
    /// - [`FrameworkError::Analysis`] if a supported file could not be
    ///   processed (malformed content, I/O failure). The message carries
    ///   the underlying failure text.
    fn analyze(&self, path: &Path, options: &Options) -> Result<UnifiedAnalysisResult>;

    /// File formats this analyzer handles, e.g. `[".xml", ".pdf", ".docx"]`.
    ///
    /// Must not have side effects and must return the same list on
    /// consecutive calls.
    fn supported_formats(&self) -> Vec<String>;

    /// Whether the file name of `path` ends with one of the declared formats.
    ///
    /// Matching ignores ASCII case, and formats may be declared with or
    /// without the leading dot. Multi-part formats such as `.tar.gz` work.
    fn supports_format(&self, path: &Path) -> bool {
        path_matches_formats(path, &self.supported_formats())
    }

    /// `Ok(())` if `path` is supported, otherwise the `UnsupportedFormat`
    /// error that [`analyze`](Analyzer::analyze) must return.
    fn ensure_supported(&self, path: &Path) -> Result<()> {
        let formats = self.supported_formats();
        if path_matches_formats(path, &formats) {
            Ok(())
        } else {
            Err(FrameworkError::unsupported_format_for(path, &formats))
        }
    }
}

/// Splits an analyzed document into ordered [`ChunkInfo`]s.
///
/// Not every framework needs one; query-oriented frameworks may ship an
/// [`Analyzer`] only.
pub trait Chunker: Send + Sync {
    /// Chunk the document at `path` using the named strategy.
    ///
    /// `analysis` is the result previously produced for the same file;
    /// most implementations slice its `content`. Chunks come back in
    /// document order unless the implementation documents otherwise.
    ///
    /// # Errors
    ///
    /// [`FrameworkError::Chunking`] if `strategy` is not in
    /// [`supported_strategies`](Chunker::supported_strategies) (see
    /// [`ensure_strategy`](Chunker::ensure_strategy)) or if the strategy
    /// fails while running.
    fn chunk(
        &self,
        path: &Path,
        analysis: &UnifiedAnalysisResult,
        strategy: &str,
        options: &Options,
    ) -> Result<Vec<ChunkInfo>>;

    /// Strategy names this chunker accepts, e.g. `["auto", "hierarchical"]`.
    ///
    /// Names from [`ChunkStrategy`] are used verbatim; other names are
    /// allowed. Same stability rules as
    /// [`Analyzer::supported_formats`].
    fn supported_strategies(&self) -> Vec<String>;

    /// [`chunk`](Chunker::chunk) with the default `"auto"` strategy.
    fn chunk_auto(
        &self,
        path: &Path,
        analysis: &UnifiedAnalysisResult,
        options: &Options,
    ) -> Result<Vec<ChunkInfo>> {
        self.chunk(path, analysis, ChunkStrategy::Auto.as_str(), options)
    }

    /// Exact, case-sensitive membership in the declared strategies.
    fn supports_strategy(&self, strategy: &str) -> bool {
        self.supported_strategies().iter().any(|s| s == strategy)
    }

    /// `Ok(())` if `strategy` is declared, otherwise the `Chunking` error
    /// that [`chunk`](Chunker::chunk) must return.
    fn ensure_strategy(&self, strategy: &str) -> Result<()> {
        let supported = self.supported_strategies();
        if supported.iter().any(|s| s == strategy) {
            Ok(())
        } else {
            Err(FrameworkError::unknown_strategy(strategy, &supported))
        }
    }
}

/// Normalize a declared format to a lowercase `.ext` suffix.
pub fn normalize_format(format: &str) -> String {
    let trimmed = format.trim().to_ascii_lowercase();
    if trimmed.starts_with('.') {
        trimmed
    } else {
        format!(".{}", trimmed)
    }
}

/// Whether the file name of `path` ends with any of `formats`.
///
/// A file named exactly like the suffix (e.g. `.md`) does not match.
pub fn path_matches_formats(path: &Path, formats: &[String]) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let name = name.to_ascii_lowercase();
    formats.iter().map(|f| normalize_format(f)).any(|suffix| {
        suffix.len() > 1 && name.len() > suffix.len() && name.ends_with(&suffix)
    })
}
