//! Registries for callers that hold several implementations.
//!
//! A pipeline usually wires up one analyzer per document family (XML,
//! office documents, tabular data) and wants the right one picked per
//! file. [`AnalyzerRegistry`] dispatches on the path's format and falls
//! through to the next claimant when one reports `UnsupportedFormat`;
//! [`ChunkerRegistry`] dispatches on the strategy name.
//!
//! ```rust
//! use analysis_framework_core::{AnalyzerRegistry, ChunkerRegistry};
//!
//! let mut analyzers = AnalyzerRegistry::new();
//! // analyzers.register(Box::new(MyAnalyzer::new()));
//! assert!(analyzers.is_empty());
//!
//! let chunkers = ChunkerRegistry::new();
//! assert!(chunkers.supported_strategies().is_empty());
//! ```

use std::path::Path;

use tracing::debug;

use crate::error::{FrameworkError, Result};
use crate::models::{ChunkInfo, UnifiedAnalysisResult};
use crate::traits::{Analyzer, Chunker, Options};

/// Analyzers in registration order.
pub struct AnalyzerRegistry {
    analyzers: Vec<Box<dyn Analyzer>>,
}

impl AnalyzerRegistry {
    pub fn new() -> Self {
        Self {
            analyzers: Vec::new(),
        }
    }

    pub fn register(&mut self, analyzer: Box<dyn Analyzer>) {
        self.analyzers.push(analyzer);
    }

    pub fn analyzers(&self) -> &[Box<dyn Analyzer>] {
        &self.analyzers
    }

    /// Union of all declared formats, first-seen order, without duplicates.
    pub fn supported_formats(&self) -> Vec<String> {
        let mut formats: Vec<String> = Vec::new();
        for analyzer in &self.analyzers {
            for format in analyzer.supported_formats() {
                if !formats.contains(&format) {
                    formats.push(format);
                }
            }
        }
        formats
    }

    /// First analyzer that declares the format of `path`.
    pub fn find_for(&self, path: &Path) -> Option<&dyn Analyzer> {
        self.analyzers
            .iter()
            .find(|a| a.supports_format(path))
            .map(|a| a.as_ref())
    }

    /// Analyze `path` with the first analyzer that accepts it.
    ///
    /// Analyzers that declare the format are tried in registration order.
    /// An `UnsupportedFormat` from one of them moves on to the next; any
    /// other error is returned as is.
    pub fn analyze(&self, path: &Path, options: &Options) -> Result<UnifiedAnalysisResult> {
        for (index, analyzer) in self.analyzers.iter().enumerate() {
            if !analyzer.supports_format(path) {
                continue;
            }
            match analyzer.analyze(path, options) {
                Err(FrameworkError::UnsupportedFormat(reason)) => {
                    debug!(
                        path = %path.display(),
                        analyzer = index,
                        %reason,
                        "analyzer declined file, trying next"
                    );
                }
                other => return other,
            }
        }
        Err(FrameworkError::unsupported_format_for(
            path,
            &self.supported_formats(),
        ))
    }

    pub fn is_empty(&self) -> bool {
        self.analyzers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.analyzers.len()
    }
}

impl Default for AnalyzerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Chunkers in registration order.
pub struct ChunkerRegistry {
    chunkers: Vec<Box<dyn Chunker>>,
}

impl ChunkerRegistry {
    pub fn new() -> Self {
        Self {
            chunkers: Vec::new(),
        }
    }

    pub fn register(&mut self, chunker: Box<dyn Chunker>) {
        self.chunkers.push(chunker);
    }

    pub fn chunkers(&self) -> &[Box<dyn Chunker>] {
        &self.chunkers
    }

    /// Union of all declared strategies, first-seen order, without duplicates.
    pub fn supported_strategies(&self) -> Vec<String> {
        let mut strategies: Vec<String> = Vec::new();
        for chunker in &self.chunkers {
            for strategy in chunker.supported_strategies() {
                if !strategies.contains(&strategy) {
                    strategies.push(strategy);
                }
            }
        }
        strategies
    }

    pub fn find_for(&self, strategy: &str) -> Option<&dyn Chunker> {
        self.chunkers
            .iter()
            .find(|c| c.supports_strategy(strategy))
            .map(|c| c.as_ref())
    }

    /// Chunk with the first chunker that declares `strategy`.
    pub fn chunk(
        &self,
        path: &Path,
        analysis: &UnifiedAnalysisResult,
        strategy: &str,
        options: &Options,
    ) -> Result<Vec<ChunkInfo>> {
        match self.find_for(strategy) {
            Some(chunker) => chunker.chunk(path, analysis, strategy, options),
            None => {
                debug!(strategy, "no chunker declares strategy");
                Err(FrameworkError::unknown_strategy(
                    strategy,
                    &self.supported_strategies(),
                ))
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.chunkers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.chunkers.len()
    }
}

impl Default for ChunkerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Declares `.txt` but refuses files whose name contains "binary".
    struct PickyText;

    impl Analyzer for PickyText {
        fn analyze(&self, path: &Path, _options: &Options) -> Result<UnifiedAnalysisResult> {
            self.ensure_supported(path)?;
            if path.to_string_lossy().contains("binary") {
                return Err(FrameworkError::unsupported_format("not really text"));
            }
            Ok(UnifiedAnalysisResult::new("Text", 0.6, "picky"))
        }

        fn supported_formats(&self) -> Vec<String> {
            vec![".txt".to_string()]
        }
    }

    struct AnyText;

    impl Analyzer for AnyText {
        fn analyze(&self, path: &Path, _options: &Options) -> Result<UnifiedAnalysisResult> {
            self.ensure_supported(path)?;
            if path.to_string_lossy().contains("broken") {
                return Err(FrameworkError::analysis_failed(path, "truncated input"));
            }
            Ok(UnifiedAnalysisResult::new("Text", 0.4, "any"))
        }

        fn supported_formats(&self) -> Vec<String> {
            vec![".txt".to_string(), ".md".to_string()]
        }
    }

    struct Windowed;

    impl Chunker for Windowed {
        fn chunk(
            &self,
            _path: &Path,
            _analysis: &UnifiedAnalysisResult,
            strategy: &str,
            _options: &Options,
        ) -> Result<Vec<ChunkInfo>> {
            self.ensure_strategy(strategy)?;
            Ok(vec![ChunkInfo::new("w0", "window")])
        }

        fn supported_strategies(&self) -> Vec<String> {
            vec!["auto".into(), "sliding_window".into()]
        }
    }

    struct Tabular;

    impl Chunker for Tabular {
        fn chunk(
            &self,
            _path: &Path,
            _analysis: &UnifiedAnalysisResult,
            strategy: &str,
            _options: &Options,
        ) -> Result<Vec<ChunkInfo>> {
            self.ensure_strategy(strategy)?;
            Ok(vec![ChunkInfo::new("t0", "| a | b |").with_chunk_type("table")])
        }

        fn supported_strategies(&self) -> Vec<String> {
            vec!["auto".into(), "table_aware".into()]
        }
    }

    fn analyzers() -> AnalyzerRegistry {
        let mut registry = AnalyzerRegistry::new();
        registry.register(Box::new(PickyText));
        registry.register(Box::new(AnyText));
        registry
    }

    #[test]
    fn test_formats_union_keeps_first_seen_order() {
        assert_eq!(analyzers().supported_formats(), vec![".txt", ".md"]);
    }

    #[test]
    fn test_first_claimant_wins() {
        let r = analyzers()
            .analyze(Path::new("notes.txt"), &Options::new())
            .unwrap();
        assert_eq!(r.framework, "picky");
    }

    #[test]
    fn test_falls_through_on_unsupported_format() {
        let r = analyzers()
            .analyze(Path::new("binary.txt"), &Options::new())
            .unwrap();
        assert_eq!(r.framework, "any");
    }

    #[test]
    fn test_analysis_error_is_not_swallowed() {
        let err = analyzers()
            .analyze(Path::new("broken.md"), &Options::new())
            .unwrap_err();
        assert!(matches!(err, FrameworkError::Analysis(_)));
        assert!(err.message().contains("truncated input"));
    }

    #[test]
    fn test_no_claimant_is_unsupported() {
        let err = analyzers()
            .analyze(Path::new("report.xyz"), &Options::new())
            .unwrap_err();
        assert!(err.is_unsupported_format());
        assert!(analyzers().find_for(Path::new("report.xyz")).is_none());
    }

    #[test]
    fn test_chunker_dispatch_by_strategy() {
        let mut registry = ChunkerRegistry::new();
        registry.register(Box::new(Windowed));
        registry.register(Box::new(Tabular));
        assert_eq!(
            registry.supported_strategies(),
            vec!["auto", "sliding_window", "table_aware"]
        );

        let analysis = UnifiedAnalysisResult::new("Sheet", 0.9, "data");
        let chunks = registry
            .chunk(Path::new("a.csv"), &analysis, "table_aware", &Options::new())
            .unwrap();
        assert_eq!(chunks[0].chunk_type, "table");

        let chunks = registry
            .chunk(Path::new("a.csv"), &analysis, "auto", &Options::new())
            .unwrap();
        assert_eq!(chunks[0].chunk_id, "w0");

        let err = registry
            .chunk(Path::new("a.csv"), &analysis, "bogus", &Options::new())
            .unwrap_err();
        assert!(matches!(err, FrameworkError::Chunking(ref m) if m.contains("bogus")));
    }

    #[test]
    fn test_empty_registries() {
        assert!(AnalyzerRegistry::default().is_empty());
        assert_eq!(ChunkerRegistry::default().len(), 0);
    }
}
