//! Standard chunking strategy names.
//!
//! Conforming chunkers use these names verbatim for the behaviors they
//! support. Not every chunker supports every strategy, and a chunker may
//! declare names outside this vocabulary; see
//! [`Chunker::supported_strategies`](crate::Chunker::supported_strategies).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A named chunking approach.
///
/// | Variant | Name | Approach |
/// |---------|------|----------|
/// | `Auto` | `auto` | implementation picks the best strategy |
/// | `Hierarchical` | `hierarchical` | sections and headings |
/// | `SlidingWindow` | `sliding_window` | fixed-size overlapping windows |
/// | `ContentAware` | `content_aware` | semantic boundaries |
/// | `Structural` | `structural` | paragraphs, tables and other elements |
/// | `TableAware` | `table_aware` | special handling for tabular data |
/// | `PageAware` | `page_aware` | page boundaries of paginated documents |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkStrategy {
    #[default]
    Auto,
    Hierarchical,
    SlidingWindow,
    ContentAware,
    Structural,
    TableAware,
    PageAware,
}

impl ChunkStrategy {
    /// All strategies, in declaration order.
    pub const ALL: [ChunkStrategy; 7] = [
        ChunkStrategy::Auto,
        ChunkStrategy::Hierarchical,
        ChunkStrategy::SlidingWindow,
        ChunkStrategy::ContentAware,
        ChunkStrategy::Structural,
        ChunkStrategy::TableAware,
        ChunkStrategy::PageAware,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Hierarchical => "hierarchical",
            Self::SlidingWindow => "sliding_window",
            Self::ContentAware => "content_aware",
            Self::Structural => "structural",
            Self::TableAware => "table_aware",
            Self::PageAware => "page_aware",
        }
    }

    /// Upper-case variant name, e.g. `SLIDING_WINDOW`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Auto => "AUTO",
            Self::Hierarchical => "HIERARCHICAL",
            Self::SlidingWindow => "SLIDING_WINDOW",
            Self::ContentAware => "CONTENT_AWARE",
            Self::Structural => "STRUCTURAL",
            Self::TableAware => "TABLE_AWARE",
            Self::PageAware => "PAGE_AWARE",
        }
    }

    /// Look a strategy up by value (`sliding_window`) or by variant
    /// name (`SLIDING_WINDOW`).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.as_str() == name || s.name() == name)
    }

    /// The vocabulary as owned strings, handy for `supported_strategies`.
    pub fn all_names() -> Vec<String> {
        Self::ALL.iter().map(|s| s.as_str().to_string()).collect()
    }
}

impl fmt::Display for ChunkStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by [`ChunkStrategy::from_str`] for names outside the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown chunk strategy: {0}")]
pub struct UnknownStrategy(pub String);

impl FromStr for ChunkStrategy {
    type Err = UnknownStrategy;

    /// Parses the verbatim value only (`"auto"`, not `"AUTO"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| UnknownStrategy(s.to_string()))
    }
}

impl AsRef<str> for ChunkStrategy {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for ChunkStrategy {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for ChunkStrategy {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<ChunkStrategy> for &str {
    fn eq(&self, other: &ChunkStrategy) -> bool {
        *self == other.as_str()
    }
}
