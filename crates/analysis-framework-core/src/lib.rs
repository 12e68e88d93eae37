//! # Analysis Framework Core
//!
//! Shared contracts for document analysis frameworks: the result and
//! chunk records, the [`Analyzer`] and [`Chunker`] capability traits,
//! the chunking strategy vocabulary, and the error taxonomy.
//!
//! This crate performs no parsing, no chunking and no filesystem I/O.
//! Concrete analyzers and chunkers live in downstream crates and only
//! have to agree on the shapes defined here.
//!
//! ```rust
//! use analysis_framework_core::{Record, UnifiedAnalysisResult};
//! use serde_json::json;
//!
//! let result = UnifiedAnalysisResult::new("Technical Manual", 0.95, "demo")
//!     .with_content("Hello world")
//!     .with_ai_opportunities(["summarization"]);
//!
//! assert_eq!(result.document_type, "Technical Manual");
//! assert_eq!(result.require("confidence").unwrap(), json!(0.95));
//! assert_eq!(result.to_mapping()["ai_opportunities"], json!(["summarization"]));
//! ```

pub mod error;
pub mod models;
pub mod record;
pub mod registry;
pub mod strategy;
pub mod traits;

pub use error::{ContractViolation, ErrorKind, FrameworkError, RecordError, Result};
pub use models::{ChunkInfo, Metadata, UnifiedAnalysisResult};
pub use record::Record;
pub use registry::{AnalyzerRegistry, ChunkerRegistry};
pub use strategy::ChunkStrategy;
pub use traits::{Analyzer, Chunker, Options};

/// Version of the contract these types describe.
pub const CONTRACT_VERSION: &str = "1.0.0";
