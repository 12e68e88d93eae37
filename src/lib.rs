//! # Analysis Framework
//!
//! **Shared interfaces for document analysis frameworks.**
//!
//! Several independent tools analyze documents (XML, office formats,
//! tabular data) and split them into chunks for LLM and RAG pipelines.
//! This package fixes the shapes they exchange so callers can swap one
//! tool for another without rewriting glue code.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐  analyze   ┌───────────────────────┐  chunk   ┌─────────────┐
//! │   Analyzer   │──────────▶│ UnifiedAnalysisResult │────────▶│  Chunker    │
//! │ (per format) │            └───────────────────────┘          └──────┬──────┘
//! └──────────────┘                                                      ▼
//!                                                              Vec<ChunkInfo>
//! ```
//!
//! The contract itself lives in `analysis-framework-core` and is
//! re-exported here. This crate adds tooling built only on that contract:
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`conformance`] | Checks an implementer runs against their analyzer or chunker |
//! | [`validate`] | Validates serialized results and chunk lists on disk |
//! | [`config`] | TOML configuration for the `afw` tool |
//! | [`logging`] | Tracing subscriber setup for the `afw` tool |
//!
//! ## Quick Start
//!
//! ```bash
//! afw strategies                       # list the standard strategy names
//! afw schema result                    # print an empty result mapping
//! afw validate result out/report.json  # check a serialized result
//! afw validate chunks out/chunks/      # check every chunk file in a directory
//! ```

pub mod config;
pub mod conformance;
pub mod logging;
pub mod validate;

pub use analysis_framework_core::{
    error, models, record, registry, strategy, traits, Analyzer, AnalyzerRegistry, ChunkInfo,
    ChunkStrategy, Chunker, ChunkerRegistry, ContractViolation, ErrorKind, FrameworkError,
    Metadata, Options, Record, RecordError, UnifiedAnalysisResult, CONTRACT_VERSION,
};
