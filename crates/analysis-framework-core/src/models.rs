//! Record types passed between analyzers, chunkers and their callers.
//!
//! [`UnifiedAnalysisResult`] is what every [`Analyzer`](crate::Analyzer)
//! returns, whichever framework produced it. [`ChunkInfo`] is one slice
//! of a document produced by a [`Chunker`](crate::Chunker), suitable for
//! embedding and vector storage.
//!
//! Both are plain values: construct once, read afterwards. Open-ended
//! data lives in [`Metadata`] maps whose values are restricted to JSON
//! (strings, numbers, booleans, null, arrays, string-keyed objects), so
//! every record converts losslessly to and from a generic mapping.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::ContractViolation;
use crate::record::Record;

/// String-keyed map of JSON values.
pub type Metadata = serde_json::Map<String, Value>;

/// Unified outcome of analyzing one document.
///
/// # Example
///
/// ```rust
/// use analysis_framework_core::{Record, UnifiedAnalysisResult};
/// use serde_json::json;
///
/// let result = UnifiedAnalysisResult::new("S1000D Technical Manual", 0.98, "xml-analysis-framework")
///     .with_metadata_entry("version", "4.2")
///     .with_metadata_entry("schema", "s1000d");
///
/// assert_eq!(result.document_type, "S1000D Technical Manual");
/// assert_eq!(result.require("confidence").unwrap(), json!(0.98));
/// assert_eq!(result.get("framework"), Some(json!("xml-analysis-framework")));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnifiedAnalysisResult {
    /// Human-readable document type, e.g. `"PDF Technical Manual"`.
    pub document_type: String,
    /// Detection confidence; the contract range is `[0.0, 1.0]`.
    pub confidence: f64,
    /// Implementation that produced the result, e.g. `"xml-analysis-framework"`.
    pub framework: String,
    #[serde(default)]
    pub metadata: Metadata,
    /// Extracted text. `None` when extraction was not performed.
    #[serde(default)]
    pub content: Option<String>,
    /// Suggested AI/ML use cases, most relevant first.
    #[serde(default)]
    pub ai_opportunities: Vec<String>,
    /// The producing implementation's unabridged output.
    #[serde(default)]
    pub raw_analysis: Metadata,
}

impl UnifiedAnalysisResult {
    pub fn new(
        document_type: impl Into<String>,
        confidence: f64,
        framework: impl Into<String>,
    ) -> Self {
        Self {
            document_type: document_type.into(),
            confidence,
            framework: framework.into(),
            metadata: Metadata::new(),
            content: None,
            ai_opportunities: Vec::new(),
            raw_analysis: Metadata::new(),
        }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_metadata_entry(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_ai_opportunities<I, S>(mut self, opportunities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ai_opportunities = opportunities.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_raw_analysis(mut self, raw_analysis: Metadata) -> Self {
        self.raw_analysis = raw_analysis;
        self
    }

    pub fn with_raw_analysis_entry(
        mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.raw_analysis.insert(key.into(), value.into());
        self
    }

    /// Check the documented value ranges.
    pub fn validate(&self) -> Result<(), ContractViolation> {
        if !self.confidence.is_finite() || !(0.0..=1.0).contains(&self.confidence) {
            return Err(ContractViolation::ConfidenceOutOfRange(self.confidence));
        }
        Ok(())
    }
}

impl Record for UnifiedAnalysisResult {
    const RECORD_NAME: &'static str = "UnifiedAnalysisResult";
    const FIELDS: &'static [&'static str] = &[
        "document_type",
        "confidence",
        "framework",
        "metadata",
        "content",
        "ai_opportunities",
        "raw_analysis",
    ];

    fn field(&self, name: &str) -> Option<Value> {
        let value = match name {
            "document_type" => Value::from(self.document_type.as_str()),
            "confidence" => Value::from(self.confidence),
            "framework" => Value::from(self.framework.as_str()),
            "metadata" => Value::Object(self.metadata.clone()),
            "content" => self.content.as_deref().map_or(Value::Null, Value::from),
            "ai_opportunities" => Value::from(self.ai_opportunities.clone()),
            "raw_analysis" => Value::Object(self.raw_analysis.clone()),
            _ => return None,
        };
        Some(value)
    }

    fn extra_maps(&self) -> Vec<&Metadata> {
        vec![&self.metadata, &self.raw_analysis]
    }
}

fn default_chunk_type() -> String {
    "text".to_string()
}

/// One chunk of a document.
///
/// # Example
///
/// ```rust
/// use analysis_framework_core::{ChunkInfo, Record};
/// use serde_json::json;
///
/// let chunk = ChunkInfo::new("doc1_chunk_001", "This is the content of the first chunk.")
///     .with_metadata_entry("page", 1)
///     .with_metadata_entry("section", "Introduction")
///     .with_token_count(42);
///
/// assert_eq!(chunk.chunk_id, "doc1_chunk_001");
/// assert_eq!(chunk.chunk_type, "text");
/// assert_eq!(chunk.require("content").unwrap(), json!("This is the content of the first chunk."));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChunkInfo {
    /// Unique within one chunking call.
    pub chunk_id: String,
    pub content: String,
    /// Position, source references and similar.
    #[serde(default)]
    pub metadata: Metadata,
    /// Estimated token count; the contract requires it to be non-negative.
    #[serde(default)]
    pub token_count: i64,
    /// e.g. `"text"`, `"paragraph"`, `"table"`, `"code"`, `"heading"`.
    #[serde(default = "default_chunk_type")]
    pub chunk_type: String,
}

impl ChunkInfo {
    pub fn new(chunk_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            chunk_id: chunk_id.into(),
            content: content.into(),
            metadata: Metadata::new(),
            token_count: 0,
            chunk_type: default_chunk_type(),
        }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_metadata_entry(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn with_token_count(mut self, token_count: i64) -> Self {
        self.token_count = token_count;
        self
    }

    pub fn with_chunk_type(mut self, chunk_type: impl Into<String>) -> Self {
        self.chunk_type = chunk_type.into();
        self
    }

    /// Lowercase hex SHA-256 of `content`.
    ///
    /// Stable across processes, so stores can detect stale embeddings
    /// without agreeing on an id scheme.
    pub fn content_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.content.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    pub fn validate(&self) -> Result<(), ContractViolation> {
        if self.token_count < 0 {
            return Err(ContractViolation::NegativeTokenCount(self.token_count));
        }
        Ok(())
    }
}

impl Record for ChunkInfo {
    const RECORD_NAME: &'static str = "ChunkInfo";
    const FIELDS: &'static [&'static str] =
        &["chunk_id", "content", "metadata", "token_count", "chunk_type"];

    fn field(&self, name: &str) -> Option<Value> {
        let value = match name {
            "chunk_id" => Value::from(self.chunk_id.as_str()),
            "content" => Value::from(self.content.as_str()),
            "metadata" => Value::Object(self.metadata.clone()),
            "token_count" => Value::from(self.token_count),
            "chunk_type" => Value::from(self.chunk_type.as_str()),
            _ => return None,
        };
        Some(value)
    }

    fn extra_maps(&self) -> Vec<&Metadata> {
        vec![&self.metadata]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_basic_result() {
        let r = UnifiedAnalysisResult::new("Test Document", 0.95, "test-framework");
        assert_eq!(r.document_type, "Test Document");
        assert_eq!(r.confidence, 0.95);
        assert_eq!(r.framework, "test-framework");
        assert!(r.metadata.is_empty());
        assert!(r.content.is_none());
        assert!(r.ai_opportunities.is_empty());
        assert!(r.raw_analysis.is_empty());
    }

    #[test]
    fn test_scenario_technical_manual() {
        let r = UnifiedAnalysisResult::new("Technical Manual", 0.95, "demo")
            .with_metadata_entry("version", "1.0")
            .with_content("Hello world")
            .with_ai_opportunities(["summarization"]);
        assert_eq!(r.require("confidence").unwrap(), json!(0.95));
        assert_eq!(r.to_mapping()["ai_opportunities"], json!(["summarization"]));
        assert_eq!(r.get("version"), Some(json!("1.0")));
    }

    #[test]
    fn test_ai_opportunities_keep_order() {
        let r = UnifiedAnalysisResult::new("Test", 1.0, "test")
            .with_ai_opportunities(["QA", "Summarization", "Classification"]);
        assert_eq!(
            r.to_mapping()["ai_opportunities"],
            json!(["QA", "Summarization", "Classification"])
        );
    }

    #[test]
    fn test_result_validate() {
        assert!(UnifiedAnalysisResult::new("T", 0.0, "f").validate().is_ok());
        assert!(UnifiedAnalysisResult::new("T", 1.0, "f").validate().is_ok());
        assert_eq!(
            UnifiedAnalysisResult::new("T", 1.5, "f").validate(),
            Err(ContractViolation::ConfidenceOutOfRange(1.5))
        );
        assert!(UnifiedAnalysisResult::new("T", -0.1, "f").validate().is_err());
        assert!(UnifiedAnalysisResult::new("T", f64::NAN, "f").validate().is_err());
    }

    #[test]
    fn test_basic_chunk() {
        let c = ChunkInfo::new("chunk_001", "Test content");
        assert_eq!(c.chunk_id, "chunk_001");
        assert_eq!(c.content, "Test content");
        assert!(c.metadata.is_empty());
        assert_eq!(c.token_count, 0);
        assert_eq!(c.chunk_type, "text");
    }

    #[test]
    fn test_chunk_mapping() {
        let c = ChunkInfo::new("test_001", "Test content")
            .with_metadata_entry("source", "test.txt")
            .with_token_count(10)
            .with_chunk_type("paragraph");
        let m = c.to_mapping();
        assert_eq!(m["chunk_id"], json!("test_001"));
        assert_eq!(m["content"], json!("Test content"));
        assert_eq!(m["metadata"]["source"], json!("test.txt"));
        assert_eq!(m["token_count"], json!(10));
        assert_eq!(m["chunk_type"], json!("paragraph"));
    }

    #[test]
    fn test_chunk_types() {
        for kind in ["text", "code", "table"] {
            let c = ChunkInfo::new("c", kind).with_chunk_type(kind);
            assert_eq!(c.chunk_type, kind);
        }
    }

    #[test]
    fn test_chunk_validate() {
        assert!(ChunkInfo::new("c", "").validate().is_ok());
        assert_eq!(
            ChunkInfo::new("c", "").with_token_count(-3).validate(),
            Err(ContractViolation::NegativeTokenCount(-3))
        );
    }

    #[test]
    fn test_content_hash() {
        let a = ChunkInfo::new("a", "hello");
        let b = ChunkInfo::new("b", "hello");
        assert_eq!(a.content_hash(), b.content_hash());
        assert_eq!(
            a.content_hash(),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
        assert_ne!(a.content_hash(), ChunkInfo::new("a", "hello!").content_hash());
    }

    #[test]
    fn test_metadata_order_irrelevant_for_equality() {
        let a = ChunkInfo::new("c", "x")
            .with_metadata_entry("page", 1)
            .with_metadata_entry("section", "Intro");
        let b = ChunkInfo::new("c", "x")
            .with_metadata_entry("section", "Intro")
            .with_metadata_entry("page", 1);
        assert_eq!(a, b);
    }
}
