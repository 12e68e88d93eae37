//! Validation of serialized records exchanged between tools.
//!
//! Analyzer output is usually persisted as JSON and picked up later by
//! another process. This module reads such files back through the same
//! `from_mapping` path a consumer would use and reports everything that
//! breaks the contract: unparseable JSON, missing or unknown fields,
//! out-of-range values, duplicate chunk ids.
//!
//! A result file holds one result object. A chunks file holds an array
//! of chunk objects; a single object is accepted as a one-element list.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use analysis_framework_core::{ChunkInfo, ChunkStrategy, Record, UnifiedAnalysisResult};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::ValidationConfig;

/// Which record type a file is expected to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Result,
    Chunks,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Result => f.write_str("result"),
            Self::Chunks => f.write_str("chunks"),
        }
    }
}

/// Outcome of validating one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub kind: RecordKind,
    /// Records successfully parsed.
    pub records: usize,
    pub problems: Vec<String>,
}

impl FileReport {
    pub fn is_ok(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Validate a file, or every `*.json` file under a directory.
///
/// Directory entries are visited recursively and sorted by path. With
/// `fail_fast`, stops after the first file that has problems.
pub fn validate_path(path: &Path, kind: RecordKind, config: &ValidationConfig) -> Vec<FileReport> {
    let files = collect_files(path);
    let mut reports = Vec::with_capacity(files.len());

    for file in files {
        let report = validate_file(&file, kind, config);
        if report.is_ok() {
            debug!(path = %file.display(), records = report.records, "valid");
        } else {
            warn!(path = %file.display(), problems = report.problems.len(), "invalid");
        }
        let stop = config.fail_fast && !report.is_ok();
        reports.push(report);
        if stop {
            break;
        }
    }

    reports
}

fn collect_files(path: &Path) -> Vec<PathBuf> {
    if !path.is_dir() {
        return vec![path.to_path_buf()];
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!(error = %err, "skipping unreadable entry");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| {
            p.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
        })
        .collect();
    files.sort();
    files
}

/// Validate a single file.
pub fn validate_file(path: &Path, kind: RecordKind, config: &ValidationConfig) -> FileReport {
    let mut report = FileReport {
        path: path.to_path_buf(),
        kind,
        records: 0,
        problems: Vec::new(),
    };

    match std::fs::metadata(path) {
        Ok(meta) if meta.len() > config.max_file_bytes => {
            report.problems.push(format!(
                "file is {} bytes, above the {} byte limit",
                meta.len(),
                config.max_file_bytes
            ));
            return report;
        }
        Ok(_) => {}
        Err(e) => {
            report.problems.push(format!("cannot read file: {}", e));
            return report;
        }
    }

    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            report.problems.push(format!("cannot read file: {}", e));
            return report;
        }
    };

    let value: Value = match serde_json::from_str(&text) {
        Ok(v) => v,
        Err(e) => {
            report.problems.push(format!("invalid JSON: {}", e));
            return report;
        }
    };

    let (records, problems) = match kind {
        RecordKind::Result => check_result_value(value, config),
        RecordKind::Chunks => check_chunks_value(value, config),
    };
    report.records = records;
    report.problems = problems;
    report
}

/// Check one JSON value as a result record. Returns parsed count and problems.
pub fn check_result_value(value: Value, config: &ValidationConfig) -> (usize, Vec<String>) {
    let map = match value {
        Value::Object(map) => map,
        other => {
            return (
                0,
                vec![format!("expected a JSON object, found {}", json_type(&other))],
            )
        }
    };

    let result = match UnifiedAnalysisResult::from_mapping(map) {
        Ok(r) => r,
        Err(e) => return (0, vec![e.to_string()]),
    };

    let mut problems = Vec::new();
    if config.check_bounds {
        if let Err(violation) = result.validate() {
            problems.push(violation.to_string());
        }
    }
    (1, problems)
}

/// Check one JSON value as a chunk sequence. Returns parsed count and problems.
pub fn check_chunks_value(value: Value, config: &ValidationConfig) -> (usize, Vec<String>) {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(map) => vec![Value::Object(map)],
        other => {
            return (
                0,
                vec![format!("expected a JSON array of chunks, found {}", json_type(&other))],
            )
        }
    };

    let mut problems = Vec::new();
    let mut seen_ids = HashSet::new();
    let mut parsed = 0;

    for (index, item) in items.into_iter().enumerate() {
        let map = match item {
            Value::Object(map) => map,
            other => {
                problems.push(format!(
                    "chunk {}: expected a JSON object, found {}",
                    index,
                    json_type(&other)
                ));
                continue;
            }
        };
        let chunk = match ChunkInfo::from_mapping(map) {
            Ok(c) => c,
            Err(e) => {
                problems.push(format!("chunk {}: {}", index, e));
                continue;
            }
        };
        parsed += 1;

        if !seen_ids.insert(chunk.chunk_id.clone()) {
            problems.push(format!("chunk {}: duplicate chunk_id '{}'", index, chunk.chunk_id));
        }
        if config.check_bounds {
            if let Err(violation) = chunk.validate() {
                problems.push(format!("chunk {}: {}", index, violation));
            }
        }
        if config.strategy_vocabulary {
            if let Some(strategy) = chunk.get("strategy") {
                let known = strategy
                    .as_str()
                    .is_some_and(|s| s.parse::<ChunkStrategy>().is_ok());
                if !known {
                    problems.push(format!(
                        "chunk {}: strategy {} is not a standard strategy name",
                        index, strategy
                    ));
                }
            }
        }
    }

    (parsed, problems)
}

/// A mapping of `kind` with every declared field at its default value.
pub fn skeleton(kind: RecordKind) -> Value {
    match kind {
        RecordKind::Result => Value::Object(UnifiedAnalysisResult::new("", 0.0, "").to_mapping()),
        RecordKind::Chunks => {
            Value::Array(vec![Value::Object(ChunkInfo::new("", "").to_mapping())])
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
