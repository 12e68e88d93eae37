//! Conformance checks for analyzer and chunker implementations.
//!
//! Framework authors call these from their own test suites to confirm an
//! implementation honors the shared contract:
//!
//! | Check | Contract |
//! |-------|----------|
//! | `formats_stable` / `strategies_stable` | capability queries return the same list twice |
//! | `unsupported_format` | an undeclared extension fails with `UnsupportedFormat`, never `Analysis` |
//! | `unknown_strategy` | an undeclared strategy fails with `Chunking` naming the strategy |
//! | `bounds` | record values are inside their documented ranges |
//! | `access_modes` | field, key and get-with-default reads agree |
//! | `round_trip` | `from_mapping(to_mapping(r)) == r` |
//! | `unique_ids` | chunk ids are unique within one chunking call |
//!
//! ```rust,no_run
//! # use analysis_framework::conformance::check_analyzer;
//! # use analysis_framework_core::Analyzer;
//! # fn example(analyzer: &dyn Analyzer) {
//! let report = check_analyzer(analyzer, std::path::Path::new("probe.unsupported-ext"));
//! assert!(report.passed(), "{:?}", report.failures());
//! # }
//! ```

use std::collections::HashSet;
use std::path::Path;

use analysis_framework_core::{
    Analyzer, ChunkInfo, Chunker, FrameworkError, Options, Record, UnifiedAnalysisResult,
};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// Result of a single named check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckOutcome {
    pub check: &'static str,
    pub passed: bool,
    /// Why the check failed; empty when it passed.
    pub detail: String,
}

impl CheckOutcome {
    fn pass(check: &'static str) -> Self {
        Self {
            check,
            passed: true,
            detail: String::new(),
        }
    }

    fn fail(check: &'static str, detail: impl Into<String>) -> Self {
        Self {
            check,
            passed: false,
            detail: detail.into(),
        }
    }

    fn from_problem(check: &'static str, problem: Option<String>) -> Self {
        match problem {
            None => Self::pass(check),
            Some(detail) => Self::fail(check, detail),
        }
    }
}

/// All outcomes for one subject (an implementation or a record set).
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConformanceReport {
    pub subject: String,
    pub checks: Vec<CheckOutcome>,
}

impl ConformanceReport {
    fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            checks: Vec::new(),
        }
    }

    fn push(&mut self, outcome: CheckOutcome) {
        if !outcome.passed {
            debug!(subject = %self.subject, check = outcome.check, detail = %outcome.detail, "check failed");
        }
        self.checks.push(outcome);
    }

    fn merge(&mut self, other: ConformanceReport) {
        for outcome in other.checks {
            self.push(outcome);
        }
    }

    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    pub fn failures(&self) -> Vec<&CheckOutcome> {
        self.checks.iter().filter(|c| !c.passed).collect()
    }

    /// Outcome of the named check, if it ran.
    pub fn outcome(&self, check: &str) -> Option<&CheckOutcome> {
        self.checks.iter().find(|c| c.check == check)
    }
}

/// Check an analyzer's capability query and unsupported-format behavior.
///
/// `unsupported_probe` must be a path whose extension the analyzer does
/// not declare; it does not need to exist. If the analyzer claims it
/// anyway, the `unsupported_format` check fails.
pub fn check_analyzer(analyzer: &dyn Analyzer, unsupported_probe: &Path) -> ConformanceReport {
    let mut report = ConformanceReport::new("analyzer");

    let first = analyzer.supported_formats();
    let second = analyzer.supported_formats();
    report.push(if first == second {
        CheckOutcome::pass("formats_stable")
    } else {
        CheckOutcome::fail(
            "formats_stable",
            format!("first call {:?}, second call {:?}", first, second),
        )
    });

    let outcome = if analyzer.supports_format(unsupported_probe) {
        CheckOutcome::fail(
            "unsupported_format",
            format!(
                "probe {} matches declared formats {:?}",
                unsupported_probe.display(),
                first
            ),
        )
    } else {
        match analyzer.analyze(unsupported_probe, &Options::new()) {
            Err(FrameworkError::UnsupportedFormat(_)) => CheckOutcome::pass("unsupported_format"),
            Err(other) => CheckOutcome::fail(
                "unsupported_format",
                format!("expected unsupported_format, got {}: {}", other.kind(), other),
            ),
            Ok(_) => CheckOutcome::fail(
                "unsupported_format",
                format!("{} was analyzed", unsupported_probe.display()),
            ),
        }
    };
    report.push(outcome);

    report
}

/// Check a chunker's capability query, unknown-strategy behavior, and
/// the chunks it produces for each declared strategy.
///
/// `path` and `analysis` should describe a document the chunker can
/// process. A declared strategy that fails on it is reported as a
/// failed `strategy` check naming the strategy.
pub fn check_chunker(
    chunker: &dyn Chunker,
    path: &Path,
    analysis: &UnifiedAnalysisResult,
) -> ConformanceReport {
    let mut report = ConformanceReport::new("chunker");

    let first = chunker.supported_strategies();
    let second = chunker.supported_strategies();
    report.push(if first == second {
        CheckOutcome::pass("strategies_stable")
    } else {
        CheckOutcome::fail(
            "strategies_stable",
            format!("first call {:?}, second call {:?}", first, second),
        )
    });

    let bogus = undeclared_strategy(&first);
    let outcome = match chunker.chunk(path, analysis, &bogus, &Options::new()) {
        Err(FrameworkError::Chunking(message)) if message.contains(&bogus) => {
            CheckOutcome::pass("unknown_strategy")
        }
        Err(FrameworkError::Chunking(message)) => CheckOutcome::fail(
            "unknown_strategy",
            format!("message does not name '{}': {}", bogus, message),
        ),
        Err(other) => CheckOutcome::fail(
            "unknown_strategy",
            format!("expected chunking, got {}: {}", other.kind(), other),
        ),
        Ok(chunks) => CheckOutcome::fail(
            "unknown_strategy",
            format!("'{}' produced {} chunks", bogus, chunks.len()),
        ),
    };
    report.push(outcome);

    for strategy in &first {
        match chunker.chunk(path, analysis, strategy, &Options::new()) {
            Ok(chunks) => report.merge(check_chunks(&chunks)),
            Err(e) => report.push(CheckOutcome::fail(
                "strategy",
                format!("'{}' failed: {}", strategy, e),
            )),
        }
    }

    report
}

/// Check one result record.
pub fn check_result(result: &UnifiedAnalysisResult) -> ConformanceReport {
    let mut report = ConformanceReport::new(format!("result from {}", result.framework));
    report.push(CheckOutcome::from_problem(
        "bounds",
        result.validate().err().map(|v| v.to_string()),
    ));
    report.push(CheckOutcome::from_problem("access_modes", access_mode_problem(result)));
    report.push(CheckOutcome::from_problem("round_trip", round_trip_problem(result)));
    report
}

/// Check one chunking output.
pub fn check_chunks(chunks: &[ChunkInfo]) -> ConformanceReport {
    let mut report = ConformanceReport::new(format!("{} chunks", chunks.len()));

    let mut seen = HashSet::new();
    let duplicates: Vec<&str> = chunks
        .iter()
        .filter(|c| !seen.insert(c.chunk_id.as_str()))
        .map(|c| c.chunk_id.as_str())
        .collect();
    report.push(if duplicates.is_empty() {
        CheckOutcome::pass("unique_ids")
    } else {
        CheckOutcome::fail("unique_ids", format!("duplicate ids {:?}", duplicates))
    });

    for chunk in chunks {
        let id = &chunk.chunk_id;
        report.push(CheckOutcome::from_problem(
            "bounds",
            chunk.validate().err().map(|v| format!("{}: {}", id, v)),
        ));
        report.push(CheckOutcome::from_problem(
            "access_modes",
            access_mode_problem(chunk).map(|p| format!("{}: {}", id, p)),
        ));
        report.push(CheckOutcome::from_problem(
            "round_trip",
            round_trip_problem(chunk).map(|p| format!("{}: {}", id, p)),
        ));
    }

    report
}

fn access_mode_problem<R: Record>(record: &R) -> Option<String> {
    let mapping = record.to_mapping();
    let sentinel = Value::String("\u{0}missing".to_string());

    for name in R::FIELDS {
        let by_get = record.get(name);
        let by_key = record.require(name).ok();
        let by_default = record.get_or(name, sentinel.clone());
        let in_mapping = mapping.get(*name);
        if by_get.is_none()
            || by_get != by_key
            || by_get.as_ref() != Some(&by_default)
            || by_get.as_ref() != in_mapping
            || !record.contains_key(name)
        {
            return Some(format!("access modes disagree on field '{}'", name));
        }
    }

    for map in record.extra_maps() {
        for key in map.keys() {
            if R::FIELDS.contains(&key.as_str()) {
                continue;
            }
            if record.get(key).is_none() || !record.contains_key(key) {
                return Some(format!("open-map key '{}' is not reachable by lookup", key));
            }
        }
    }

    None
}

fn round_trip_problem<R: Record + PartialEq>(record: &R) -> Option<String> {
    match R::from_mapping(record.to_mapping()) {
        Ok(back) if back == *record => None,
        Ok(_) => Some("record changed after mapping round trip".to_string()),
        Err(e) => Some(e.to_string()),
    }
}

/// A strategy name guaranteed absent from `declared`.
fn undeclared_strategy(declared: &[String]) -> String {
    let mut candidate = "bogus".to_string();
    while declared.contains(&candidate) {
        candidate.push('_');
    }
    candidate
}
