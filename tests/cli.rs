use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn afw_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_afw"))
}

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    let out_dir = root.join("out");
    fs::create_dir_all(out_dir.join("chunks")).unwrap();

    fs::write(
        out_dir.join("report.json"),
        r#"{
  "document_type": "Technical Manual",
  "confidence": 0.95,
  "framework": "demo",
  "metadata": {"version": "1.0"},
  "content": "Hello world",
  "ai_opportunities": ["summarization"],
  "raw_analysis": {"sections": [{"title": "Intro", "depth": 1}]}
}"#,
    )
    .unwrap();
    fs::write(
        out_dir.join("overconfident.json"),
        r#"{"document_type": "Memo", "confidence": 1.4, "framework": "demo"}"#,
    )
    .unwrap();
    fs::write(
        out_dir.join("chunks").join("manual.json"),
        r#"[
  {"chunk_id": "manual_0", "content": "Hello", "token_count": 2, "chunk_type": "paragraph",
   "metadata": {"strategy": "structural", "page": 1}},
  {"chunk_id": "manual_1", "content": "world", "token_count": 2, "chunk_type": "paragraph",
   "metadata": {"strategy": "structural", "page": 1}}
]"#,
    )
    .unwrap();

    let config_path = config_dir.join("afw.toml");
    fs::write(
        &config_path,
        r#"[logging]
level = "warn"

[validation]
check_bounds = true
strategy_vocabulary = true
"#,
    )
    .unwrap();

    (tmp, config_path)
}

fn run_afw(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = afw_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run afw binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

#[test]
fn test_strategies_lists_vocabulary() {
    let (_tmp, config) = setup_test_env();
    let (stdout, stderr, ok) = run_afw(&config, &["strategies"]);
    assert!(ok, "strategies failed: {}", stderr);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "auto",
            "hierarchical",
            "sliding_window",
            "content_aware",
            "structural",
            "table_aware",
            "page_aware"
        ]
    );
}

#[test]
fn test_strategies_json() {
    let (_tmp, config) = setup_test_env();
    let (stdout, _, ok) = run_afw(&config, &["strategies", "--json"]);
    assert!(ok);
    let names: Vec<String> = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(names.len(), 7);
    assert_eq!(names[2], "sliding_window");
}

#[test]
fn test_schema_result() {
    let (_tmp, config) = setup_test_env();
    let (stdout, _, ok) = run_afw(&config, &["schema", "result"]);
    assert!(ok);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
    assert_eq!(
        keys,
        vec![
            "document_type",
            "confidence",
            "framework",
            "metadata",
            "content",
            "ai_opportunities",
            "raw_analysis"
        ]
    );
    assert!(value["content"].is_null());
}

#[test]
fn test_validate_good_result() {
    let (tmp, config) = setup_test_env();
    let report = tmp.path().join("out").join("report.json");
    let (stdout, stderr, ok) = run_afw(&config, &["validate", "result", report.to_str().unwrap()]);
    assert!(ok, "validate failed: {}{}", stdout, stderr);
    assert!(stdout.contains("ok"));
    assert!(stdout.contains("1 files checked, 0 invalid"));
}

#[test]
fn test_validate_out_of_range_result_fails() {
    let (tmp, config) = setup_test_env();
    let bad = tmp.path().join("out").join("overconfident.json");
    let (stdout, _, ok) = run_afw(&config, &["validate", "result", bad.to_str().unwrap()]);
    assert!(!ok);
    assert!(stdout.contains("invalid"));
    assert!(stdout.contains("confidence 1.4 is outside [0.0, 1.0]"));
}

#[test]
fn test_validate_chunk_directory_json() {
    let (tmp, config) = setup_test_env();
    let dir = tmp.path().join("out").join("chunks");
    let (stdout, stderr, ok) = run_afw(
        &config,
        &["validate", "chunks", dir.to_str().unwrap(), "--json"],
    );
    assert!(ok, "validate failed: {}", stderr);
    let reports: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let reports = reports.as_array().unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0]["kind"], "chunks");
    assert_eq!(reports[0]["records"], 2);
    assert_eq!(reports[0]["problems"].as_array().unwrap().len(), 0);
}

#[test]
fn test_validate_flags_nonstandard_strategy() {
    let (tmp, config) = setup_test_env();
    let file = tmp.path().join("out").join("custom.json");
    fs::write(
        &file,
        r#"[{"chunk_id": "c0", "content": "x", "metadata": {"strategy": "paragraph"}}]"#,
    )
    .unwrap();
    let (stdout, _, ok) = run_afw(&config, &["validate", "chunks", file.to_str().unwrap()]);
    assert!(!ok);
    assert!(stdout.contains("not a standard strategy name"));
}

#[test]
fn test_missing_config_uses_defaults() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("nope.toml");
    let (stdout, _, ok) = run_afw(&missing, &["strategies"]);
    assert!(ok);
    assert!(stdout.starts_with("auto"));
}

#[test]
fn test_broken_config_is_reported() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("afw.toml");
    fs::write(&config, "[validation]\nmax_file_bytes = 0\n").unwrap();
    let (_, stderr, ok) = run_afw(&config, &["strategies"]);
    assert!(!ok);
    assert!(stderr.contains("max_file_bytes must be > 0"));
}
