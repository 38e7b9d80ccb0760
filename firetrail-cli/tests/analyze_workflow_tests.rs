//! Integration tests for the `firetrail` analyze workflow.
//!
//! Exercises the config-file → aggregation → filter path with real TOML
//! and log files, the same way the CLI wires it together.

use std::fs;

use tempfile::TempDir;

use firetrail_analyzer::{FiretrailConfig, LineParser, LogAggregator};

#[test]
fn test_config_load_valid_toml() {
    // Given: A valid config file
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("firetrail.toml");

    let valid_config = r#"
[general]
log_level = "info"
log_format = "json"

[analyzer]
log_file = "firewall_logs.txt"
filter_field = "action"
filter_value = "BLOCKED"
"#;

    fs::write(&config_path, valid_config).expect("should write config");

    // When: Loading the config
    let result = FiretrailConfig::load(&config_path);

    // Then: Should succeed
    assert!(result.is_ok(), "valid config should load successfully");
}

#[test]
fn test_config_load_rejects_bad_filter_field() {
    // Given: A config with a filter field that is not a record field
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("firetrail.toml");

    let invalid_config = r#"
[analyzer]
filter_field = "severity"
"#;

    fs::write(&config_path, invalid_config).expect("should write config");

    // When: Loading the config
    let result = FiretrailConfig::load(&config_path);

    // Then: Should fail validation
    assert!(result.is_err(), "unknown filter field should be rejected");
}

#[test]
fn test_config_load_rejects_broken_toml() {
    // Given: A syntactically broken config file
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("firetrail.toml");

    fs::write(&config_path, "[analyzer\nlog_file = ").expect("should write config");

    // When: Loading the config
    let result = FiretrailConfig::load(&config_path);

    // Then: Should fail with a parse error
    assert!(result.is_err(), "broken TOML should be rejected");
}

#[test]
fn test_analyze_workflow_with_configured_predicate() {
    // Given: A config file and a mixed log file
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("firetrail.toml");
    let log_path = temp_dir.path().join("fw.log");

    let config_toml = format!(
        r#"
[analyzer]
log_file = "{}"
filter_field = "protocol"
filter_value = "UDP"
"#,
        log_path.display()
    );
    fs::write(&config_path, config_toml).expect("should write config");

    let log_content = "\
SRC=1.1.1.1 DST=2.2.2.2 PROTO=TCP SPT=80 DPT=8080 ACTION=BLOCKED
noise line that matches nothing
SRC=3.3.3.3 DST=2.2.2.2 PROTO=UDP SPT=53 DPT=40000 ACTION=ALLOWED
";
    fs::write(&log_path, log_content).expect("should write log");

    // When: Running the aggregate-then-filter workflow the CLI performs
    let config = FiretrailConfig::load(&config_path).expect("config should load");
    let parser = LineParser::new()
        .expect("pattern compiles")
        .with_max_line_length(config.analyzer.max_line_length);
    let aggregator = LogAggregator::with_parser(parser);
    let collection = aggregator
        .aggregate_file(&config.analyzer.log_file)
        .expect("aggregation should succeed");
    let filtered =
        collection.filter_by_field(&config.analyzer.filter_field, &config.analyzer.filter_value);

    // Then: Two records parsed, one UDP record in the filtered view
    assert_eq!(collection.len(), 2);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered.records()[0].src_ip, "3.3.3.3");
}

#[test]
fn test_analyze_workflow_missing_source_is_reportable() {
    // Given: A default config pointing at a nonexistent file
    let temp_dir = TempDir::new().expect("should create temp dir");
    let missing = temp_dir.path().join("does_not_exist.txt");

    // When: Aggregating
    let aggregator = LogAggregator::new().expect("pattern compiles");
    let result = aggregator.aggregate_file(&missing);

    // Then: The absence is an explicit, renderable signal, not a panic
    let err = result.expect_err("missing file should be reported");
    assert!(err.to_string().contains("log source unavailable"));
}
