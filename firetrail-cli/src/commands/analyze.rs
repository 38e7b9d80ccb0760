//! `firetrail analyze` command handler
//!
//! The presentation layer around the analyzer core: renders the full record
//! table and the filtered view, and reports the two non-fatal outcomes
//! (missing source, zero parsed records) as informational output with
//! exit code 0.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use firetrail_analyzer::{
    AnalyzerError, FiretrailConfig, LineParser, LogAggregator, LogRecord, ParseStats,
};

use crate::cli::AnalyzeArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

/// Execute the `analyze` command.
pub fn execute(
    args: AnalyzeArgs,
    config_path: &Path,
    writer: &OutputWriter,
) -> Result<(), CliError> {
    let config = FiretrailConfig::load_or_default(config_path)?;

    let (filter_field, filter_value) = match args.filter {
        Some(ref raw) => parse_filter(raw)?,
        None => (
            config.analyzer.filter_field.clone(),
            config.analyzer.filter_value.clone(),
        ),
    };

    let log_file = args
        .file
        .unwrap_or_else(|| PathBuf::from(&config.analyzer.log_file));

    let parser = LineParser::new()?.with_max_line_length(config.analyzer.max_line_length);
    let aggregator = LogAggregator::with_parser(parser);

    info!(path = %log_file.display(), "analyzing firewall log");

    let mut stats = ParseStats::default();
    let collection = match aggregator.aggregate_file_with(&log_file, &mut stats) {
        Ok(collection) => collection,
        Err(AnalyzerError::SourceUnavailable { path }) => {
            // Informational outcome, not a process failure.
            writer.render(&SourceMissingReport { source: path })?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    debug!(
        matched = stats.matched,
        skipped = stats.skipped,
        "parse decisions"
    );

    if collection.is_empty() {
        writer.render(&EmptyResultReport {
            source: log_file.display().to_string(),
            lines_seen: stats.skipped,
        })?;
        return Ok(());
    }

    let filtered = collection.filter_by_field(&filter_field, &filter_value);
    let report = AnalyzeReport {
        source: log_file.display().to_string(),
        total: collection.len(),
        skipped_lines: stats.skipped,
        filter_field,
        filter_value,
        records: collection.into_records(),
        filtered: filtered.into_records(),
    };

    writer.render(&report)?;

    Ok(())
}

/// Parse a `FIELD=VALUE` filter argument.
fn parse_filter(raw: &str) -> Result<(String, String), CliError> {
    let (field, value) = raw.split_once('=').ok_or_else(|| {
        CliError::Command(format!("invalid filter '{raw}' (expected FIELD=VALUE)"))
    })?;

    if !LogRecord::FIELD_NAMES.contains(&field) {
        return Err(CliError::Command(format!(
            "unknown filter field '{}' (expected one of: {})",
            field,
            LogRecord::FIELD_NAMES.join(", ")
        )));
    }

    Ok((field.to_owned(), value.to_owned()))
}

/// Write one record table with a header row.
fn write_table(w: &mut dyn Write, records: &[LogRecord]) -> std::io::Result<()> {
    use colored::Colorize;

    writeln!(
        w,
        "{:<18} {:<18} {:<9} {:<9} {:<9} {:<10}",
        "src_ip", "dst_ip", "protocol", "src_port", "dst_port", "action"
    )?;
    writeln!(w, "{}", "-".repeat(78))?;

    for record in records {
        let action_colored = match record.action.as_str() {
            "BLOCKED" => record.action.red(),
            "ALLOWED" => record.action.green(),
            _ => record.action.normal(),
        };

        writeln!(
            w,
            "{:<18} {:<18} {:<9} {:<9} {:<9} {}",
            record.src_ip,
            record.dst_ip,
            record.protocol,
            record.src_port,
            record.dst_port,
            action_colored
        )?;
    }

    Ok(())
}

/// Full analysis report: every parsed record plus the filtered view.
#[derive(Serialize)]
pub struct AnalyzeReport {
    /// Log source path
    pub source: String,
    /// Number of parsed records
    pub total: usize,
    /// Number of lines that did not match the pattern
    pub skipped_lines: u64,
    /// Filter predicate field
    pub filter_field: String,
    /// Filter predicate value
    pub filter_value: String,
    /// All parsed records, in source order
    pub records: Vec<LogRecord>,
    /// Records matching the filter predicate, in source order
    pub filtered: Vec<LogRecord>,
}

impl Render for AnalyzeReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(
            w,
            "Parsed Firewall Logs ({} records from {})",
            self.total.to_string().bold(),
            self.source
        )?;
        writeln!(w)?;
        write_table(w, &self.records)?;

        writeln!(w)?;
        writeln!(
            w,
            "Filtered: {} = {} ({} records)",
            self.filter_field.bold(),
            self.filter_value.bold(),
            self.filtered.len()
        )?;
        writeln!(w)?;

        if self.filtered.is_empty() {
            writeln!(w, "(no records match the filter)")?;
        } else {
            write_table(w, &self.filtered)?;
        }

        Ok(())
    }
}

/// Informational report for a missing log source.
#[derive(Serialize)]
pub struct SourceMissingReport {
    /// Path that could not be opened
    pub source: String,
}

impl Render for SourceMissingReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        use colored::Colorize;

        writeln!(w, "Log source not found: {}", self.source.yellow())?;
        writeln!(w, "Nothing to analyze.")?;
        Ok(())
    }
}

/// Informational report for a readable source with zero parsed records.
#[derive(Serialize)]
pub struct EmptyResultReport {
    /// Log source path
    pub source: String,
    /// Number of lines inspected (all skipped)
    pub lines_seen: u64,
}

impl Render for EmptyResultReport {
    fn render_text(&self, w: &mut dyn Write) -> std::io::Result<()> {
        writeln!(
            w,
            "No valid log data found in {} ({} lines inspected).",
            self.source, self.lines_seen
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;

    fn record(src_ip: &str, action: &str) -> LogRecord {
        LogRecord {
            src_ip: src_ip.to_owned(),
            dst_ip: "10.0.0.1".to_owned(),
            protocol: "TCP".to_owned(),
            src_port: "443".to_owned(),
            dst_port: "51515".to_owned(),
            action: action.to_owned(),
        }
    }

    #[test]
    fn parse_filter_accepts_known_field() {
        let (field, value) = parse_filter("protocol=UDP").expect("should parse");
        assert_eq!(field, "protocol");
        assert_eq!(value, "UDP");
    }

    #[test]
    fn parse_filter_keeps_value_verbatim() {
        // first '=' splits; the rest stays in the value
        let (field, value) = parse_filter("action=BLOCKED=REALLY").expect("should parse");
        assert_eq!(field, "action");
        assert_eq!(value, "BLOCKED=REALLY");
    }

    #[test]
    fn parse_filter_rejects_missing_equals() {
        let err = parse_filter("action").expect_err("should fail");
        assert!(err.to_string().contains("FIELD=VALUE"));
    }

    #[test]
    fn parse_filter_rejects_unknown_field() {
        let err = parse_filter("severity=High").expect_err("should fail");
        assert!(err.to_string().contains("unknown filter field"));
    }

    #[test]
    fn analyze_report_render_text_has_header_and_sections() {
        let report = AnalyzeReport {
            source: "firewall_logs.txt".to_owned(),
            total: 2,
            skipped_lines: 1,
            filter_field: "action".to_owned(),
            filter_value: "BLOCKED".to_owned(),
            records: vec![record("1.1.1.1", "BLOCKED"), record("2.2.2.2", "ALLOWED")],
            filtered: vec![record("1.1.1.1", "BLOCKED")],
        };

        let mut buffer = Vec::new();
        report
            .render_text(&mut buffer)
            .expect("text rendering should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("Parsed Firewall Logs"));
        assert!(output.contains("src_ip"), "should print the header row");
        assert!(output.contains("dst_port"), "should print the header row");
        assert!(output.contains("1.1.1.1"));
        assert!(output.contains("2.2.2.2"));
        assert!(output.contains("Filtered:"));
    }

    #[test]
    fn analyze_report_render_text_empty_filter_view() {
        let report = AnalyzeReport {
            source: "firewall_logs.txt".to_owned(),
            total: 1,
            skipped_lines: 0,
            filter_field: "action".to_owned(),
            filter_value: "BLOCKED".to_owned(),
            records: vec![record("1.1.1.1", "ALLOWED")],
            filtered: Vec::new(),
        };

        let mut buffer = Vec::new();
        report
            .render_text(&mut buffer)
            .expect("text rendering should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("no records match the filter"));
    }

    #[test]
    fn analyze_report_json_shape() {
        let report = AnalyzeReport {
            source: "firewall_logs.txt".to_owned(),
            total: 1,
            skipped_lines: 2,
            filter_field: "action".to_owned(),
            filter_value: "BLOCKED".to_owned(),
            records: vec![record("1.1.1.1", "BLOCKED")],
            filtered: vec![record("1.1.1.1", "BLOCKED")],
        };

        let json = serde_json::to_value(&report).expect("JSON serialization should succeed");
        assert_eq!(json["total"].as_u64(), Some(1));
        assert_eq!(json["skipped_lines"].as_u64(), Some(2));
        assert_eq!(json["records"][0]["src_ip"].as_str(), Some("1.1.1.1"));
        assert_eq!(json["filtered"][0]["action"].as_str(), Some("BLOCKED"));
    }

    #[test]
    fn source_missing_report_render_text() {
        let report = SourceMissingReport {
            source: "missing.txt".to_owned(),
        };

        let mut buffer = Vec::new();
        report
            .render_text(&mut buffer)
            .expect("text rendering should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("Log source not found"));
        assert!(output.contains("missing.txt"));
    }

    #[test]
    fn empty_result_report_render_text() {
        let report = EmptyResultReport {
            source: "firewall_logs.txt".to_owned(),
            lines_seen: 7,
        };

        let mut buffer = Vec::new();
        report
            .render_text(&mut buffer)
            .expect("text rendering should succeed");

        let output = String::from_utf8(buffer).expect("valid UTF-8");
        assert!(output.contains("No valid log data found"));
        assert!(output.contains("7 lines inspected"));
    }

    #[test]
    fn execute_with_temp_log_file_succeeds() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let log_path = dir.path().join("fw.log");
        let mut file = std::fs::File::create(&log_path).expect("should create log");
        writeln!(
            file,
            "SRC=1.1.1.1 DST=2.2.2.2 PROTO=TCP SPT=80 DPT=8080 ACTION=BLOCKED"
        )
        .expect("should write log");

        let args = AnalyzeArgs {
            file: Some(log_path),
            filter: None,
        };
        let writer = OutputWriter::new(OutputFormat::Text);
        let result = execute(args, &dir.path().join("firetrail.toml"), &writer);
        assert!(result.is_ok(), "analyze should succeed: {result:?}");
    }

    #[test]
    fn execute_with_missing_source_is_not_an_error() {
        let dir = tempfile::tempdir().expect("should create temp dir");

        let args = AnalyzeArgs {
            file: Some(dir.path().join("does_not_exist.log")),
            filter: None,
        };
        let writer = OutputWriter::new(OutputFormat::Text);
        let result = execute(args, &dir.path().join("firetrail.toml"), &writer);
        // Missing source renders an informational message and exits 0.
        assert!(result.is_ok(), "missing source must not fail: {result:?}");
    }

    #[test]
    fn execute_with_bad_filter_fails() {
        let dir = tempfile::tempdir().expect("should create temp dir");

        let args = AnalyzeArgs {
            file: None,
            filter: Some("nonsense".to_owned()),
        };
        let writer = OutputWriter::new(OutputFormat::Text);
        let result = execute(args, &dir.path().join("firetrail.toml"), &writer);
        assert!(matches!(result, Err(CliError::Command(_))));
    }
}
