//! The match engine: decides per input unit whether and how to emit it.
//!
//! Two processing paths share the same rendering. With a grep term the
//! input is walked line by line so the original text is available for
//! matching and raw output. Without one, records are pulled through the
//! [`RecordReader`], which also accepts whole-document JSON exports.

use std::io::{BufRead, Write};

use anyhow::Context;
use serde_json::Value;
use tracing::debug;

use crate::reader::RecordReader;
use crate::rules::Rule;

/// Configuration for one scan run.
#[derive(Debug, Clone, Default)]
pub struct ScanConfig {
    /// Selected rules; a record matches when any rule matches (logical OR).
    pub rules: Vec<Rule>,
    /// Optional case-insensitive substring search over raw lines.
    pub grep: Option<String>,
    /// Pretty-print emitted records instead of compact JSON.
    pub pretty: bool,
    /// Print the original raw line for text-search matches.
    pub raw: bool,
}

/// Counters from a completed scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Records (or raw lines) examined.
    pub records: u64,
    /// Units emitted to the output.
    pub matched: u64,
}

impl ScanSummary {
    fn saw_record(&mut self) {
        self.records = self.records.saturating_add(1);
    }

    fn saw_match(&mut self) {
        self.matched = self.matched.saturating_add(1);
    }
}

/// Run one scan over `input`, writing matches to `out` in input order.
///
/// Output is written per line as matches are found, never buffered across
/// the run, so the tool stays usable on a stream being tailed.
///
/// # Errors
///
/// Returns an error only for I/O failures on the input stream or the
/// output; unparseable lines and malformed records are skipped silently.
pub fn scan<R: BufRead, W: Write>(
    config: &ScanConfig,
    input: R,
    out: &mut W,
) -> anyhow::Result<ScanSummary> {
    match config.grep.as_deref() {
        Some(term) => scan_lines(config, term, input, out),
        None => scan_records(config, input, out),
    }
}

/// Line path: text search against raw lines, rules against any line that
/// also parses as JSON. Raw output applies only to text-search matches;
/// rule matches always render as re-encoded JSON.
fn scan_lines<R: BufRead, W: Write>(
    config: &ScanConfig,
    term: &str,
    input: R,
    out: &mut W,
) -> anyhow::Result<ScanSummary> {
    let term = term.to_lowercase();
    let mut summary = ScanSummary::default();

    for line in input.lines() {
        let line = line.context("failed to read input line")?;
        summary.saw_record();

        let matched_text = line.to_lowercase().contains(&term);
        if matched_text && config.raw {
            writeln!(out, "{line}").context("failed to write match")?;
            summary.saw_match();
            continue;
        }

        // A line that is not JSON cannot be rendered as JSON, so even a
        // text match produces no output here.
        let Ok(record) = serde_json::from_str::<Value>(line.trim()) else {
            continue;
        };

        let matched_rule = config.rules.iter().any(|rule| rule.matches(&record));
        if matched_text || matched_rule {
            emit(&record, config.pretty, out)?;
            summary.saw_match();
        }
    }

    debug!(
        records = summary.records,
        matched = summary.matched,
        "line scan complete"
    );
    Ok(summary)
}

/// Record path: no raw text to search, so the reader's whole-document
/// fallback is safe to use.
fn scan_records<R: BufRead, W: Write>(
    config: &ScanConfig,
    input: R,
    out: &mut W,
) -> anyhow::Result<ScanSummary> {
    let mut summary = ScanSummary::default();

    for record in RecordReader::new(input) {
        let record = record.context("failed to read input")?;
        summary.saw_record();

        if config.rules.iter().any(|rule| rule.matches(&record)) {
            emit(&record, config.pretty, out)?;
            summary.saw_match();
        }
    }

    debug!(
        records = summary.records,
        matched = summary.matched,
        "record scan complete"
    );
    Ok(summary)
}

/// Write one matched record, compact or pretty, followed by a newline.
fn emit<W: Write>(record: &Value, pretty: bool, out: &mut W) -> anyhow::Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(record)
    } else {
        serde_json::to_string(record)
    }
    .context("failed to encode record")?;
    writeln!(out, "{rendered}").context("failed to write match")?;
    Ok(())
}
