//! audit-sieve CLI entry point.
//!
//! Filters a Kubernetes audit log against security rules and/or a raw text
//! search, streaming matches to stdout in input order.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgGroup, Parser};
use tracing::debug;

use audit_sieve::logging;
use audit_sieve::rules::Rule;
use audit_sieve::scan::{scan, ScanConfig};

/// Filter Kubernetes audit logs for security-relevant events.
#[derive(Parser)]
#[command(name = "audit-sieve", version, about)]
#[command(group(
    ArgGroup::new("selection")
        .required(true)
        .multiple(true)
        .args(["secrets_get", "create_exec", "privileged_pods", "grep"])
))]
struct Cli {
    /// Path to the audit log (JSON lines, or a whole-document JSON export).
    file: PathBuf,

    /// Select secret reads (objectRef.resource == "secrets" and verb == "get").
    #[arg(long)]
    secrets_get: bool,

    /// Select exec into pods (verb == "create" and objectRef.subresource == "exec").
    #[arg(long)]
    create_exec: bool,

    /// Select pod requests with a privileged container.
    #[arg(long)]
    privileged_pods: bool,

    /// Case-insensitive text search in raw lines (like grep -i TERM).
    #[arg(long, value_name = "TERM")]
    grep: Option<String>,

    /// Pretty-print matching records.
    #[arg(long)]
    pretty: bool,

    /// Print original raw lines for text-search matches.
    #[arg(long)]
    raw: bool,
}

impl Cli {
    /// Rules enabled by the boolean flags, in flag order.
    fn selected_rules(&self) -> Vec<Rule> {
        let mut rules = Vec::new();
        if self.secrets_get {
            rules.push(Rule::SecretsGet);
        }
        if self.create_exec {
            rules.push(Rule::CreateExec);
        }
        if self.privileged_pods {
            rules.push(Rule::PrivilegedPods);
        }
        rules
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init();

    let config = ScanConfig {
        rules: cli.selected_rules(),
        grep: cli.grep.clone(),
        pretty: cli.pretty,
        raw: cli.raw,
    };

    let file = File::open(&cli.file)
        .with_context(|| format!("failed to open audit log {}", cli.file.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let summary = scan(&config, BufReader::new(file), &mut out)?;
    debug!(
        records = summary.records,
        matched = summary.matched,
        "scan complete"
    );

    Ok(())
}
