//! Audit Sieve — triage filter for Kubernetes audit logs.
//!
//! Streams a cluster audit trail (JSON lines, or a whole-document JSON
//! export) and emits the records matching a fixed set of security rules
//! and/or a case-insensitive text search. The moral equivalent of a handful
//! of `jq` and `grep -i` one-liners, tolerant of malformed input.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Safe traversal of nested JSON values.
pub mod access;
/// Logging setup for the CLI.
pub mod logging;
/// Streaming reader for audit log records.
pub mod reader;
/// The fixed set of security rules over a record.
pub mod rules;
/// The match engine: text search, rule OR-matching, rendering.
pub mod scan;
