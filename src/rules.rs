//! The fixed set of security rules over an audit record.
//!
//! Each rule is a total, pure function over any JSON value, built on the
//! safe accessor, so a malformed record is a non-match rather than a
//! failure. String comparisons are case-sensitive exact matches.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::access::field;

/// A named audit rule of interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
    /// Secret reads: `objectRef.resource == "secrets"` and `verb == "get"`.
    SecretsGet,
    /// Exec into a pod: `verb == "create"` and
    /// `objectRef.subresource == "exec"`.
    CreateExec,
    /// Pod request carrying a container with `privileged: true`.
    PrivilegedPods,
}

impl Rule {
    /// All known rules, in flag order.
    pub const ALL: [Self; 3] = [Self::SecretsGet, Self::CreateExec, Self::PrivilegedPods];

    /// Kebab-case rule name, matching the CLI flag.
    pub fn name(self) -> &'static str {
        match self {
            Self::SecretsGet => "secrets-get",
            Self::CreateExec => "create-exec",
            Self::PrivilegedPods => "privileged-pods",
        }
    }

    /// Evaluate this rule against a record. Never fails, whatever the shape.
    pub fn matches(self, record: &Value) -> bool {
        match self {
            Self::SecretsGet => secrets_get(record),
            Self::CreateExec => create_exec(record),
            Self::PrivilegedPods => privileged_pods(record),
        }
    }
}

/// String value at `path`, or `None` if absent or not a string.
fn str_at<'a>(record: &'a Value, path: &[&str]) -> Option<&'a str> {
    field(record, path).and_then(Value::as_str)
}

fn secrets_get(record: &Value) -> bool {
    str_at(record, &["objectRef", "resource"]) == Some("secrets")
        && str_at(record, &["verb"]) == Some("get")
}

fn create_exec(record: &Value) -> bool {
    str_at(record, &["verb"]) == Some("create")
        && str_at(record, &["objectRef", "subresource"]) == Some("exec")
}

/// A pod request where at least one container asks for `privileged: true`.
///
/// The flag must be the JSON boolean `true`; the string `"true"` does not
/// count.
fn privileged_pods(record: &Value) -> bool {
    if str_at(record, &["objectRef", "resource"]) != Some("pods") {
        return false;
    }
    let Some(spec) = field(record, &["requestObject", "spec"]).and_then(Value::as_object) else {
        return false;
    };
    let Some(containers) = spec.get("containers").and_then(Value::as_array) else {
        return false;
    };
    containers.iter().any(|container| {
        container
            .as_object()
            .and_then(|c| c.get("securityContext"))
            .and_then(Value::as_object)
            .is_some_and(|sc| matches!(sc.get("privileged"), Some(Value::Bool(true))))
    })
}
