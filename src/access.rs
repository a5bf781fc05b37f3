//! Safe traversal of nested JSON values.
//!
//! Audit records are arbitrarily shaped, and the rules must never fail on a
//! missing field or a container of the wrong type. [`lookup`] collapses
//! every unresolvable step to `None`, while a present JSON `null` stays
//! `Some(Value::Null)`, so the two cases are never conflated.

use serde_json::Value;

/// One step of a lookup path: a mapping key or a sequence index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Field name in a mapping. Against a sequence, a key that parses as a
    /// non-negative integer is treated as an index.
    Key(&'a str),
    /// Zero-based index into a sequence.
    Index(usize),
}

impl<'a> From<&'a str> for Segment<'a> {
    fn from(key: &'a str) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for Segment<'_> {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// Resolve `path` against `root`, returning `None` if any step fails.
///
/// Total over every value shape: a wrong container type, a missing key, and
/// an out-of-range index all yield `None` rather than an error. `Some` is
/// returned only when the full path resolves to a present value.
pub fn lookup<'a>(root: &'a Value, path: &[Segment<'_>]) -> Option<&'a Value> {
    let mut current = root;
    for segment in path {
        current = match (current, segment) {
            (Value::Array(items), Segment::Index(index)) => items.get(*index)?,
            (Value::Array(items), Segment::Key(key)) => {
                let index: usize = key.parse().ok()?;
                items.get(index)?
            }
            (Value::Object(map), Segment::Key(key)) => map.get(*key)?,
            // Mapping keys are strings, so an integer segment cannot resolve
            // there; scalars have nothing to descend into.
            _ => return None,
        };
    }
    Some(current)
}

/// Resolve a path of field names. Convenience over [`lookup`] for the
/// common all-keys case.
pub fn field<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let segments: Vec<Segment<'_>> = path.iter().map(|key| Segment::Key(key)).collect();
    lookup(root, &segments)
}
