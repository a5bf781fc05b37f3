//! Streaming reader for audit log records.
//!
//! Audit logs normally arrive as JSON lines, but exports are sometimes a
//! single pretty-printed document (an array of events, or one event). The
//! reader handles both without the caller declaring a format: it reads line
//! by line and, on the first line that fails to parse, attempts one
//! whole-document parse of the remainder.

use std::io::{self, BufRead};

use serde_json::Value;

/// Lazy iterator of JSON records from an input stream.
///
/// Single forward pass, not restartable. Parse failures are skipped
/// silently; I/O errors on the underlying stream are yielded to the caller.
pub struct RecordReader<R> {
    input: R,
    state: State,
}

enum State {
    /// Newline-delimited mode. The whole-document fallback runs at most
    /// once, on the first line that fails to parse, and leaves this state
    /// permanently.
    Lines,
    /// A whole-document array parsed; draining its elements.
    Document(std::vec::IntoIter<Value>),
    /// The fallback failed; scanning the buffered remainder line by line.
    Draining(std::vec::IntoIter<String>),
    /// Stream exhausted.
    Done,
}

impl<R: BufRead> RecordReader<R> {
    /// Create a reader over a buffered input stream.
    pub fn new(input: R) -> Self {
        Self {
            input,
            state: State::Lines,
        }
    }

    /// Read the next newline-delimited line, or `None` at end of stream.
    /// The trailing newline is kept so the fallback can reassemble the
    /// original text.
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        let bytes = self.input.read_line(&mut line)?;
        if bytes == 0 {
            Ok(None)
        } else {
            Ok(Some(line))
        }
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = io::Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match &mut self.state {
                State::Done => return None,
                State::Document(items) => match items.next() {
                    Some(value) => return Some(Ok(value)),
                    None => {
                        self.state = State::Done;
                        return None;
                    }
                },
                State::Draining(lines) => {
                    for line in lines {
                        let trimmed = line.trim();
                        if trimmed.is_empty() {
                            continue;
                        }
                        if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
                            return Some(Ok(value));
                        }
                    }
                    self.state = State::Done;
                    return None;
                }
                State::Lines => {}
            }

            let line = match self.next_line() {
                Ok(Some(line)) => line,
                Ok(None) => {
                    self.state = State::Done;
                    return None;
                }
                Err(e) => {
                    self.state = State::Done;
                    return Some(Err(e));
                }
            };

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            // Common case: one JSON value per line.
            if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
                return Some(Ok(value));
            }

            // First failing line: the file may be one pretty-printed
            // document. Try the failing line plus the unread remainder as a
            // single JSON value, exactly once.
            let mut rest = String::new();
            if let Err(e) = self.input.read_to_string(&mut rest) {
                self.state = State::Done;
                return Some(Err(e));
            }

            let mut combined = line;
            combined.push_str(&rest);

            match serde_json::from_str::<Value>(&combined) {
                Ok(Value::Array(items)) => {
                    self.state = State::Document(items.into_iter());
                }
                Ok(value @ Value::Object(_)) => {
                    self.state = State::Done;
                    return Some(Ok(value));
                }
                Ok(_) => {
                    // Unknown top-level document; nothing usable remains.
                    self.state = State::Done;
                    return None;
                }
                Err(_) => {
                    let lines: Vec<String> = rest.lines().map(ToOwned::to_owned).collect();
                    self.state = State::Draining(lines.into_iter());
                }
            }
        }
    }
}
