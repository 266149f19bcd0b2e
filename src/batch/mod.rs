//! Line-oriented batch transformation
//!
//! Drives the per-line pipeline over a whole batch: split each line with the
//! log-line grammar, transform the payload, reassemble it with the untouched
//! prefix. Batches routinely mix encrypted, plaintext and system lines, so a
//! line that cannot be transformed is emitted unchanged and the batch keeps
//! going; only source-level failures abort a run.
//!
//! Execution is strictly sequential: one line is fully parsed, transformed
//! and written before the next is read, and output order always equals input
//! order.

pub mod source;

use std::io::BufRead;

use crate::codec::errors::CodecError;
use crate::codec::{logline, message};
use crate::crypto::Block;
use crate::output::OutputSink;

/// Which way the payload transform runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

/// Why a line was emitted unchanged
#[derive(Debug, PartialEq, Eq)]
pub enum PassReason {
    /// The line does not match the log-line grammar
    NoPrefix,
    /// The payload contains characters outside the encoded range,
    /// i.e. it was never encrypted
    NotEncoded,
    /// The payload looked encoded but failed to transform
    Failed(String),
}

/// Outcome of one line
///
/// The tagged result the rest of the pipeline consumes instead of catching
/// errors: transformed text, or the original line plus the reason it was
/// left alone. No line is ever dropped.
#[derive(Debug, PartialEq, Eq)]
pub enum LineOutcome {
    Transformed(String),
    PassedThrough { line: String, reason: PassReason },
}

impl LineOutcome {
    /// Text to emit for this line, transformed or not.
    pub fn text(&self) -> &str {
        match self {
            LineOutcome::Transformed(text) => text,
            LineOutcome::PassedThrough { line, .. } => line,
        }
    }
}

/// Counters reported once a batch is exhausted
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub lines: u64,
    pub transformed: u64,
    pub passed_through: u64,
}

pub struct BatchProcessor {
    block: Box<dyn Block>,
    direction: Direction,
}

impl BatchProcessor {
    pub fn new(block: Box<dyn Block>, direction: Direction) -> Self {
        Self { block, direction }
    }

    /// Runs the per-line algorithm on one raw line.
    ///
    /// Never fails: anything that cannot be transformed becomes a
    /// passthrough carrying its reason. A trailing `\r` is stripped before
    /// matching so CRLF input parses.
    pub fn process_line(&self, raw: &str) -> LineOutcome {
        let line = raw.strip_suffix('\r').unwrap_or(raw);

        let Some((prefix, payload)) = logline::split(line) else {
            return LineOutcome::PassedThrough {
                line: line.to_string(),
                reason: PassReason::NoPrefix,
            };
        };

        match self.transform(payload) {
            Ok(transformed) => LineOutcome::Transformed(format!("{}{}", prefix, transformed)),
            Err(reason) => LineOutcome::PassedThrough {
                line: line.to_string(),
                reason,
            },
        }
    }

    fn transform(&self, payload: &str) -> Result<String, PassReason> {
        match self.direction {
            Direction::Decrypt => match message::open(payload, self.block.as_ref()) {
                Ok(plaintext) => Ok(plaintext),
                Err(CodecError::CharOutOfRange { .. }) => Err(PassReason::NotEncoded),
                Err(e) => Err(PassReason::Failed(e.to_string())),
            },
            Direction::Encrypt => message::seal(payload, self.block.as_ref())
                .map_err(|e| PassReason::Failed(e.to_string())),
        }
    }

    /// Streams `reader` line by line into `sink`, in input order.
    ///
    /// A transform failure passes the line through (with a diagnostic on
    /// the error channel when the payload looked encrypted) and the loop
    /// continues. It only stops when the source or the sink does.
    pub fn run(&self, reader: impl BufRead, sink: &mut OutputSink) -> crate::Result<BatchSummary> {
        let mut summary = BatchSummary::default();

        for line in reader.lines() {
            let line = line?;
            let outcome = self.process_line(&line);

            match &outcome {
                LineOutcome::Transformed(_) => summary.transformed += 1,
                LineOutcome::PassedThrough { reason, .. } => {
                    if let PassReason::Failed(cause) = reason {
                        tracing::warn!("failed to transform message: {}, still outputting", cause);
                    }
                    summary.passed_through += 1;
                }
            }
            summary.lines += 1;

            sink.write_line(outcome.text())?;
        }

        tracing::info!(
            "batch finished: {} lines, {} transformed, {} passed through",
            summary.lines,
            summary.transformed,
            summary.passed_through
        );

        Ok(summary)
    }
}
