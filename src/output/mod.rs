//! # Output Module
//!
//! Hands converted controller state to whatever renders it.
//!
//! Each frame is written as one JSON object per line (JSONL):
//!
//! ```text
//! {"timestamp":"2024-05-01T12:00:00.000+00:00","target":"xbox","buttons":{"A":true,...},"axes":{"LX":0.5,...}}
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::io::Write;

use crate::error::Result;
use crate::mapping::{ConversionResult, Target};

/// One emitted line.
#[derive(Debug, Serialize)]
struct FrameRecord<'a> {
    timestamp: String,
    target: Target,
    #[serde(flatten)]
    state: &'a ConversionResult,
}

/// Writes converted frames as JSON lines.
#[derive(Debug)]
pub struct StateSink<W: Write> {
    writer: W,
    only_changes: bool,
    last: Option<ConversionResult>,
    frames_written: u64,
}

impl<W: Write> StateSink<W> {
    /// Creates a sink. With `only_changes`, frames identical to the previous
    /// one are skipped.
    pub fn new(writer: W, only_changes: bool) -> Self {
        Self {
            writer,
            only_changes,
            last: None,
            frames_written: 0,
        }
    }

    /// Writes one frame stamped with the current time.
    ///
    /// Returns `true` if a line was written.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the underlying write fails.
    pub fn emit(&mut self, target: Target, state: &ConversionResult) -> Result<bool> {
        self.emit_at(Utc::now(), target, state)
    }

    /// Writes one frame with an explicit timestamp.
    pub fn emit_at(
        &mut self,
        timestamp: DateTime<Utc>,
        target: Target,
        state: &ConversionResult,
    ) -> Result<bool> {
        if self.only_changes && self.last.as_ref() == Some(state) {
            return Ok(false);
        }

        let record = FrameRecord {
            timestamp: timestamp.to_rfc3339_opts(SecondsFormat::Millis, false),
            target,
            state,
        };
        serde_json::to_writer(&mut self.writer, &record)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;

        self.last = Some(state.clone());
        self.frames_written += 1;
        Ok(true)
    }

    /// Number of lines written so far.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
