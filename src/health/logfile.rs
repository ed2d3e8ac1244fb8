//! Sink that writes lines a human might like to read in a logfile
//!
//! ```text
//! [2026-01-03T12:00:00.000000000Z]: job:deploy event:push err:disk full
//! [2026-01-03T12:00:00.000000000Z]: job:ingest status:success time:3 ms kvs:[rows:42]
//! ```

use std::collections::BTreeMap;
use std::error::Error;
use std::io;

use super::clock::{self, Clock, SystemClock};
use super::{CompletionKind, EventSink, Kvs};

/// Formats each event as one line and hands it to `writer` in a single write
#[derive(Debug)]
pub struct LogfileWriterSink<W, C = SystemClock> {
    writer: W,
    clock: C,
}

impl<W: io::Write> LogfileWriterSink<W> {
    /// Create a sink stamping lines with the system clock
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            clock: SystemClock,
        }
    }
}

impl<W: io::Write, C: Clock> LogfileWriterSink<W, C> {
    /// Create a sink with a custom time source
    pub fn with_clock(writer: W, clock: C) -> Self {
        Self { writer, clock }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Start a line with `[<ts>]: job:<job>`
    fn begin(&self, job: &str) -> String {
        let mut b = String::with_capacity(128);
        b.push('[');
        b.push_str(&clock::timestamp(&self.clock));
        b.push_str("]: job:");
        b.push_str(job);
        b
    }

    /// Append annotations and the terminator, then write the line once.
    ///
    /// The writer is called exactly once. Its error comes back untouched;
    /// a short write is reported as `WriteZero` without a second attempt.
    fn finish(&mut self, mut b: String, kvs: Option<&Kvs>) -> io::Result<()> {
        write_annotations(&mut b, kvs);
        b.push('\n');
        let written = self.writer.write(b.as_bytes())?;
        if written < b.len() {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("short write: {} of {} bytes", written, b.len()),
            ));
        }
        Ok(())
    }
}

impl<W: io::Write, C: Clock> EventSink for LogfileWriterSink<W, C> {
    fn emit_event(&mut self, job: &str, event: &str, kvs: Option<&Kvs>) -> io::Result<()> {
        let mut b = self.begin(job);
        b.push_str(" event:");
        b.push_str(event);
        self.finish(b, kvs)
    }

    fn emit_event_err(&mut self, job: &str, event: &str, err: &dyn Error, kvs: Option<&Kvs>) -> io::Result<()> {
        let mut b = self.begin(job);
        b.push_str(" event:");
        b.push_str(event);
        b.push_str(" err:");
        b.push_str(&err.to_string());
        self.finish(b, kvs)
    }

    fn emit_timing(&mut self, job: &str, event: &str, nanos: i64, kvs: Option<&Kvs>) -> io::Result<()> {
        let mut b = self.begin(job);
        b.push_str(" event:");
        b.push_str(event);
        b.push_str(" time:");
        write_duration(&mut b, nanos);
        self.finish(b, kvs)
    }

    fn emit_job_completion(
        &mut self,
        job: &str,
        kind: CompletionKind,
        nanos: i64,
        kvs: Option<&Kvs>,
    ) -> io::Result<()> {
        let mut b = self.begin(job);
        b.push_str(" status:");
        b.push_str(kind.as_str());
        b.push_str(" time:");
        write_duration(&mut b, nanos);
        self.finish(b, kvs)
    }
}

/// Append ` kvs:[k1:v1 k2:v2]` with keys in byte order; nothing for an empty map
pub fn write_annotations(b: &mut String, kvs: Option<&Kvs>) {
    let Some(kvs) = kvs.filter(|kvs| !kvs.is_empty()) else {
        return;
    };

    let sorted: BTreeMap<&str, &str> = kvs.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();

    b.push_str(" kvs:[");
    for (i, (k, v)) in sorted.into_iter().enumerate() {
        if i > 0 {
            b.push(' ');
        }
        b.push_str(k);
        b.push(':');
        b.push_str(v);
    }
    b.push(']');
}

/// Append a nanosecond count in the coarsest unit past its 2000x threshold.
///
/// Division truncates, and each threshold belongs to the finer unit:
/// 2000 renders as `2000 ns`, 2001 as `2 μs`.
pub fn write_duration(b: &mut String, nanos: i64) {
    let (value, unit) = match nanos {
        n if n > 2_000_000 => (n / 1_000_000, " ms"),
        n if n > 2_000 => (n / 1_000, " μs"),
        n => (n, " ns"),
    };
    b.push_str(&value.to_string());
    b.push_str(unit);
}
