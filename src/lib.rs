//! Logfile sink for job health events
//!
//! Renders job events, errors, timings and completions as single
//! timestamped lines a human can read in a logfile:
//!
//! ```text
//! [2026-01-03T12:00:00.000000000Z]: job:build event:start kvs:[env:prod user:alice]
//! ```

pub mod config;
pub mod health;

pub use config::Config;
pub use health::clock::{Clock, FixedClock, SystemClock};
pub use health::logfile::LogfileWriterSink;
pub use health::{CompletionKind, EventSink, Kvs};
