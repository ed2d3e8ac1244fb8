//! Job health events
//!
//! Jobs report what they do through an [`EventSink`]: plain events, errors,
//! timings and a final completion status. Sinks decide how to render them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::io;
use std::str::FromStr;

pub mod clock;
pub mod logfile;

/// Key/value annotations attached to an event
pub type Kvs = HashMap<String, String>;

/// How a job finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionKind {
    Success,
    ValidationError,
    Panic,
    Error,
    Junk,
}

impl CompletionKind {
    pub const ALL: [CompletionKind; 5] = [
        Self::Success,
        Self::ValidationError,
        Self::Panic,
        Self::Error,
        Self::Junk,
    ];

    /// Display string written after `status:`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::ValidationError => "validation_error",
            Self::Panic => "panic",
            Self::Error => "error",
            Self::Junk => "junk",
        }
    }
}

impl fmt::Display for CompletionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no completion kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCompletionKindError(String);

impl fmt::Display for ParseCompletionKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown completion kind: {}", self.0)
    }
}

impl Error for ParseCompletionKindError {}

impl FromStr for CompletionKind {
    type Err = ParseCompletionKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ParseCompletionKindError(s.to_string()))
    }
}

/// Receives job events from the reporting facility.
///
/// Every method renders one record. The only failure is the underlying
/// output's, returned as-is.
pub trait EventSink {
    fn emit_event(&mut self, job: &str, event: &str, kvs: Option<&Kvs>) -> io::Result<()>;

    fn emit_event_err(&mut self, job: &str, event: &str, err: &dyn Error, kvs: Option<&Kvs>) -> io::Result<()>;

    fn emit_timing(&mut self, job: &str, event: &str, nanos: i64, kvs: Option<&Kvs>) -> io::Result<()>;

    fn emit_job_completion(&mut self, job: &str, kind: CompletionKind, nanos: i64, kvs: Option<&Kvs>)
    -> io::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_kind_strings_non_empty() {
        for kind in CompletionKind::ALL {
            assert!(!kind.as_str().is_empty());
        }
    }

    #[test]
    fn test_completion_kind_display() {
        assert_eq!(CompletionKind::Success.to_string(), "success");
        assert_eq!(CompletionKind::ValidationError.to_string(), "validation_error");
    }

    #[test]
    fn test_completion_kind_from_str() {
        for kind in CompletionKind::ALL {
            assert_eq!(kind.as_str().parse::<CompletionKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_completion_kind_from_str_unknown() {
        let err = "finished".parse::<CompletionKind>().unwrap_err();
        assert_eq!(err.to_string(), "unknown completion kind: finished");
    }

    #[test]
    fn test_completion_kind_serde_matches_display() {
        let yaml = serde_yaml::to_string(&CompletionKind::ValidationError).expect("Failed to serialize");
        assert_eq!(yaml.trim(), "validation_error");
        let parsed: CompletionKind = serde_yaml::from_str("panic").expect("Failed to deserialize");
        assert_eq!(parsed, CompletionKind::Panic);
    }
}
