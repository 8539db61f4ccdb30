//!
//! Error report aggregation.
//!
//! Build failures arrive in batches. Each failure is captured as an
//! [`ErrorRecord`] and the batch is flattened into one newline-joined block
//! for whatever surfaces diagnostics. No truncation, no deduplication,
//! input order preserved.
//!

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;

///
/// ErrorRecord
///
/// One captured failure: a message plus an optional trace. Records built
/// from a live error carry the `source()` chain as the trace.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ErrorRecord {
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
}

impl ErrorRecord {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            trace: None,
        }
    }

    #[must_use]
    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.trace = Some(trace.into());
        self
    }

    // message, then the trace on its own line when present
    fn render(&self) -> String {
        match &self.trace {
            Some(trace) => format!("{}\n{trace}", self.message),
            None => self.message.clone(),
        }
    }
}

impl<E: StdError> From<&E> for ErrorRecord {
    fn from(error: &E) -> Self {
        let mut causes = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            causes.push(format!("caused by: {cause}"));
            source = cause.source();
        }

        let record = Self::new(error.to_string());
        if causes.is_empty() {
            record
        } else {
            record.with_trace(causes.join("\n"))
        }
    }
}

/// Flatten a batch of records into one display block, joined by single
/// newlines in input order.
#[must_use]
pub fn to_display_errors(errors: &[ErrorRecord]) -> String {
    errors
        .iter()
        .map(ErrorRecord::render)
        .collect::<Vec<_>>()
        .join("\n")
}

///
/// TESTS
///
