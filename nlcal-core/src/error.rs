//! Error types for parsing and reconciling events.

use thiserror::Error;

/// Why a parser could not produce an event.
///
/// The rule-based parser never returns one of these; it falls back to defaults.
#[derive(Error, Debug)]
pub enum ParseFailure {
    /// The generator answered, but not with the expected JSON object.
    /// `raw` is the full answer, kept for diagnosis.
    #[error("could not decode structured output: {reason}\nraw output:\n{raw}")]
    MalformedStructuredOutput { raw: String, reason: String },

    #[error("text generation failed: {0}")]
    Generation(String),
}

/// Why an actioned event could not be applied to the stored events.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    #[error("no stored event titled `{title}` starts at {start}")]
    NoMatchingEvent { title: String, start: String },
}
