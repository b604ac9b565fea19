//! Error types for keyframe decompile/compile and timeline editing.

use serde::{Deserialize, Serialize};

use crate::ids::KeyframeId;

/// Errors raised by the synchronization engine.
///
/// Malformed or empty source keyframes are not errors (they fall back to the
/// constant), and duplicate source times are resolved silently.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum KeyframeError {
    /// Wrong number of components passed for a value kind.
    #[error("{what}: expected {expected} components, got {actual}")]
    ComponentCountMismatch {
        what: String,
        expected: usize,
        actual: usize,
    },

    /// Components disagree on their time points after decompile.
    #[error(
        "timeline desynchronized: component {component} has {actual} keyframes, expected {expected}"
    )]
    Desynchronized {
        component: usize,
        expected: usize,
        actual: usize,
    },

    /// Non-finite time value
    #[error("Invalid time value: {time}")]
    InvalidTime { time: f32 },

    /// Time outside the value kind's editor domain
    #[error("Time {time} is out of range [{start}, {end}]")]
    TimeOutOfRange { time: f32, start: f32, end: f32 },

    #[error("Keyframe not found: {target}")]
    KeyframeNotFound { target: String },

    /// A keyframe already exists at the requested time.
    #[error("Time {time} already holds keyframe {existing:?}")]
    TimeOccupied { time: f32, existing: KeyframeId },

    #[error("Serialization error: {reason}")]
    Serialization { reason: String },
}

impl KeyframeError {
    pub(crate) fn count_mismatch(what: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::ComponentCountMismatch {
            what: what.into(),
            expected,
            actual,
        }
    }

    /// True when the error indicates a defect in the merge logic rather than
    /// bad input or a bad edit request.
    #[inline]
    pub fn is_internal_fault(&self) -> bool {
        matches!(self, Self::Desynchronized { .. })
    }

    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::ComponentCountMismatch { .. } => "argument",
            Self::Desynchronized { .. } => "consistency",
            Self::InvalidTime { .. } | Self::TimeOutOfRange { .. } => "time",
            Self::KeyframeNotFound { .. } | Self::TimeOccupied { .. } => "edit",
            Self::Serialization { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for KeyframeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}
