//! Per-component keyframe records as handed over by the container parser.
//! Times and values are in the on-disk domain (see [`crate::value::ValueKind`]).

use serde::{Deserialize, Serialize};

use crate::error::KeyframeError;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct DiskKeyframe {
    pub time: u16,
    pub value: f32,
}

impl DiskKeyframe {
    #[inline]
    pub fn new(time: u16, value: f32) -> Self {
        Self { time, value }
    }
}

/// One scalar track of a logical value.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct KeyframeRecord {
    #[serde(rename = "loop", default)]
    pub looping: bool,
    #[serde(default = "default_interpolate")]
    pub interpolate: bool,
    #[serde(default)]
    pub parameter: u8,
    #[serde(default)]
    pub component: u8,
    /// The container flagged this component as non-animated; the constant applies.
    #[serde(default)]
    pub uses_default: bool,
    #[serde(default)]
    pub keyframes: Vec<DiskKeyframe>,
}

fn default_interpolate() -> bool {
    true
}

impl Default for KeyframeRecord {
    fn default() -> Self {
        Self {
            looping: false,
            interpolate: default_interpolate(),
            parameter: 0,
            component: 0,
            uses_default: false,
            keyframes: Vec::new(),
        }
    }
}

impl KeyframeRecord {
    pub fn new(keyframes: impl IntoIterator<Item = (u16, f32)>) -> Self {
        Self {
            keyframes: keyframes
                .into_iter()
                .map(|(time, value)| DiskKeyframe::new(time, value))
                .collect(),
            ..Self::default()
        }
    }

    pub fn with_loop(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn with_interpolate(mut self, interpolate: bool) -> Self {
        self.interpolate = interpolate;
        self
    }

    /// True when the record contributes no keyframes of its own.
    #[inline]
    pub fn is_defaulted(&self) -> bool {
        self.uses_default || self.keyframes.is_empty()
    }
}

/// Parse a JSON array of optional records (`null` marks an absent component).
pub fn parse_records_json(s: &str) -> Result<Vec<Option<KeyframeRecord>>, KeyframeError> {
    Ok(serde_json::from_str(s)?)
}
