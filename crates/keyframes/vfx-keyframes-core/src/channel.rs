//! Editor-domain keyframes and the per-component channel that holds them.

use serde::{Deserialize, Serialize};

use crate::ids::KeyframeId;
use crate::interp::sample_or;

/// A single keyframe in editor time.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Keyframe {
    pub id: KeyframeId,
    pub time: f32,
    pub value: f32,
}

/// One scalar component track of a logical value.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Channel {
    /// Sorted ascending by time; times are unique.
    pub keyframes: Vec<Keyframe>,
    /// Fallback used when the channel carries no real keyframes.
    pub constant: f32,
    /// Loop flag the source record carried for this component.
    pub looping: bool,
    /// False when the channel was seeded from its constant during decompile.
    pub animated: bool,
}

impl Channel {
    /// A non-animated channel holding only its constant at time 0.
    pub fn constant(id: KeyframeId, constant: f32) -> Self {
        Self {
            keyframes: vec![Keyframe {
                id,
                time: 0.0,
                value: constant,
            }],
            constant,
            looping: false,
            animated: false,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    pub fn times(&self) -> impl Iterator<Item = f32> + '_ {
        self.keyframes.iter().map(|k| k.time)
    }

    pub fn values(&self) -> impl Iterator<Item = f32> + '_ {
        self.keyframes.iter().map(|k| k.value)
    }

    /// Gap-filling sample: never fails, falls back to the constant.
    #[inline]
    pub fn value_at(&self, time: f32, interpolate: bool) -> f32 {
        sample_or(&self.keyframes, time, interpolate, self.constant)
    }

    /// Index of the keyframe at exactly `time`.
    pub fn index_of_time(&self, time: f32) -> Option<usize> {
        let time = time + 0.0;
        self.keyframes
            .binary_search_by(|k| k.time.total_cmp(&time))
            .ok()
    }

    pub fn index_of_id(&self, id: KeyframeId) -> Option<usize> {
        self.keyframes.iter().position(|k| k.id == id)
    }

    /// Insert keeping time order; an existing keyframe at the same time is
    /// replaced. Returns the index of the stored keyframe.
    pub fn upsert(&mut self, mut key: Keyframe) -> usize {
        // -0.0 and 0.0 must land on the same keyframe
        key.time += 0.0;
        match self
            .keyframes
            .binary_search_by(|k| k.time.total_cmp(&key.time))
        {
            Ok(idx) => {
                self.keyframes[idx] = key;
                idx
            }
            Err(idx) => {
                self.keyframes.insert(idx, key);
                idx
            }
        }
    }

    /// Every keyframe value equals the constant (vacuously true when empty).
    pub fn is_all_constant(&self) -> bool {
        self.keyframes.iter().all(|k| k.value == self.constant)
    }
}
