//! Editor-facing timeline where every component shares the same time points.
//!
//! A "row" is the set of keyframes at one time point across all channels;
//! every keyframe in a row carries the same [`KeyframeId`].

use serde::{Deserialize, Serialize};

use crate::channel::{Channel, Keyframe};
use crate::error::KeyframeError;
use crate::ids::KeyframeId;
use crate::interp::sample_keys;

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SynchronizedTimeline {
    pub channels: Vec<Channel>,
}

/// Owned copy of one row, used by edit descriptors.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Row {
    pub id: KeyframeId,
    pub time: f32,
    pub values: Vec<f32>,
}

impl SynchronizedTimeline {
    pub fn new(channels: Vec<Channel>) -> Self {
        Self { channels }
    }

    #[inline]
    pub fn component_count(&self) -> usize {
        self.channels.len()
    }

    /// Number of rows (time points).
    #[inline]
    pub fn len(&self) -> usize {
        self.channels.first().map_or(0, Channel::len)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn times(&self) -> Vec<f32> {
        self.channels
            .first()
            .map(|c| c.times().collect())
            .unwrap_or_default()
    }

    pub fn ids(&self) -> Vec<KeyframeId> {
        self.channels
            .first()
            .map(|c| c.keyframes.iter().map(|k| k.id).collect())
            .unwrap_or_default()
    }

    /// Check the synchronization invariant: equal counts, and identical
    /// sorted times and ids in every channel.
    pub fn verify(&self) -> Result<(), KeyframeError> {
        let Some(first) = self.channels.first() else {
            return Ok(());
        };
        let expected = first.len();
        for (component, ch) in self.channels.iter().enumerate().skip(1) {
            let aligned = ch.len() == expected
                && ch
                    .keyframes
                    .iter()
                    .zip(&first.keyframes)
                    .all(|(a, b)| a.time == b.time && a.id == b.id);
            if !aligned {
                return Err(KeyframeError::Desynchronized {
                    component,
                    expected,
                    actual: ch.len(),
                });
            }
        }
        Ok(())
    }

    pub fn index_of_time(&self, time: f32) -> Option<usize> {
        self.channels.first()?.index_of_time(time)
    }

    pub fn index_of_id(&self, id: KeyframeId) -> Option<usize> {
        self.channels.first()?.index_of_id(id)
    }

    pub fn row(&self, index: usize) -> Option<Row> {
        let first = self.channels.first()?.keyframes.get(index)?;
        Some(Row {
            id: first.id,
            time: first.time,
            values: self
                .channels
                .iter()
                .map(|c| c.keyframes[index].value)
                .collect(),
        })
    }

    /// Insert a row in time order, replacing any row at the same time.
    /// `row.values` must hold one value per channel.
    pub(crate) fn upsert_row(&mut self, row: &Row) {
        for (ch, &value) in self.channels.iter_mut().zip(&row.values) {
            ch.upsert(Keyframe {
                id: row.id,
                time: row.time,
                value,
            });
        }
    }

    pub(crate) fn remove_row(&mut self, index: usize) -> Option<Row> {
        let row = self.row(index)?;
        for ch in &mut self.channels {
            ch.keyframes.remove(index);
        }
        Some(row)
    }

    pub(crate) fn set_row_values(&mut self, index: usize, values: &[f32]) {
        for (ch, &value) in self.channels.iter_mut().zip(values) {
            if let Some(k) = ch.keyframes.get_mut(index) {
                k.value = value;
            }
        }
    }

    /// Continuous sampling of every channel into `out` (one slot per channel).
    /// Empty channels yield their constant.
    pub fn sample_into(&self, time: f32, interpolate: bool, out: &mut [f32]) {
        for (slot, ch) in out.iter_mut().zip(&self.channels) {
            *slot = sample_keys(&ch.keyframes, time, interpolate).unwrap_or(ch.constant);
        }
    }
}
