//! Decompile per-component keyframe records into a synchronized timeline.
//!
//! Steps:
//! 1. Copy each record's keyframes (later duplicates win), or seed the
//!    constant at time 0 for defaulted/absent components.
//! 2. Reconcile mixed loop flags (see [`crate::loop_expand`]).
//! 3. Fill every component at the union of all time points.
//! 4. Convert to editor time/magnitude and assign one id per row.

use std::collections::{BTreeMap, BTreeSet};

use log::trace;

use crate::channel::{Channel, Keyframe};
use crate::config::Config;
use crate::error::KeyframeError;
use crate::ids::IdAllocator;
use crate::interp::sample_or;
use crate::loop_expand::LoopExpander;
use crate::record::{DiskKeyframe, KeyframeRecord};
use crate::timeline::SynchronizedTimeline;
use crate::value::ValueKind;

/// Working copy of one component in the on-disk domain.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct SourceTrack {
    /// Sorted, unique times.
    pub keys: Vec<DiskKeyframe>,
    /// Constant in on-disk magnitude.
    pub constant: f32,
    pub looping: bool,
    pub interpolate: bool,
    /// Seeded from the constant rather than carrying real keyframes.
    pub defaulted: bool,
    /// A record existed for this component.
    pub present: bool,
}

impl SourceTrack {
    /// Span in on-disk units: last time + 1.
    pub fn duration(&self) -> u32 {
        self.keys.last().map_or(1, |k| k.time as u32 + 1)
    }
}

/// Result of a decompile pass.
#[derive(Clone, Debug, PartialEq)]
pub struct Decompiled {
    pub timeline: SynchronizedTimeline,
    pub interpolate: bool,
    pub looping: bool,
    pub is_animated: bool,
}

#[derive(Clone, Debug, Default)]
pub struct Decompiler {
    cfg: Config,
}

impl Decompiler {
    pub fn new(cfg: Config) -> Self {
        Self { cfg }
    }

    /// `constants` are in editor magnitude; `records` are on-disk, one slot
    /// per component (`None` for a component the container didn't store).
    pub fn decompile(
        &self,
        kind: &ValueKind,
        constants: &[f32],
        records: &[Option<KeyframeRecord>],
        ids: &mut IdAllocator,
    ) -> Result<Decompiled, KeyframeError> {
        let n = kind.component_count();
        if constants.len() != n {
            return Err(KeyframeError::count_mismatch(
                "decompile constants",
                n,
                constants.len(),
            ));
        }
        if records.len() != n {
            return Err(KeyframeError::count_mismatch(
                "decompile records",
                n,
                records.len(),
            ));
        }

        let interpolate = records
            .iter()
            .flatten()
            .next()
            .map_or(true, |r| r.interpolate);

        let mut tracks: Vec<SourceTrack> = records
            .iter()
            .zip(constants)
            .map(|(record, &constant)| {
                source_track(record.as_ref(), kind.to_disk_value(constant), interpolate)
            })
            .collect();

        let is_animated = tracks.iter().any(|t| !t.defaulted);
        let looping = LoopExpander::new(&self.cfg).reconcile(&mut tracks);

        let union: BTreeSet<u16> = tracks
            .iter()
            .flat_map(|t| t.keys.iter().map(|k| k.time))
            .collect();

        let filled: Vec<BTreeMap<u16, f32>> = tracks
            .iter()
            .map(|track| {
                let mut keys: BTreeMap<u16, f32> =
                    track.keys.iter().map(|k| (k.time, k.value)).collect();
                for &time in &union {
                    keys.entry(time).or_insert_with(|| {
                        sample_or(&track.keys, time as f32, track.interpolate, track.constant)
                    });
                }
                keys
            })
            .collect();

        let expected = union.len();
        if let Some((component, keys)) = filled
            .iter()
            .enumerate()
            .find(|(_, keys)| keys.len() != expected)
        {
            return Err(KeyframeError::Desynchronized {
                component,
                expected,
                actual: keys.len(),
            });
        }

        let row_ids: Vec<_> = (0..expected).map(|_| ids.alloc()).collect();
        let channels = filled
            .iter()
            .zip(&tracks)
            .zip(constants)
            .map(|((keys, track), &constant)| Channel {
                keyframes: keys
                    .iter()
                    .zip(&row_ids)
                    .map(|((&time, &value), &id)| Keyframe {
                        id,
                        time: kind.to_editor_time(time, &self.cfg),
                        value: kind.to_editor_value(value),
                    })
                    .collect(),
                constant,
                looping: track.looping,
                animated: !track.defaulted,
            })
            .collect();

        let timeline = SynchronizedTimeline::new(channels);
        timeline.verify()?;

        Ok(Decompiled {
            timeline,
            interpolate,
            looping,
            is_animated,
        })
    }
}

fn source_track(
    record: Option<&KeyframeRecord>,
    constant: f32,
    interpolate: bool,
) -> SourceTrack {
    let seeded = vec![DiskKeyframe::new(0, constant)];
    match record {
        None => SourceTrack {
            keys: seeded,
            constant,
            looping: false,
            interpolate,
            defaulted: true,
            present: false,
        },
        Some(r) if r.is_defaulted() => SourceTrack {
            keys: seeded,
            constant,
            looping: r.looping,
            interpolate: r.interpolate,
            defaulted: true,
            present: true,
        },
        Some(r) => SourceTrack {
            keys: dedupe(&r.keyframes),
            constant,
            looping: r.looping,
            interpolate: r.interpolate,
            defaulted: false,
            present: true,
        },
    }
}

/// Sort by time; when two source keyframes share a time the later one wins.
fn dedupe(keys: &[DiskKeyframe]) -> Vec<DiskKeyframe> {
    let mut by_time = BTreeMap::new();
    for k in keys {
        if let Some(old) = by_time.insert(k.time, k.value) {
            trace!(
                "duplicate keyframe at {}: {} overwritten by {}",
                k.time,
                old,
                k.value
            );
        }
    }
    by_time
        .into_iter()
        .map(|(time, value)| DiskKeyframe::new(time, value))
        .collect()
}
