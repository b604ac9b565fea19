//! Compile a synchronized timeline back into sparse per-component records.
//!
//! Unanimated values compile to no records at all, and components whose
//! keyframes all equal their constant are omitted, matching how the
//! container stores values that only use the constant.

use std::collections::BTreeMap;

use log::debug;

use crate::config::Config;
use crate::error::KeyframeError;
use crate::record::{DiskKeyframe, KeyframeRecord};
use crate::timeline::SynchronizedTimeline;
use crate::value::ValueKind;

/// Value-level flags written into every emitted record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompileFlags {
    pub is_animated: bool,
    pub looping: bool,
    pub interpolate: bool,
}

#[derive(Clone, Debug, Default)]
pub struct Compiler {
    cfg: Config,
}

impl Compiler {
    pub fn new(cfg: Config) -> Self {
        Self { cfg }
    }

    /// Pure read of `timeline`; returns one slot per component.
    pub fn compile(
        &self,
        kind: &ValueKind,
        constants: &[f32],
        timeline: &SynchronizedTimeline,
        flags: CompileFlags,
    ) -> Result<Vec<Option<KeyframeRecord>>, KeyframeError> {
        let n = kind.component_count();
        if constants.len() != n {
            return Err(KeyframeError::count_mismatch(
                "compile constants",
                n,
                constants.len(),
            ));
        }
        if timeline.component_count() != n {
            return Err(KeyframeError::count_mismatch(
                "compile timeline",
                n,
                timeline.component_count(),
            ));
        }
        if !flags.is_animated {
            return Ok(vec![None; n]);
        }

        let records: Vec<Option<KeyframeRecord>> = timeline
            .channels
            .iter()
            .zip(constants)
            .enumerate()
            .map(|(i, (ch, &constant))| {
                if ch.values().all(|v| v == constant) {
                    return None;
                }
                // rounding can fold two editor times onto one disk time; last wins
                let by_time: BTreeMap<u16, f32> = ch
                    .keyframes
                    .iter()
                    .map(|k| {
                        (
                            kind.to_disk_time(k.time, &self.cfg),
                            kind.to_disk_value(k.value),
                        )
                    })
                    .collect();
                Some(KeyframeRecord {
                    looping: flags.looping,
                    interpolate: flags.interpolate,
                    parameter: kind.parameter,
                    component: kind.component_tag(i),
                    uses_default: false,
                    keyframes: by_time
                        .into_iter()
                        .map(|(time, value)| DiskKeyframe::new(time, value))
                        .collect(),
                })
            })
            .collect();

        debug!(
            "compiled parameter {}: {}/{} components emitted",
            kind.parameter,
            records.iter().flatten().count(),
            n
        );
        Ok(records)
    }
}
