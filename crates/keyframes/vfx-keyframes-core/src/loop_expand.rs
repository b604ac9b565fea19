//! Loop reconciliation for values whose components disagree on looping.
//!
//! Consumers can only loop a whole value, so when some (but not all)
//! components loop, the looping ones are unrolled forward until they cover
//! `max(lifetime_floor, longest component)` on-disk units.

use log::debug;

use crate::config::Config;
use crate::decompile::SourceTrack;
use crate::interp::sample_or;
use crate::record::DiskKeyframe;

#[derive(Clone, Debug)]
pub struct LoopExpander {
    floor: u32,
}

impl LoopExpander {
    pub fn new(cfg: &Config) -> Self {
        Self {
            floor: cfg.lifetime_floor as u32,
        }
    }

    /// Resolve per-component loop flags into the value-level flag, padding
    /// looping components when the flags are mixed. Components without a
    /// source record don't take part in the decision.
    pub(crate) fn reconcile(&self, tracks: &mut [SourceTrack]) -> bool {
        let mut present = tracks.iter().filter(|t| t.present).peekable();
        if present.peek().is_none() {
            return false;
        }
        let (looping, total) = present.fold((0usize, 0usize), |(l, n), t| {
            (l + usize::from(t.looping), n + 1)
        });
        if looping == total {
            return true;
        }
        if looping == 0 {
            return false;
        }

        let target = self.target_duration(tracks);
        debug!(
            "mixed loop flags ({looping}/{total} components loop); padding to {target} units"
        );
        for track in tracks
            .iter_mut()
            .filter(|t| t.present && t.looping && !t.defaulted)
        {
            expand(track, target);
        }
        false
    }

    pub(crate) fn target_duration(&self, tracks: &[SourceTrack]) -> u32 {
        tracks
            .iter()
            .map(SourceTrack::duration)
            .fold(self.floor, u32::max)
    }
}

/// Repeat the track's original segment until it reaches `target`. Each
/// appended keyframe samples the original segment at its offset.
fn expand(track: &mut SourceTrack, target: u32) {
    let period = track.duration();
    let original = track.keys.clone();
    let mut current = period;
    while current < target {
        for offset in 0..period {
            let time = current + offset;
            if time >= target {
                break;
            }
            let value = sample_or(&original, offset as f32, track.interpolate, track.constant);
            track.keys.push(DiskKeyframe::new(time as u16, value));
        }
        current += period;
    }
}
