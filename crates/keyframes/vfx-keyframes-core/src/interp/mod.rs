//! Keyframe sampling shared by gap-filling, loop expansion and preview.
//!
//! Semantics for a sorted, unique-time keyframe list:
//! - exact time match returns the stored value
//! - before the first keyframe returns the first value (no extrapolation)
//! - after the last keyframe returns the last value
//! - otherwise blends prev/next linearly, or holds prev when not interpolating

pub mod functions;

use crate::channel::Keyframe;
use crate::record::DiskKeyframe;
use functions::blend;

/// Anything with a time and a scalar value.
pub trait Timed {
    fn time(&self) -> f32;
    fn value(&self) -> f32;
}

impl Timed for Keyframe {
    #[inline]
    fn time(&self) -> f32 {
        self.time
    }
    #[inline]
    fn value(&self) -> f32 {
        self.value
    }
}

impl Timed for DiskKeyframe {
    #[inline]
    fn time(&self) -> f32 {
        self.time as f32
    }
    #[inline]
    fn value(&self) -> f32 {
        self.value
    }
}

/// Locate the keyframes around `time`: `prev` strictly before it and `next`
/// at or after it. Both are indices into `keys`.
pub fn surrounding<K: Timed>(keys: &[K], time: f32) -> (Option<usize>, Option<usize>) {
    let idx = keys.partition_point(|k| k.time() < time);
    let prev = idx.checked_sub(1);
    let next = (idx < keys.len()).then_some(idx);
    (prev, next)
}

/// Sample a sorted keyframe list. Returns `None` only when `keys` is empty.
pub fn sample_keys<K: Timed>(keys: &[K], time: f32, interpolate: bool) -> Option<f32> {
    match surrounding(keys, time) {
        (None, None) => None,
        (None, Some(next)) => Some(keys[next].value()),
        (Some(prev), None) => Some(keys[prev].value()),
        (Some(prev), Some(next)) => {
            let (p, n) = (&keys[prev], &keys[next]);
            if n.time() == time {
                return Some(n.value());
            }
            let span = n.time() - p.time();
            if span <= 0.0 {
                return Some(p.value());
            }
            let t = (time - p.time()) / span;
            Some(blend(p.value(), n.value(), t, interpolate))
        }
    }
}

/// Gap-filling variant: always yields a value, falling back to `constant`.
#[inline]
pub fn sample_or<K: Timed>(keys: &[K], time: f32, interpolate: bool, constant: f32) -> f32 {
    sample_keys(keys, time, interpolate).unwrap_or(constant)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(pairs: &[(u16, f32)]) -> Vec<DiskKeyframe> {
        pairs.iter().map(|&(t, v)| DiskKeyframe::new(t, v)).collect()
    }

    #[test]
    fn linear_and_hold() {
        let k = keys(&[(0, 0.0), (10, 10.0)]);
        assert_eq!(sample_keys(&k, 5.0, true), Some(5.0));
        assert_eq!(sample_keys(&k, 5.0, false), Some(0.0));
    }

    #[test]
    fn exact_hits_and_boundaries() {
        let k = keys(&[(10, 1.0), (20, 3.0), (30, -2.0)]);
        assert_eq!(sample_keys(&k, 20.0, false), Some(3.0));
        assert_eq!(sample_keys(&k, 30.0, true), Some(-2.0));
        assert_eq!(sample_keys(&k, 0.0, true), Some(1.0));
        assert_eq!(sample_keys(&k, 99.0, true), Some(-2.0));
    }

    #[test]
    fn empty_falls_back_to_constant() {
        let k: Vec<DiskKeyframe> = Vec::new();
        assert_eq!(sample_keys(&k, 1.0, true), None);
        assert_eq!(sample_or(&k, 1.0, true, 0.25), 0.25);
    }

    #[test]
    fn surrounding_never_returns_same_index() {
        let k = keys(&[(0, 0.0), (5, 1.0)]);
        assert_eq!(surrounding(&k, 5.0), (Some(0), Some(1)));
        assert_eq!(surrounding(&k, 0.0), (None, Some(0)));
        assert_eq!(surrounding(&k, 6.0), (Some(1), None));
    }
}
