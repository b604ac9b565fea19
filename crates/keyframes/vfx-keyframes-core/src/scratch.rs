//! Reusable output buffer for preview sampling.

use crate::config::Config;
use crate::keyframed_value::KeyframedValue;

/// Holds one sample's worth of component values. The slice returned by
/// [`SampleScratch::sample`] borrows the buffer, so it can't be read after
/// the next call overwrites it.
#[derive(Debug, Default)]
pub struct SampleScratch {
    buf: Vec<f32>,
}

impl SampleScratch {
    pub fn new(cfg: &Config) -> Self {
        Self {
            buf: Vec::with_capacity(cfg.scratch_components),
        }
    }

    pub fn sample(&mut self, value: &KeyframedValue, time: f32) -> &[f32] {
        self.buf.clear();
        self.buf.resize(value.component_count(), 0.0);
        value.fill(time, &mut self.buf);
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueKind;

    #[test]
    fn buffer_resizes_per_value() {
        let cfg = Config::default();
        let mut scratch = SampleScratch::new(&cfg);
        let mut scalar = KeyframedValue::new(ValueKind::scalar(0, 0), &[0.0], cfg.clone()).unwrap();
        scalar.add_keyframe(1.0, &[10.0]).unwrap();
        let color = KeyframedValue::new(ValueKind::color(0), &[0.2, 0.4, 0.6], cfg).unwrap();

        assert_eq!(scratch.sample(&scalar, 0.5), &[5.0]);
        assert_eq!(scratch.sample(&color, 0.5), &[0.2, 0.4, 0.6]);
    }
}
