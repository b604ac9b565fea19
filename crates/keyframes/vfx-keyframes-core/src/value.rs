//! Value kinds: how many components a logical value has, and how its times
//! and magnitudes map between the on-disk and editor domains.

use serde::{Deserialize, Serialize};

use crate::config::Config;

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Shape {
    Scalar,
    Vector2,
    Vector3,
    /// RGB color
    Color,
}

impl Shape {
    #[inline]
    pub fn len(self) -> usize {
        match self {
            Shape::Scalar => 1,
            Shape::Vector2 => 2,
            Shape::Vector3 | Shape::Color => 3,
        }
    }
}

/// How keyframe times are encoded.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimeDomain {
    /// Percentage of the owner's lifetime: `0..=100` on disk, `0.0..=1.0` in the editor.
    Lifetime,
    /// Raw frame index, identical in both domains.
    Frames,
}

/// How keyframe values are encoded.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Magnitude {
    Direct,
    /// Stored at half magnitude on disk (scale parameters).
    Halved,
}

/// Metadata for one logical keyframed value.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValueKind {
    pub shape: Shape,
    pub domain: TimeDomain,
    pub magnitude: Magnitude,
    /// Parameter tag written into every compiled record.
    pub parameter: u8,
    /// Component tag per component, in component order.
    pub components: Vec<u8>,
}

impl ValueKind {
    fn lifetime(shape: Shape, parameter: u8) -> Self {
        Self {
            shape,
            domain: TimeDomain::Lifetime,
            magnitude: Magnitude::Direct,
            parameter,
            components: (0..shape.len() as u8).collect(),
        }
    }

    pub fn scalar(parameter: u8, component: u8) -> Self {
        Self {
            components: vec![component],
            ..Self::lifetime(Shape::Scalar, parameter)
        }
    }

    /// Scalar scale parameter, stored halved on disk.
    pub fn scale(parameter: u8, component: u8) -> Self {
        Self {
            magnitude: Magnitude::Halved,
            ..Self::scalar(parameter, component)
        }
    }

    pub fn vector2(parameter: u8) -> Self {
        Self::lifetime(Shape::Vector2, parameter)
    }

    pub fn vector3(parameter: u8) -> Self {
        Self::lifetime(Shape::Vector3, parameter)
    }

    pub fn color(parameter: u8) -> Self {
        Self::lifetime(Shape::Color, parameter)
    }

    /// Frame-indexed vector (extrusion trail geometry).
    pub fn frame_vector3(parameter: u8) -> Self {
        Self {
            domain: TimeDomain::Frames,
            ..Self::lifetime(Shape::Vector3, parameter)
        }
    }

    #[inline]
    pub fn component_count(&self) -> usize {
        self.shape.len()
    }

    #[inline]
    pub fn component_tag(&self, index: usize) -> u8 {
        self.components.get(index).copied().unwrap_or(index as u8)
    }

    #[inline]
    pub fn is_color(&self) -> bool {
        self.shape == Shape::Color
    }

    /// Inclusive editor-time range accepted by edits.
    pub fn editor_time_range(&self) -> (f32, f32) {
        match self.domain {
            TimeDomain::Lifetime => (0.0, 1.0),
            TimeDomain::Frames => (0.0, u16::MAX as f32),
        }
    }

    pub fn to_editor_time(&self, disk: u16, cfg: &Config) -> f32 {
        match self.domain {
            TimeDomain::Lifetime => disk as f32 / cfg.lifetime_scale,
            TimeDomain::Frames => disk as f32,
        }
    }

    /// Rounds to the nearest on-disk unit, clamped to the u16 range.
    pub fn to_disk_time(&self, editor: f32, cfg: &Config) -> u16 {
        let raw = match self.domain {
            TimeDomain::Lifetime => editor * cfg.lifetime_scale,
            TimeDomain::Frames => editor,
        };
        raw.round().clamp(0.0, u16::MAX as f32) as u16
    }

    #[inline]
    pub fn to_editor_value(&self, disk: f32) -> f32 {
        match self.magnitude {
            Magnitude::Direct => disk,
            Magnitude::Halved => disk * 2.0,
        }
    }

    #[inline]
    pub fn to_disk_value(&self, editor: f32) -> f32 {
        match self.magnitude {
            Magnitude::Direct => editor,
            Magnitude::Halved => editor * 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifetime_times_round_trip_through_percent() {
        let cfg = Config::default();
        let kind = ValueKind::color(0);
        for disk in 0..=100u16 {
            let editor = kind.to_editor_time(disk, &cfg);
            assert!((0.0..=1.0).contains(&editor));
            assert_eq!(kind.to_disk_time(editor, &cfg), disk);
        }
    }

    #[test]
    fn frame_times_are_not_rescaled() {
        let cfg = Config::default();
        let kind = ValueKind::frame_vector3(4);
        assert_eq!(kind.to_editor_time(250, &cfg), 250.0);
        assert_eq!(kind.to_disk_time(250.4, &cfg), 250);
        assert_eq!(kind.to_disk_time(-3.0, &cfg), 0);
    }

    #[test]
    fn scale_is_halved_on_disk() {
        let kind = ValueKind::scale(2, 0);
        assert_eq!(kind.to_editor_value(0.75), 1.5);
        assert_eq!(kind.to_disk_value(1.5), 0.75);
        assert_eq!(ValueKind::scalar(2, 0).to_disk_value(1.5), 1.5);
    }

    #[test]
    fn tags_follow_shape() {
        let kind = ValueKind::vector2(9);
        assert_eq!(kind.component_count(), 2);
        assert_eq!(kind.component_tag(1), 1);
        assert_eq!(ValueKind::scalar(3, 2).component_tag(0), 2);
        assert!(ValueKind::color(0).is_color());
    }
}
