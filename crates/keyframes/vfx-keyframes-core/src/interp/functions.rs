//! Interpolation helpers:
//! - lerp_f32 (linear blend)
//! - blend (linear or hold, per the value's interpolate flag)

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Blend between two keyframes at local parameter `t` in `[0, 1]`.
/// Without interpolation the value holds at `a` until the next keyframe.
#[inline]
pub fn blend(a: f32, b: f32, t: f32, interpolate: bool) -> f32 {
    if interpolate {
        lerp_f32(a, b, t)
    } else {
        a
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints_and_mid() {
        assert_eq!(lerp_f32(2.0, 4.0, 0.0), 2.0);
        assert_eq!(lerp_f32(2.0, 4.0, 1.0), 4.0);
        assert_eq!(lerp_f32(2.0, 4.0, 0.5), 3.0);
    }

    #[test]
    fn hold_ignores_t() {
        assert_eq!(blend(2.0, 4.0, 0.9, false), 2.0);
        assert_eq!(blend(2.0, 4.0, 0.5, true), 3.0);
    }
}
