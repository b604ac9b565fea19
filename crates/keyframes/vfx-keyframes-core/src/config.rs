//! Core configuration for vfx-keyframes-core.

use serde::{Deserialize, Serialize};

/// Format constants used by decompile/compile and sampling buffers.
/// `Default` matches the particle/trail effect container format.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Minimum duration (on-disk units) that mixed-loop values are padded to.
    /// This is the shortest lifetime of a simulated particle or trail.
    pub lifetime_floor: u16,

    /// On-disk units per editor unit for lifetime-relative value kinds.
    pub lifetime_scale: f32,

    /// Initial capacity hint for sampling scratch buffers.
    pub scratch_components: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lifetime_floor: 101,
            lifetime_scale: 100.0,
            scratch_components: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: Config = serde_json::from_str(r#"{ "lifetime_floor": 60 }"#).unwrap();
        assert_eq!(cfg.lifetime_floor, 60);
        assert_eq!(cfg.lifetime_scale, 100.0);
        assert_eq!(cfg.scratch_components, 4);
    }
}
