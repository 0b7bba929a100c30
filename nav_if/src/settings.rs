//! Operator-facing settings (spec §6), loaded once by the host.
//!
//! Settings hot-reload (file watching) is explicitly out of scope (spec §1
//! Non-goals); loading is a one-shot `nav_util::params::load` call performed
//! by the host before constructing the core.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_true")]
    pub allow_sprint: bool,

    #[serde(default)]
    pub allow_parkour: bool,

    #[serde(default)]
    pub allow_water_bucket: bool,

    #[serde(default = "default_true")]
    pub can_dig: bool,

    #[serde(default = "default_true")]
    pub can_place: bool,

    /// Tick offset added to every jump. Clamped to `[0.0, inf)` on load.
    #[serde(default)]
    pub jump_penalty: f64,

    /// Maximum allowed planning radius, in blocks. Clamped to `[1, 256]`.
    #[serde(default = "default_pathing_range")]
    pub pathing_range: u32,

    #[serde(default)]
    pub avoid_blocks: HashSet<String>,
}

fn default_true() -> bool {
    true
}

fn default_pathing_range() -> u32 {
    100
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            allow_sprint: true,
            allow_parkour: false,
            allow_water_bucket: false,
            can_dig: true,
            can_place: true,
            jump_penalty: 0.0,
            pathing_range: default_pathing_range(),
            avoid_blocks: HashSet::new(),
        }
    }
}

impl Settings {
    /// Clamps out-of-range fields in place. Called after deserialisation by
    /// `nav_util::params::load_settings`.
    pub fn clamp(&mut self) {
        if self.jump_penalty < 0.0 {
            self.jump_penalty = 0.0;
        }
        self.pathing_range = self.pathing_range.clamp(1, 256);
    }
}
