//! # Input/Rotation Smoothing (C9).
//!
//! A single [`InputHelper`] per agent composes control-intent overrides by
//! priority before applying them to the host once per tick; a single
//! [`RotationHelper`] slews look angles toward a target instead of snapping,
//! so emergency look-ats can preempt ordinary navigation without fighting it
//! for control every tick.

use nav_if::host::Control;
use nav_if::HostAgent;
use std::collections::HashMap;

/// The seven boolean control inputs the executor can assert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlState {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub sneak: bool,
    pub sprint: bool,
}

impl ControlState {
    fn field_mut(&mut self, control: Control) -> &mut bool {
        match control {
            Control::Forward => &mut self.forward,
            Control::Back => &mut self.back,
            Control::Left => &mut self.left,
            Control::Right => &mut self.right,
            Control::Jump => &mut self.jump,
            Control::Sneak => &mut self.sneak,
            Control::Sprint => &mut self.sprint,
        }
    }

    fn get(&self, control: Control) -> bool {
        match control {
            Control::Forward => self.forward,
            Control::Back => self.back,
            Control::Left => self.left,
            Control::Right => self.right,
            Control::Jump => self.jump,
            Control::Sneak => self.sneak,
            Control::Sprint => self.sprint,
        }
    }
}

/// Gating policy applied to sprint regardless of what any override requests.
#[derive(Debug, Clone, Copy)]
pub struct SprintGate {
    pub enabled: bool,
    pub cooldown_ticks: u32,
    pub food_level: u8,
    pub sneaking: bool,
    pub in_water: bool,
}

impl SprintGate {
    fn allows_sprint(&self) -> bool {
        self.enabled
            && self.cooldown_ticks == 0
            && self.food_level >= 6
            && !self.sneaking
            && !self.in_water
    }
}

/// One named source's requested partial control state: only the fields it
/// cares about (`None` entries are left for lower-priority sources, or the
/// all-false baseline, to decide).
#[derive(Debug, Clone, Copy, Default)]
pub struct PartialControl {
    pub forward: Option<bool>,
    pub back: Option<bool>,
    pub left: Option<bool>,
    pub right: Option<bool>,
    pub jump: Option<bool>,
    pub sneak: Option<bool>,
    pub sprint: Option<bool>,
}

/// Composes per-field control overrides from multiple named sources by
/// priority (spec §4.7), then applies the result to the host once per tick.
#[derive(Debug, Default)]
pub struct InputHelper {
    overrides: HashMap<String, (PartialControl, i32)>,
    applied: ControlState,
}

impl InputHelper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs or replaces `source_name`'s override for this and future
    /// ticks, at the given priority (higher wins per field).
    pub fn set_override(&mut self, source_name: &str, partial: PartialControl, priority: i32) {
        self.overrides.insert(source_name.to_string(), (partial, priority));
    }

    pub fn clear_override(&mut self, source_name: &str) {
        self.overrides.remove(source_name);
    }

    pub fn clear_all(&mut self) {
        self.overrides.clear();
    }

    /// Composes all active overrides (highest priority wins per field, ties
    /// broken by whichever was inserted last) and applies the result to
    /// `agent`, respecting `gate` for the sprint field.
    pub fn tick(&mut self, agent: &mut dyn HostAgent, gate: SprintGate) {
        let mut composed = ControlState::default();
        let mut winning_priority: HashMap<Control, i32> = HashMap::new();

        for (partial, priority) in self.overrides.values() {
            for (control, value) in [
                (Control::Forward, partial.forward),
                (Control::Back, partial.back),
                (Control::Left, partial.left),
                (Control::Right, partial.right),
                (Control::Jump, partial.jump),
                (Control::Sneak, partial.sneak),
                (Control::Sprint, partial.sprint),
            ] {
                let Some(value) = value else { continue };
                let current_priority = winning_priority.get(&control).copied().unwrap_or(i32::MIN);
                if *priority >= current_priority {
                    winning_priority.insert(control, *priority);
                    *composed.field_mut(control) = value;
                }
            }
        }

        if composed.sprint && !gate.allows_sprint() {
            composed.sprint = false;
        }

        for control in [
            Control::Forward,
            Control::Back,
            Control::Left,
            Control::Right,
            Control::Jump,
            Control::Sneak,
            Control::Sprint,
        ] {
            let value = composed.get(control);
            if self.applied.get(control) != value {
                agent.set_control(control, value);
            }
        }
        self.applied = composed;
    }
}

/// Slews yaw/pitch toward a target instead of snapping, so a lower-priority
/// navigation look doesn't fight a higher-priority emergency look-at.
#[derive(Debug, Clone, Copy)]
pub struct RotationHelper {
    target: Option<(f64, f64)>,
    priority: i32,
    degrees_per_tick: f64,
}

impl RotationHelper {
    pub fn new(degrees_per_tick: f64) -> Self {
        Self {
            target: None,
            priority: i32::MIN,
            degrees_per_tick,
        }
    }

    /// Requests a look-at, accepted only if `priority` is at least as high
    /// as the currently pending request's.
    pub fn request(&mut self, yaw: f64, pitch: f64, priority: i32) {
        if priority >= self.priority || self.target.is_none() {
            self.target = Some((yaw, pitch));
            self.priority = priority;
        }
    }

    pub fn clear(&mut self) {
        self.target = None;
        self.priority = i32::MIN;
    }

    /// Advances the slew by one tick and applies it. `instantaneous` snaps
    /// directly to the target in one tick regardless of `degrees_per_tick`
    /// (used by edges that need an exact look, e.g. placement aiming).
    pub fn tick(&mut self, agent: &mut dyn HostAgent, instantaneous: bool) {
        let Some((target_yaw, target_pitch)) = self.target else {
            return;
        };

        if instantaneous {
            agent.look(target_yaw, target_pitch, true);
            return;
        }

        let yaw = slew(agent.yaw(), target_yaw, self.degrees_per_tick);
        let pitch = slew(agent.pitch(), target_pitch, self.degrees_per_tick);
        agent.look(yaw, pitch, false);
    }
}

/// Moves `current` toward `target` by at most `max_delta` degrees, taking
/// the shorter way around the 360-degree yaw wrap.
fn slew(current: f64, target: f64, max_delta: f64) -> f64 {
    let mut delta = (target - current) % 360.0;
    if delta > 180.0 {
        delta -= 360.0;
    } else if delta < -180.0 {
        delta += 360.0;
    }
    current + delta.clamp(-max_delta, max_delta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nav_if::host::{Entity, Item, PendingOp};
    use nav_if::Cell;
    use std::collections::HashMap as Map;

    struct StubAgent {
        yaw: f64,
        pitch: f64,
        controls: ControlState,
    }

    impl HostAgent for StubAgent {
        fn position(&self) -> (f64, f64, f64) {
            (0.0, 0.0, 0.0)
        }
        fn cell(&self) -> Cell {
            Cell::new(0, 0, 0)
        }
        fn on_ground(&self) -> bool {
            true
        }
        fn in_water(&self) -> bool {
            false
        }
        fn velocity(&self) -> (f64, f64, f64) {
            (0.0, 0.0, 0.0)
        }
        fn yaw(&self) -> f64 {
            self.yaw
        }
        fn pitch(&self) -> f64 {
            self.pitch
        }
        fn set_control(&mut self, control: Control, active: bool) {
            *self.controls.field_mut(control) = active;
        }
        fn look(&mut self, yaw: f64, pitch: f64, _force: bool) {
            self.yaw = yaw;
            self.pitch = pitch;
        }
        fn dig(&mut self, _x: i32, _y: i32, _z: i32, _force_look: bool) -> Box<dyn PendingOp> {
            unimplemented!()
        }
        fn stop_digging(&mut self) {}
        fn place_block(&mut self, _reference: (i32, i32, i32), _face: (i32, i32, i32)) -> Box<dyn PendingOp> {
            unimplemented!()
        }
        fn equip(&mut self, _item_name: &str, _slot: u32) {}
        fn activate_item(&mut self) {}
        fn activate_block(&mut self, _x: i32, _y: i32, _z: i32) -> Box<dyn PendingOp> {
            unimplemented!()
        }
        fn inventory_items(&self) -> Vec<Item> {
            Vec::new()
        }
    }

    fn permissive_gate() -> SprintGate {
        SprintGate {
            enabled: true,
            cooldown_ticks: 0,
            food_level: 20,
            sneaking: false,
            in_water: false,
        }
    }

    #[test]
    fn higher_priority_override_wins_per_field() {
        let mut helper = InputHelper::new();
        helper.set_override(
            "nav",
            PartialControl {
                forward: Some(true),
                ..Default::default()
            },
            0,
        );
        helper.set_override(
            "emergency_stop",
            PartialControl {
                forward: Some(false),
                ..Default::default()
            },
            10,
        );

        let mut agent = StubAgent {
            yaw: 0.0,
            pitch: 0.0,
            controls: ControlState::default(),
        };
        helper.tick(&mut agent, permissive_gate());
        assert!(!agent.controls.forward);
    }

    #[test]
    fn sprint_is_gated_by_food_level() {
        let mut helper = InputHelper::new();
        helper.set_override(
            "nav",
            PartialControl {
                sprint: Some(true),
                ..Default::default()
            },
            0,
        );
        let mut agent = StubAgent {
            yaw: 0.0,
            pitch: 0.0,
            controls: ControlState::default(),
        };
        let mut gate = permissive_gate();
        gate.food_level = 2;
        helper.tick(&mut agent, gate);
        assert!(!agent.controls.sprint);
    }

    #[test]
    fn rotation_slews_toward_target_without_overshoot() {
        let mut rot = RotationHelper::new(10.0);
        rot.request(90.0, 0.0, 0);
        let mut agent = StubAgent {
            yaw: 0.0,
            pitch: 0.0,
            controls: ControlState::default(),
        };
        rot.tick(&mut agent, false);
        assert!((agent.yaw - 10.0).abs() < 1e-9);
    }

    #[test]
    fn rotation_instantaneous_snaps_immediately() {
        let mut rot = RotationHelper::new(5.0);
        rot.request(180.0, -30.0, 0);
        let mut agent = StubAgent {
            yaw: 0.0,
            pitch: 0.0,
            controls: ControlState::default(),
        };
        rot.tick(&mut agent, true);
        assert_eq!(agent.yaw, 180.0);
        assert_eq!(agent.pitch, -30.0);
    }

    #[test]
    fn emergency_priority_blocks_a_lower_priority_request() {
        let mut rot = RotationHelper::new(10.0);
        rot.request(90.0, 0.0, 10);
        rot.request(0.0, 0.0, 0);
        let mut agent = StubAgent {
            yaw: 0.0,
            pitch: 0.0,
            controls: ControlState::default(),
        };
        rot.tick(&mut agent, false);
        assert!(agent.yaw > 0.0);
    }

    #[test]
    fn entities_map_unused_placeholder_compiles() {
        let _map: Map<u64, Entity> = Map::new();
    }
}
