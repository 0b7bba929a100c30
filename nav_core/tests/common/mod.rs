//! Shared fixtures for `nav_core` integration tests.

use nav_core::Cell;
use nav_if::host::{Control, Entity, Item, OpPoll, PendingOp};
use nav_if::{BlockInfo, BoundingBox, HostAgent, HostWorld};
use std::collections::HashMap;

/// A world whose blocks come from an explicit sparse map, defaulting to air
/// everywhere else. Lets each test describe only the terrain it cares about.
pub struct FixtureWorld {
    blocks: HashMap<(i32, i32, i32), BlockInfo>,
    floor_y: Option<i32>,
}

impl FixtureWorld {
    pub fn new() -> Self {
        Self {
            blocks: HashMap::new(),
            floor_y: None,
        }
    }

    /// Fills an infinite flat floor of stone at `y`, air above it.
    pub fn with_flat_floor(mut self, y: i32) -> Self {
        self.floor_y = Some(y);
        self
    }

    pub fn set(mut self, x: i32, y: i32, z: i32, block: BlockInfo) -> Self {
        self.blocks.insert((x, y, z), block);
        self
    }
}

impl HostWorld for FixtureWorld {
    fn get_block(&self, x: i32, y: i32, z: i32) -> Option<BlockInfo> {
        if let Some(block) = self.blocks.get(&(x, y, z)) {
            return Some(block.clone());
        }
        if self.floor_y == Some(y) {
            return Some(BlockInfo::new("stone", BoundingBox::Block, 1.5));
        }
        Some(BlockInfo::air())
    }

    fn entities(&self) -> HashMap<u64, Entity> {
        HashMap::new()
    }
}

/// A fully scripted agent: control inputs integrate directly into position
/// at a fixed per-tick step, good enough to exercise the executor's
/// edge-advance logic without a real physics sim.
pub struct ScriptedAgent {
    pub pos: (f64, f64, f64),
    pub on_ground: bool,
    pub in_water: bool,
    pub yaw: f64,
    pub pitch: f64,
    step: f64,
}

impl ScriptedAgent {
    pub fn at(x: f64, y: f64, z: f64) -> Self {
        Self {
            pos: (x, y, z),
            on_ground: true,
            in_water: false,
            yaw: 0.0,
            pitch: 0.0,
            step: 0.25,
        }
    }
}

impl HostAgent for ScriptedAgent {
    fn position(&self) -> (f64, f64, f64) {
        self.pos
    }
    fn cell(&self) -> Cell {
        Cell::new(
            self.pos.0.floor() as i32,
            self.pos.1.floor() as i32,
            self.pos.2.floor() as i32,
        )
    }
    fn on_ground(&self) -> bool {
        self.on_ground
    }
    fn in_water(&self) -> bool {
        self.in_water
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
        if !active {
            return;
        }
        let yaw_rad = self.yaw.to_radians();
        let (dx, dz) = match control {
            Control::Forward => (yaw_rad.sin(), -yaw_rad.cos()),
            Control::Back => (-yaw_rad.sin(), yaw_rad.cos()),
            _ => return,
        };
        self.pos.0 += dx * self.step;
        self.pos.2 += dz * self.step;
    }
    fn look(&mut self, yaw: f64, pitch: f64, _force: bool) {
        self.yaw = yaw;
        self.pitch = pitch;
    }
    fn dig(&mut self, _x: i32, _y: i32, _z: i32, _force_look: bool) -> Box<dyn PendingOp> {
        Box::new(InstantOp)
    }
    fn stop_digging(&mut self) {}
    fn place_block(&mut self, _reference: (i32, i32, i32), _face: (i32, i32, i32)) -> Box<dyn PendingOp> {
        Box::new(InstantOp)
    }
    fn equip(&mut self, _item_name: &str, _slot: u32) {}
    fn activate_item(&mut self) {}
    fn activate_block(&mut self, _x: i32, _y: i32, _z: i32) -> Box<dyn PendingOp> {
        Box::new(InstantOp)
    }
    fn inventory_items(&self) -> Vec<Item> {
        Vec::new()
    }
}

#[derive(Debug)]
struct InstantOp;

impl PendingOp for InstantOp {
    fn poll(&mut self) -> OpPoll {
        OpPoll::Ready
    }
}

/// A minimal linear-congruential generator, avoiding a `rand` dev-dependency
/// for the one property test that needs repeatable pseudo-randomness.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        self.0
    }

    pub fn next_range(&mut self, lo: i32, hi: i32) -> i32 {
        let span = (hi - lo + 1) as u64;
        lo + (self.next_u64() % span) as i32
    }
}
