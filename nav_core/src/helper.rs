//! # MovementHelper (C5).
//!
//! Serializes break/place sub-operations that cannot interleave against the
//! host's shared control state: only one break and one place op is ever in
//! flight at a time. One instance is cached per bot (spec §9 "Global
//! caches" note — owned by the executor's per-agent registry, never a
//! process-global).

use crate::context::CalculationContext;
use crate::cost;
use crate::movement::Status;
use nav_if::host::{Control, OpPoll, PendingOp};
use nav_if::{BoundingBox, Cell, HostAgent, ToolRef};

/// Preference order for disposable scaffold items when placing a block with
/// no particular material requirement.
const SCAFFOLD_PREFERENCE: &[&str] = &["dirt", "cobblestone", "netherrack", "stone"];

/// Face offsets checked, in order, when looking for a block to place
/// against: down, up, west, east, north, south.
const FACE_OFFSETS: [(i32, i32, i32); 6] = [
    (0, -1, 0),
    (0, 1, 0),
    (-1, 0, 0),
    (1, 0, 0),
    (0, 0, -1),
    (0, 0, 1),
];

/// Maximum reach distance for a break or place sub-op, in blocks.
const REACH_DISTANCE: f64 = 4.5;

pub struct MovementHelper {
    pending_break: Option<Box<dyn PendingOp>>,
    break_target: Option<Cell>,

    pending_place: Option<Box<dyn PendingOp>>,
    place_target: Option<Cell>,
}

impl MovementHelper {
    pub fn new() -> Self {
        Self {
            pending_break: None,
            break_target: None,
            pending_place: None,
            place_target: None,
        }
    }

    /// Cancels any in-flight sub-op and clears pending state. Called by the
    /// executor before a new edge starts (spec §5 ordering guarantees).
    pub fn clear(&mut self, agent: &mut dyn HostAgent) {
        if self.pending_break.is_some() {
            agent.stop_digging();
        }
        self.pending_break = None;
        self.break_target = None;
        self.pending_place = None;
        self.place_target = None;
    }

    pub fn is_idle(&self) -> bool {
        self.pending_break.is_none() && self.pending_place.is_none()
    }

    /// Advances the break queue by (at most) one sub-op this tick.
    ///
    /// Returns `Success` once `to_break` is empty, `Prepping` if the front
    /// target is out of reach (the caller should move the agent closer
    /// first), `Running` while a dig is in flight, and `Failed` if the dig
    /// reports failure.
    pub fn tick_breaking(
        &mut self,
        to_break: &mut Vec<Cell>,
        ctx: &CalculationContext,
        agent: &mut dyn HostAgent,
    ) -> Status {
        loop {
            if let Some(op) = self.pending_break.as_mut() {
                match op.poll() {
                    OpPoll::Pending => return Status::Running,
                    OpPoll::Ready => {
                        if !to_break.is_empty() {
                            to_break.remove(0);
                        }
                        self.pending_break = None;
                        self.break_target = None;
                        continue;
                    }
                    OpPoll::Failed => {
                        self.pending_break = None;
                        self.break_target = None;
                        return Status::Failed;
                    }
                }
            }

            let target = match to_break.first().copied() {
                Some(c) => c,
                None => return Status::Success,
            };

            let block = ctx.get_block_at(&target);
            let is_air = block
                .as_ref()
                .map(|b| b.bounding_box == BoundingBox::Empty)
                .unwrap_or(true);
            if is_air {
                to_break.remove(0);
                continue;
            }
            let block = block.unwrap();

            if distance_to_center(agent.position(), &target) > REACH_DISTANCE {
                return Status::Prepping;
            }

            let tool = ctx.get_best_tool(&block).unwrap_or_else(ToolRef::hand);
            agent.equip(&tool.name, 0);

            let op = agent.dig(target.x, target.y, target.z, true);
            self.pending_break = Some(op);
            self.break_target = Some(target);
            return Status::Running;
        }
    }

    /// Advances the place queue by (at most) one sub-op this tick. See
    /// [`Self::tick_breaking`] for the return-value contract.
    pub fn tick_placing(
        &mut self,
        to_place: &mut Vec<Cell>,
        ctx: &CalculationContext,
        agent: &mut dyn HostAgent,
    ) -> Status {
        loop {
            if let Some(op) = self.pending_place.as_mut() {
                match op.poll() {
                    OpPoll::Pending => return Status::Running,
                    OpPoll::Ready => {
                        if !to_place.is_empty() {
                            to_place.remove(0);
                        }
                        self.pending_place = None;
                        self.place_target = None;
                        agent.set_control(Control::Sneak, false);
                        continue;
                    }
                    OpPoll::Failed => {
                        self.pending_place = None;
                        self.place_target = None;
                        agent.set_control(Control::Sneak, false);
                        return Status::Failed;
                    }
                }
            }

            let target = match to_place.first().copied() {
                Some(c) => c,
                None => return Status::Success,
            };

            let already_block = ctx
                .get_block_at(&target)
                .map(|b| b.bounding_box == BoundingBox::Block)
                .unwrap_or(false);
            if already_block {
                to_place.remove(0);
                continue;
            }

            let reference = FACE_OFFSETS.iter().find_map(|(dx, dy, dz)| {
                let ref_cell = target.offset(*dx, *dy, *dz);
                ctx.get_block_at(&ref_cell).and_then(|b| {
                    if b.bounding_box == BoundingBox::Block {
                        Some((ref_cell, (-*dx, -*dy, -*dz)))
                    } else {
                        None
                    }
                })
            });

            let (reference_cell, face) = match reference {
                Some(r) => r,
                None => return Status::Failed,
            };

            let scaffold = match SCAFFOLD_PREFERENCE
                .iter()
                .find(|name| agent.inventory_items().iter().any(|i| &i.name == *name && i.count > 0))
            {
                Some(name) => *name,
                None => return Status::Failed,
            };

            agent.equip(scaffold, 0);
            agent.set_control(Control::Sneak, true);

            let face_point = cell_face_point(&reference_cell, face);
            let (yaw, pitch) = look_at(agent.position(), face_point);
            agent.look(yaw, pitch, true);

            let op = agent.place_block((reference_cell.x, reference_cell.y, reference_cell.z), face);
            self.pending_place = Some(op);
            self.place_target = Some(target);
            return Status::Running;
        }
    }

    /// Sets forward/sprint/jump controls toward `dest`'s cell-center XZ,
    /// computing yaw from the XZ delta. Returns `true` (and clears controls)
    /// once within `tol` of the center in XZ.
    pub fn move_toward(
        &self,
        agent: &mut dyn HostAgent,
        dest: &Cell,
        tol: f64,
        sprint: bool,
        jump: bool,
    ) -> bool {
        let (px, _py, pz) = agent.position();
        let (cx, cz) = cell_center_xz(dest);
        let dx = cx - px;
        let dz = cz - pz;
        let xz_dist = (dx * dx + dz * dz).sqrt();

        if xz_dist <= tol {
            agent.set_control(Control::Forward, false);
            agent.set_control(Control::Sprint, false);
            agent.set_control(Control::Jump, false);
            return true;
        }

        let yaw = dx.atan2(-dz).to_degrees();
        agent.look(yaw, agent.pitch(), false);
        agent.set_control(Control::Forward, true);
        agent.set_control(Control::Sprint, sprint);
        agent.set_control(Control::Jump, jump);
        false
    }

    /// True if `agent` is within `tol` of `cell`'s center in XZ and within
    /// one block in Y.
    pub fn is_at_position(&self, agent: &dyn HostAgent, cell: &Cell, tol: f64) -> bool {
        let (px, py, pz) = agent.position();
        let (cx, cz) = cell_center_xz(cell);
        let xz = ((cx - px).powi(2) + (cz - pz).powi(2)).sqrt();
        xz <= tol && (py - cell.y as f64).abs() <= 1.0
    }
}

impl Default for MovementHelper {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// FREE FUNCTIONS
// ---------------------------------------------------------------------------

pub fn cell_center_xz(cell: &Cell) -> (f64, f64) {
    (cell.x as f64 + 0.5, cell.z as f64 + 0.5)
}

fn distance_to_center(pos: (f64, f64, f64), cell: &Cell) -> f64 {
    let (px, py, pz) = pos;
    let dx = px - (cell.x as f64 + 0.5);
    let dy = py - (cell.y as f64 + 0.5);
    let dz = pz - (cell.z as f64 + 0.5);
    (dx * dx + dy * dy + dz * dz).sqrt()
}

fn cell_face_point(cell: &Cell, face: (i32, i32, i32)) -> (f64, f64, f64) {
    (
        cell.x as f64 + 0.5 + face.0 as f64 * 0.5,
        cell.y as f64 + 0.5 + face.1 as f64 * 0.5,
        cell.z as f64 + 0.5 + face.2 as f64 * 0.5,
    )
}

/// Yaw/pitch (degrees) from `from` looking at `to`.
pub fn look_at(from: (f64, f64, f64), to: (f64, f64, f64)) -> (f64, f64) {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    let dz = to.2 - from.2;
    let xz = (dx * dx + dz * dz).sqrt();
    let yaw = dx.atan2(-dz).to_degrees();
    let pitch = -(dy.atan2(xz)).to_degrees();
    (yaw, pitch)
}

/// Used by edges that need to know whether an obstacle is breakable at all
/// under the current policy, without necessarily breaking it this tick.
pub fn obstacle_break_cost(ctx: &CalculationContext, cell: &Cell) -> f64 {
    match ctx.get_block_at(cell) {
        None => 0.0,
        Some(block) => {
            if ctx.can_walk_through(&block) {
                0.0
            } else if !ctx.can_dig() {
                cost::COST_INF
            } else {
                ctx.get_break_time(&block)
            }
        }
    }
}
