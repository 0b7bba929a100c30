//! # Movement edges (C4).
//!
//! Each edge is a self-contained plan fragment: a cost check that
//! populates `to_break`/`to_place`, and a tick-driven execution state
//! machine. Thirteen edge families are modelled as a tagged sum type,
//! [`MovementKind`], dispatched by exhaustive matching from the common
//! [`Movement`] struct — this keeps the hot A* loop allocation-flat and
//! branch-predictable (spec §9 Design Notes).

mod ascend;
mod climb;
mod descend;
mod diagonal;
mod door;
mod fall;
mod parkour;
mod pillar;
mod swim;
mod traverse;

use crate::context::CalculationContext;
use crate::helper::MovementHelper;
use nav_if::{Cell, HostAgent};
use serde::Serialize;

// ---------------------------------------------------------------------------
// ENUMS
// ---------------------------------------------------------------------------

/// Result of ticking a movement edge for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Sub-op in flight but not yet applying control; caller should keep
    /// waiting without advancing toward the destination (e.g. the agent
    /// still needs to approach an unreachable break target).
    Prepping,
    /// Edge is actively applying control inputs; not yet complete.
    Running,
    /// Edge is waiting on an external condition (airborne, door animation).
    Waiting,
    /// Edge has completed successfully.
    Success,
    /// Edge has failed and should trigger an immediate replan.
    Failed,
    /// Edge's destination should be blacklisted for a longer cooldown.
    Unreachable,
}

/// Execution state machine phase of a [`Movement`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementState {
    NotStarted,
    Breaking,
    Placing,
    Moving,
    Waiting,
    Finished,
}

/// Which of the thirteen edge families this [`Movement`] is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum MovementKind {
    Traverse,
    Ascend,
    Descend { drop: i32 },
    Diagonal,
    Pillar,
    Parkour { dist: i32 },
    ParkourAscend,
    Fall { height: i32 },
    SwimHorizontal,
    SwimUp,
    SwimDown,
    WaterEntry,
    WaterExit,
    ClimbUp,
    ClimbDown,
    MountLadder,
    DismountLadder,
    ThroughDoor,
    ThroughFenceGate,
    ThroughTrapdoor { going_up: bool },
}

/// Mutable scratch state a kind's tick function may need across calls.
/// Not every field is used by every kind; unused fields stay at their
/// default. Kept flat (rather than per-kind boxed state) to avoid
/// per-edge heap allocation in the hot planner loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scratch {
    pub jump_start_y: Option<f64>,
    pub ticks_airborne: u32,
    pub ticks_since_land: Option<u32>,
    pub use_water_bucket: bool,
    pub water_placed: bool,
    pub bucket_picked_up: bool,
    pub door_opened: bool,
}

/// A planned atomic transition between two cells (spec §3 Movement).
#[derive(Debug, Clone)]
pub struct Movement {
    pub src: Cell,
    pub dest: Cell,
    pub kind: MovementKind,

    pub to_break: Vec<Cell>,
    pub to_place: Vec<Cell>,

    pub state: MovementState,
    pub ticks_on_current: u32,

    pub can_accept_fall_override: bool,
    pub fall_override_active: bool,

    pub cost_ticks: f64,

    pub scratch: Scratch,
}

impl Movement {
    pub fn new(src: Cell, dest: Cell, kind: MovementKind) -> Self {
        let can_accept_fall_override = matches!(
            kind,
            MovementKind::Descend { .. }
                | MovementKind::Fall { .. }
                | MovementKind::SwimHorizontal
                | MovementKind::SwimDown
                | MovementKind::WaterEntry
                | MovementKind::ClimbDown
        );

        Self {
            src,
            dest,
            kind,
            to_break: Vec::new(),
            to_place: Vec::new(),
            state: MovementState::NotStarted,
            ticks_on_current: 0,
            can_accept_fall_override,
            fall_override_active: false,
            cost_ticks: crate::cost::COST_INF,
            scratch: Scratch::default(),
        }
    }

    /// Resets execution state back to `NotStarted`, clearing buffers. The
    /// cost and break/place sets are recomputed fresh by the next
    /// `calculate_cost` call (they are not preserved by `reset`).
    pub fn reset(&mut self) {
        self.state = MovementState::NotStarted;
        self.ticks_on_current = 0;
        self.fall_override_active = false;
        self.scratch = Scratch::default();
    }

    /// Computes this edge's cost, populating `to_break`/`to_place`.
    /// Pure with respect to a frozen `ctx`: identical inputs always
    /// produce identical outputs (spec §8).
    pub fn calculate_cost(&mut self, ctx: &CalculationContext) -> f64 {
        self.to_break.clear();
        self.to_place.clear();

        let cost = match self.kind {
            MovementKind::Traverse => traverse::calculate_cost(self, ctx),
            MovementKind::Ascend => ascend::calculate_cost(self, ctx),
            MovementKind::Descend { drop } => descend::calculate_cost(self, ctx, drop),
            MovementKind::Diagonal => diagonal::calculate_cost(self, ctx),
            MovementKind::Pillar => pillar::calculate_cost(self, ctx),
            MovementKind::Parkour { dist } => parkour::calculate_cost(self, ctx, dist),
            MovementKind::ParkourAscend => parkour::calculate_ascend_cost(self, ctx),
            MovementKind::Fall { height } => fall::calculate_cost(self, ctx, height),
            MovementKind::SwimHorizontal => swim::calculate_horizontal_cost(self, ctx),
            MovementKind::SwimUp => swim::calculate_up_cost(self, ctx),
            MovementKind::SwimDown => swim::calculate_down_cost(self, ctx),
            MovementKind::WaterEntry => swim::calculate_entry_cost(self, ctx),
            MovementKind::WaterExit => swim::calculate_exit_cost(self, ctx),
            MovementKind::ClimbUp => climb::calculate_up_cost(self, ctx),
            MovementKind::ClimbDown => climb::calculate_down_cost(self, ctx),
            MovementKind::MountLadder => climb::calculate_mount_cost(self, ctx),
            MovementKind::DismountLadder => climb::calculate_dismount_cost(self, ctx),
            MovementKind::ThroughDoor => door::calculate_door_cost(self, ctx),
            MovementKind::ThroughFenceGate => door::calculate_gate_cost(self, ctx),
            MovementKind::ThroughTrapdoor { going_up } => {
                door::calculate_trapdoor_cost(self, ctx, going_up)
            }
        };

        self.cost_ticks = cost;
        cost
    }

    /// Drives this edge for one simulation tick.
    pub fn tick(
        &mut self,
        ctx: &CalculationContext,
        agent: &mut dyn HostAgent,
        helper: &mut MovementHelper,
    ) -> Status {
        self.ticks_on_current += 1;

        match self.kind {
            MovementKind::Traverse => traverse::tick(self, ctx, agent, helper),
            MovementKind::Ascend => ascend::tick(self, ctx, agent, helper),
            MovementKind::Descend { .. } => descend::tick(self, ctx, agent, helper),
            MovementKind::Diagonal => diagonal::tick(self, ctx, agent, helper),
            MovementKind::Pillar => pillar::tick(self, ctx, agent, helper),
            MovementKind::Parkour { .. } => parkour::tick(self, ctx, agent, helper),
            MovementKind::ParkourAscend => parkour::tick_ascend(self, ctx, agent, helper),
            MovementKind::Fall { .. } => fall::tick(self, ctx, agent, helper),
            MovementKind::SwimHorizontal => swim::tick_horizontal(self, ctx, agent, helper),
            MovementKind::SwimUp => swim::tick_up(self, ctx, agent, helper),
            MovementKind::SwimDown => swim::tick_down(self, ctx, agent, helper),
            MovementKind::WaterEntry => swim::tick_entry(self, ctx, agent, helper),
            MovementKind::WaterExit => swim::tick_exit(self, ctx, agent, helper),
            MovementKind::ClimbUp => climb::tick_up(self, ctx, agent, helper),
            MovementKind::ClimbDown => climb::tick_down(self, ctx, agent, helper),
            MovementKind::MountLadder => climb::tick_mount(self, ctx, agent, helper),
            MovementKind::DismountLadder => climb::tick_dismount(self, ctx, agent, helper),
            MovementKind::ThroughDoor => door::tick_door(self, ctx, agent, helper),
            MovementKind::ThroughFenceGate => door::tick_gate(self, ctx, agent, helper),
            MovementKind::ThroughTrapdoor { going_up } => {
                door::tick_trapdoor(self, ctx, agent, helper, going_up)
            }
        }
    }

    /// All cells this edge's execution must be able to assert about (spec
    /// §3 invariant: always includes `src` and `dest`, plus intermediate
    /// column cells for Descend/Fall).
    pub fn get_valid_positions(&self) -> Vec<Cell> {
        let mut positions = vec![self.src, self.dest];
        match self.kind {
            MovementKind::Descend { drop } | MovementKind::Fall { height: drop } => {
                for dy in 1..drop {
                    positions.push(self.src.offset(0, -dy, 0));
                }
            }
            _ => {}
        }
        positions
    }

    /// True once every `to_break`/`to_place` has been consumed.
    fn buffers_empty(&self) -> bool {
        self.to_break.is_empty() && self.to_place.is_empty()
    }

    /// Common entry step used by most edges: if there's breaking or
    /// placing work outstanding, start it; otherwise move into `Moving`.
    fn begin_break_or_place_or(&mut self, moving_state: MovementState) {
        if self.state != MovementState::NotStarted {
            return;
        }
        if !self.to_break.is_empty() {
            self.state = MovementState::Breaking;
        } else if !self.to_place.is_empty() {
            self.state = MovementState::Placing;
        } else {
            self.state = moving_state;
        }
    }
}
