//! # A* Planner (C6).
//!
//! Weighted A* over the block lattice. Each popped node is expanded against
//! a fixed successor set (spec §4.4); edges whose cost is `>= COST_INF` are
//! skipped. The open set is a binary heap ordered by `f = g + weight * h`
//! with a monotonically increasing tie-break counter so two equal-priority
//! nodes are always popped in insertion order (deterministic, reproducible
//! plans for a fixed seed — spec §8).

use crate::blacklist::Blacklist;
use crate::context::CalculationContext;
use crate::cost::COST_INF;
use crate::error::PlannerError;
use crate::movement::{Movement, MovementKind};
use nav_if::{Cell, Goal};
use ordered_float::OrderedFloat;
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::time::{Duration, Instant};

/// Tuning knobs for a single `plan()` call.
#[derive(Debug, Clone, Copy)]
pub struct PlanOptions {
    /// A* weight. `1.0` gives an optimal plan; `> 1.0` trades optimality for
    /// speed by inflating the heuristic term.
    pub weight: f64,
    /// Primary wall-clock budget. Once exceeded, the planner stops opening
    /// new nodes toward an optimal solution and enters its failure grace
    /// period.
    pub time_budget: Duration,
    /// Hard cap on the number of node expansions, independent of time.
    pub iteration_budget: u32,
    /// Extra wall-clock grace period, counted from when `time_budget`
    /// expires, before the planner gives up and returns its best-so-far
    /// prefix unconditionally.
    pub failure_budget: Duration,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            weight: 1.0,
            time_budget: Duration::from_millis(100),
            iteration_budget: 50_000,
            failure_budget: Duration::from_millis(250),
        }
    }
}

/// One edge of a completed or best-so-far plan.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PlannedEdge {
    pub src: Cell,
    pub dest: Cell,
    pub kind: MovementKind,
    pub cost: f64,
}

/// Outcome of a `plan()` call. Always non-panicking and always returns
/// whatever prefix was found, even when `reached_goal` is `false` (spec §3
/// invariant: "the planner returns a best-so-far prefix even on timeout").
#[derive(Debug, Clone, Serialize)]
pub struct PlanResult {
    pub edges: Vec<PlannedEdge>,
    pub reached_goal: bool,
    pub expansions: u32,
    /// Heuristic value of the path's final cell; `0.0` when `reached_goal`.
    pub best_h: f64,
}

impl PlanResult {
    /// Total cost of the returned edges, `0.0` for an empty plan.
    pub fn total_cost(&self) -> f64 {
        self.edges.iter().map(|e| e.cost).sum()
    }

    /// Archives this result under `session`, for post-hoc inspection of
    /// planner behaviour (a supplemented feature, grounded on the rover
    /// stack's habit of dumping a `Session`-scoped JSON report per run —
    /// see `rov_exec`'s telemetry archiving).
    pub fn archive(&self, session: &nav_util::session::Session, rel_path: &str) -> Result<(), nav_util::session::SessionError> {
        session.save(rel_path, self)
    }
}

/// Expansion count between wall-clock budget checks. Checking every
/// expansion would dominate runtime on cheap searches; checking too rarely
/// risks badly overrunning the budget on one pathological expansion.
const TIME_CHECK_INTERVAL: u32 = 64;

pub struct Planner;

impl Planner {
    pub fn new() -> Self {
        Self
    }

    /// Runs weighted A* from `start` toward `goal`.
    pub fn plan(
        &self,
        ctx: &CalculationContext,
        blacklist: &Blacklist,
        start: Cell,
        goal: &Goal,
        opts: PlanOptions,
    ) -> Result<PlanResult, PlannerError> {
        if ctx.pathing_range() == 0 {
            return Err(PlannerError::StartOutOfRange(start));
        }

        let started_at = Instant::now();
        let deadline = started_at + opts.time_budget;
        let failure_deadline = deadline + opts.failure_budget;

        let mut open: BinaryHeap<Reverse<(OrderedFloat<f64>, u64, Cell)>> = BinaryHeap::new();
        let mut counter: u64 = 0;
        let mut g_score: HashMap<Cell, f64> = HashMap::new();
        let mut came_from: HashMap<Cell, (Cell, MovementKind, f64)> = HashMap::new();
        let mut closed: HashMap<Cell, ()> = HashMap::new();

        g_score.insert(start, 0.0);
        open.push(Reverse((OrderedFloat(goal.heuristic(&start) * opts.weight), counter, start)));
        counter += 1;

        let mut best_cell = start;
        let mut best_h = goal.heuristic(&start);
        let mut expansions: u32 = 0;

        while let Some(Reverse((_, _, current))) = open.pop() {
            if closed.contains_key(&current) {
                continue;
            }

            let h = goal.heuristic(&current);
            let g = *g_score.get(&current).unwrap_or(&COST_INF);
            if h < best_h || (h == best_h && g < *g_score.get(&best_cell).unwrap_or(&COST_INF)) {
                best_h = h;
                best_cell = current;
            }

            if goal.is_end(&current) {
                return Ok(Self::reconstruct(&came_from, start, current, true, expansions, 0.0));
            }

            closed.insert(current, ());
            expansions += 1;

            if expansions >= opts.iteration_budget {
                break;
            }
            if expansions % TIME_CHECK_INTERVAL == 0 {
                let now = Instant::now();
                let made_progress = best_cell != start;
                if (now >= deadline && made_progress) || now >= failure_deadline {
                    break;
                }
            }

            for (dest, kind, cost) in successors(ctx, current, blacklist) {
                if cost >= COST_INF {
                    continue;
                }
                let tentative_g = g + cost;
                let existing = g_score.get(&dest).copied().unwrap_or(f64::INFINITY);
                if tentative_g < existing {
                    g_score.insert(dest, tentative_g);
                    came_from.insert(dest, (current, kind, cost));
                    let f = tentative_g + opts.weight * goal.heuristic(&dest);
                    open.push(Reverse((OrderedFloat(f), counter, dest)));
                    counter += 1;
                }
            }
        }

        Ok(Self::reconstruct(&came_from, start, best_cell, false, expansions, best_h))
    }

    fn reconstruct(
        came_from: &HashMap<Cell, (Cell, MovementKind, f64)>,
        start: Cell,
        end: Cell,
        reached_goal: bool,
        expansions: u32,
        best_h: f64,
    ) -> PlanResult {
        let mut edges = Vec::new();
        let mut cursor = end;
        while let Some(&(prev, kind, cost)) = came_from.get(&cursor) {
            edges.push(PlannedEdge {
                src: prev,
                dest: cursor,
                kind,
                cost,
            });
            cursor = prev;
            if cursor == start {
                break;
            }
        }
        edges.reverse();
        PlanResult {
            edges,
            reached_goal,
            expansions,
            best_h,
        }
    }
}

impl Default for Planner {
    fn default() -> Self {
        Self::new()
    }
}

const CARDINAL: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Enumerates the fixed candidate-edge catalog from `cur` (spec §4.4),
/// returning `(dest, kind, cost)` triples with `to_break`/`to_place` already
/// discarded — the planner only needs the scalar cost to relax `g`; the
/// executor recomputes a fresh [`Movement`] (with buffers) for the edges it
/// actually walks.
fn successors(
    ctx: &CalculationContext,
    cur: Cell,
    blacklist: &Blacklist,
) -> Vec<(Cell, MovementKind, f64)> {
    let mut out = Vec::new();

    let mut try_edge = |dest: Cell, kind: MovementKind| {
        if blacklist.is_blacklisted(&dest) {
            return;
        }
        let mut m = Movement::new(cur, dest, kind);
        let cost = m.calculate_cost(ctx);
        if cost < COST_INF {
            out.push((dest, kind, cost));
        }
    };

    for (dx, dz) in CARDINAL {
        try_edge(cur.offset(dx, 0, dz), MovementKind::Traverse);
        try_edge(cur.offset(dx, 1, dz), MovementKind::Ascend);
        try_edge(cur.offset(dx, -1, dz), MovementKind::Descend { drop: 1 });
        try_edge(cur.offset(dx, 0, dz), MovementKind::ThroughDoor);
        try_edge(cur.offset(dx, 0, dz), MovementKind::ThroughFenceGate);
        try_edge(cur.offset(dx, 0, dz), MovementKind::ThroughTrapdoor { going_up: false });
        try_edge(cur.offset(dx, 1, dz), MovementKind::ThroughTrapdoor { going_up: true });

        for dist in 2..=4 {
            try_edge(cur.offset(dx * dist, 0, dz * dist), MovementKind::Parkour { dist });
        }
        try_edge(cur.offset(dx * 2, 1, dz * 2), MovementKind::ParkourAscend);
        try_edge(cur.offset(dx * 3, 1, dz * 3), MovementKind::ParkourAscend);

        try_edge(cur.offset(dx, 0, dz), MovementKind::SwimHorizontal);
        try_edge(cur.offset(dx, 0, dz), MovementKind::WaterEntry);
        try_edge(cur.offset(dx, 0, dz), MovementKind::WaterExit);
    }

    for (dx, dz) in DIAGONAL {
        try_edge(cur.offset(dx, 0, dz), MovementKind::Diagonal);
    }

    try_edge(cur.offset(0, 1, 0), MovementKind::Pillar);
    try_edge(cur.offset(0, 1, 0), MovementKind::ClimbUp);
    try_edge(cur.offset(0, -1, 0), MovementKind::ClimbDown);
    try_edge(cur.offset(0, -1, 0), MovementKind::MountLadder);
    try_edge(cur.offset(0, 1, 0), MovementKind::DismountLadder);
    try_edge(cur.offset(0, 1, 0), MovementKind::SwimUp);
    try_edge(cur.offset(0, -1, 0), MovementKind::SwimDown);

    if let Some((landing, height)) = dynamic_fall_cost(ctx, cur, cur.y - 256) {
        try_edge(landing, MovementKind::Fall { height });
    }

    out
}

/// Fall-path probe (spec §4.2): scans straight down from `cur`, returning
/// the first landing cell that is either water or solid-with-headroom.
/// Resets nothing special on a ladder/vine grab (the climb edges handle
/// that transition separately); rejects a column whose landing is lava.
fn dynamic_fall_cost(ctx: &CalculationContext, cur: Cell, min_y: i32) -> Option<(Cell, i32)> {
    let mut height = 1;
    loop {
        let probe = cur.offset(0, -height, 0);
        if probe.y < min_y {
            return None;
        }

        let block = ctx.get_block_at(&probe)?;
        if ctx.is_lava(&block) {
            return None;
        }

        let passable_here = ctx.can_walk_through(&block);
        if !passable_here {
            // Landed on something solid one block too late; the cell above
            // `probe` is the actual landing spot.
            let landing = probe.offset(0, 1, 0);
            return Some((landing, height - 1)).filter(|(_, h)| *h >= 1);
        }
        if ctx.is_water(&block) {
            return Some((probe, height));
        }

        height += 1;
        if height > 256 {
            return None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nav_if::{BlockInfo, BoundingBox, HostWorld, Settings};
    use std::collections::HashMap as Map;

    struct FlatWorld;
    impl HostWorld for FlatWorld {
        fn get_block(&self, _x: i32, y: i32, _z: i32) -> Option<BlockInfo> {
            if y == 63 {
                Some(BlockInfo::new("stone", BoundingBox::Block, 1.5))
            } else {
                Some(BlockInfo::air())
            }
        }
        fn entities(&self) -> Map<u64, nav_if::host::Entity> {
            Map::new()
        }
    }

    #[test]
    fn plan_diagonal_shortcut_on_flat_ground() {
        let world = FlatWorld;
        let settings = Settings {
            allow_sprint: true,
            ..Default::default()
        };
        let ctx = CalculationContext::new(&world, settings);
        let blacklist = Blacklist::new();
        let planner = Planner::new();
        let goal = Goal::Block(Cell::new(2, 64, 2));
        let result = planner
            .plan(&ctx, &blacklist, Cell::new(0, 64, 0), &goal, PlanOptions::default())
            .unwrap();

        assert!(result.reached_goal);
        assert!(result.edges.iter().all(|e| matches!(e.kind, MovementKind::Diagonal)));
        let total_cost: f64 = result.edges.iter().map(|e| e.cost).sum();
        assert!((total_cost - 10.08).abs() < 0.5, "total cost was {total_cost}");
    }

    #[test]
    fn plan_behind_a_wall_with_no_digging_returns_best_so_far() {
        struct WalledWorld;
        impl HostWorld for WalledWorld {
            fn get_block(&self, x: i32, y: i32, z: i32) -> Option<BlockInfo> {
                if y == 63 {
                    Some(BlockInfo::new("stone", BoundingBox::Block, 1.5))
                } else if y == 64 && x == 5 {
                    Some(BlockInfo::new("bedrock", BoundingBox::Block, -1.0))
                } else if y == 65 && x == 5 {
                    Some(BlockInfo::new("bedrock", BoundingBox::Block, -1.0))
                } else {
                    Some(BlockInfo::air())
                }
            }
            fn entities(&self) -> Map<u64, nav_if::host::Entity> {
                Map::new()
            }
        }
        let world = WalledWorld;
        let settings = Settings {
            can_dig: false,
            ..Default::default()
        };
        let ctx = CalculationContext::new(&world, settings);
        let blacklist = Blacklist::new();
        let planner = Planner::new();
        let goal = Goal::Block(Cell::new(10, 64, 0));
        let opts = PlanOptions {
            time_budget: Duration::from_millis(50),
            failure_budget: Duration::from_millis(50),
            iteration_budget: 2_000,
            ..PlanOptions::default()
        };
        let result = planner
            .plan(&ctx, &blacklist, Cell::new(0, 64, 0), &goal, opts)
            .unwrap();

        assert!(!result.reached_goal);
    }
}
