//! # CalculationContext (C3).
//!
//! A read-only snapshot of the world and policy flags, consumed by every
//! movement edge's cost check. One `CalculationContext` is built per plan
//! and never mutated during that plan's lifetime; the planner may run
//! across several ticks against a stale snapshot, which is an accepted
//! tradeoff resolved by the replan cadence (spec §5).

use crate::cost;
use nav_if::{BlockInfo, BoundingBox, Cell, HostWorld, Settings, ToolRef};
use std::collections::HashMap;

/// Per-cell favoring multiplier map, used to bias routing without breaking
/// heuristic admissibility. Every entry must be `>= 1.0`.
#[derive(Debug, Clone, Default)]
pub struct Favoring(HashMap<Cell, f32>);

impl Favoring {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Sets the favoring multiplier for a cell. Values below `1.0` are
    /// clamped up to `1.0` to preserve admissibility.
    pub fn set(&mut self, cell: Cell, multiplier: f32) {
        self.0.insert(cell, multiplier.max(1.0));
    }

    pub fn get(&self, cell: &Cell) -> f32 {
        self.0.get(cell).copied().unwrap_or(1.0).max(1.0)
    }
}

/// Read-only snapshot of world state and policy consumed by cost checks.
pub struct CalculationContext<'w> {
    world: &'w dyn HostWorld,
    settings: Settings,
    favoring: Favoring,
    held_tool: Option<ToolRef>,
    has_water_bucket: bool,
    fall_table: cost::FallTable,
}

impl<'w> CalculationContext<'w> {
    pub fn new(world: &'w dyn HostWorld, settings: Settings) -> Self {
        Self {
            world,
            settings,
            favoring: Favoring::new(),
            held_tool: None,
            has_water_bucket: false,
            fall_table: cost::FallTable::new(),
        }
    }

    pub fn with_favoring(mut self, favoring: Favoring) -> Self {
        self.favoring = favoring;
        self
    }

    pub fn with_held_tool(mut self, tool: Option<ToolRef>) -> Self {
        self.held_tool = tool;
        self
    }

    pub fn with_water_bucket(mut self, has_water_bucket: bool) -> Self {
        self.has_water_bucket = has_water_bucket;
        self
    }

    // -- world accessors -----------------------------------------------------

    pub fn get_block(&self, x: i32, y: i32, z: i32) -> Option<BlockInfo> {
        self.world.get_block(x, y, z)
    }

    pub fn get_block_at(&self, cell: &Cell) -> Option<BlockInfo> {
        self.get_block(cell.x, cell.y, cell.z)
    }

    pub fn can_walk_on(&self, block: &BlockInfo) -> bool {
        block.bounding_box == BoundingBox::Block
            && !self.settings.avoid_blocks.contains(&block.name)
    }

    pub fn can_walk_through(&self, block: &BlockInfo) -> bool {
        match block.bounding_box {
            BoundingBox::Empty => true,
            BoundingBox::Block => false,
            BoundingBox::Other => is_walk_through_other(&block.name),
        }
    }

    pub fn is_water(&self, block: &BlockInfo) -> bool {
        block.name == "water" || block.name == "flowing_water"
    }

    pub fn is_lava(&self, block: &BlockInfo) -> bool {
        block.name == "lava" || block.name == "flowing_lava"
    }

    /// Break time, in ticks, for `block` with the best available tool.
    /// `COST_INF` if unbreakable or no tool can break it.
    pub fn get_break_time(&self, block: &BlockInfo) -> f64 {
        if block.is_unbreakable() {
            return cost::COST_INF;
        }
        let tool = self.get_best_tool(block).unwrap_or_else(ToolRef::hand);
        cost::get_break_cost(block.hardness, tool.tool_mult, tool.efficiency_level)
    }

    // -- policy ---------------------------------------------------------------

    pub fn can_dig(&self) -> bool {
        self.settings.can_dig
    }

    pub fn can_place(&self) -> bool {
        self.settings.can_place
    }

    pub fn allow_sprint(&self) -> bool {
        self.settings.allow_sprint
    }

    pub fn allow_parkour(&self) -> bool {
        self.settings.allow_parkour
    }

    pub fn allow_water_bucket(&self) -> bool {
        self.settings.allow_water_bucket
    }

    pub fn jump_penalty(&self) -> f64 {
        self.settings.jump_penalty
    }

    pub fn pathing_range(&self) -> u32 {
        self.settings.pathing_range
    }

    pub fn get_favoring(&self, x: i32, y: i32, z: i32) -> f32 {
        self.favoring.get(&Cell::new(x, y, z))
    }

    /// Best tool available to break `block`, or `None` if nothing is held.
    ///
    /// Real tool-selection policy (picking the best pickaxe/axe/shovel for a
    /// block's harvest class) lives on the host; the core only needs a
    /// single currently-held reference, supplied via [`Self::with_held_tool`].
    pub fn get_best_tool(&self, _block: &BlockInfo) -> Option<ToolRef> {
        self.held_tool.clone()
    }

    pub fn world(&self) -> &dyn HostWorld {
        self.world
    }

    pub fn has_water_bucket(&self) -> bool {
        self.has_water_bucket
    }

    /// Cost, in ticks, of falling `n` blocks and landing (spec §4.1).
    pub fn fall_cost(&self, n: i64, safe_water: bool) -> f64 {
        cost::get_fall_cost(&self.fall_table, n, safe_water)
    }

    /// True for ladders or any vine/cave-vine variant.
    pub fn is_climbable(&self, block: &BlockInfo) -> bool {
        block.name == "ladder" || block.name == "vine" || block.name == "cave_vines"
            || block.name == "cave_vines_plant" || block.name == "weeping_vines"
            || block.name == "weeping_vines_plant" || block.name == "twisting_vines"
            || block.name == "twisting_vines_plant"
    }

    /// True for doors, fence gates, and trapdoors, including redstone-gated
    /// ones (iron doors/trapdoors) — callers that must reject those check
    /// the block name themselves.
    pub fn is_openable(&self, block: &BlockInfo) -> bool {
        block.name.ends_with("_door")
            || block.name.ends_with("_fence_gate")
            || block.name.ends_with("_trapdoor")
    }
}

fn is_walk_through_other(name: &str) -> bool {
    matches!(
        name,
        "tall_grass"
            | "grass"
            | "fern"
            | "dead_bush"
            | "torch"
            | "sign"
            | "snow_layer"
            | "carpet"
            | "rail"
    )
}
