//! # Cost model (C1).
//!
//! All costs are denominated in simulation ticks (20 ticks/second).

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Cost of walking one block on flat, unobstructed ground.
pub const WALK_ONE_BLOCK_COST: f64 = nav_if::goal::WALK_ONE_BLOCK_COST;

/// Cost of sprinting one block.
pub const SPRINT_ONE_BLOCK_COST: f64 = 20.0 / 5.612;

/// Multiplicative sprint bonus, applied to the base walk cost.
pub const SPRINT_MULTIPLIER: f64 = SPRINT_ONE_BLOCK_COST / WALK_ONE_BLOCK_COST;

/// Cost of sneaking one block.
pub const SNEAK_ONE_BLOCK_COST: f64 = 20.0 / 1.3;

/// Cost of swimming/walking one block through water.
pub const WALK_ONE_IN_WATER_COST: f64 = 20.0 / 2.2;

/// Cost of walking one block over soul sand or similarly slowing terrain.
pub const WALK_ONE_OVER_SOUL_SAND_COST: f64 = WALK_ONE_BLOCK_COST * 1.4;

/// Cost of climbing one block up a ladder.
pub const LADDER_UP_ONE_COST: f64 = 20.0 / 3.0;

/// Cost of descending one block down a ladder.
pub const LADDER_DOWN_ONE_COST: f64 = 20.0 / 5.0;

/// Cost of the jump arc to move up one block.
pub const JUMP_ONE_BLOCK_COST: f64 = 2.0;

/// Cost of stepping off an edge.
pub const WALK_OFF_BLOCK_COST: f64 = WALK_ONE_BLOCK_COST * 0.4;

/// Cost of re-centering after landing from a fall.
pub const CENTER_AFTER_FALL_COST: f64 = WALK_ONE_BLOCK_COST * 0.3;

/// Cost of placing a single block.
pub const PLACE_ONE_BLOCK_COST: f64 = 4.0;

/// Additional penalty for placing a block behind the agent while moving.
pub const BACKPLACE_ADDITIONAL_PENALTY: f64 = 2.0;

/// Cost of opening or closing a door or gate.
pub const DOOR_OPEN_COST: f64 = 2.0;

/// Cost of swimming up one block.
pub const SWIM_UP_COST: f64 = 6.0;

/// Cost of swimming down one block.
pub const SWIM_DOWN_COST: f64 = 2.0;

/// Infeasibility sentinel. Never produced by saturating arithmetic; always
/// an explicit assignment once an edge is known to be impossible.
pub const COST_INF: f64 = 1_000_000.0;

/// Diagonal movement factor.
pub const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// Upper bound on fall heights tabulated by [`FallTable`].
pub const MAX_FALL_BLOCKS: usize = 256;

/// Gravity acceleration used to integrate the fall table, in blocks/tick^2.
const GRAVITY: f64 = 0.08;

/// Drag applied per tick while falling.
const DRAG: f64 = 0.02;

/// Per-block-over-threshold fall damage penalty, in ticks.
const FALL_DAMAGE_PENALTY_PER_BLOCK: f64 = 10.0;

/// Falls of this height or less are never damage-penalized.
const SAFE_FALL_BLOCKS: f64 = 3.0;

// ---------------------------------------------------------------------------
// FALL TABLE
// ---------------------------------------------------------------------------

/// Pre-tabulated fall costs, indexed by integer fall height in blocks.
///
/// Built once by integrating `v <- (v + g) * (1 - drag)` starting from
/// rest, accumulating distance each tick until it reaches or exceeds `n`
/// blocks, and recording the tick count. Deterministic given fixed `g` and
/// `drag`, so two independent reimplementations given the same constants
/// always agree bit-for-bit.
#[derive(Debug, Clone)]
pub struct FallTable {
    ticks: [f64; MAX_FALL_BLOCKS + 1],
}

impl FallTable {
    /// Builds the table by integrating fall physics from rest.
    pub fn new() -> Self {
        let mut ticks = [0.0f64; MAX_FALL_BLOCKS + 1];

        // ticks[0] is defined as zero (no fall at all).
        let mut velocity = 0.0f64;
        let mut distance = 0.0f64;
        let mut tick_count = 0.0f64;
        let mut next_n = 1usize;

        // Cap the integration at a generous number of ticks so a pathological
        // drag/gravity combination can never spin this loop forever.
        for _ in 0..100_000 {
            if next_n > MAX_FALL_BLOCKS {
                break;
            }

            velocity = (velocity + GRAVITY) * (1.0 - DRAG);
            distance += velocity;
            tick_count += 1.0;

            while next_n <= MAX_FALL_BLOCKS && distance >= next_n as f64 {
                ticks[next_n] = tick_count;
                next_n += 1;
            }
        }

        Self { ticks }
    }

    /// Raw tabulated tick count to fall exactly `n` blocks, with no
    /// centering or damage penalty applied. `0` for `n == 0`.
    pub fn ticks_for(&self, n: usize) -> f64 {
        self.ticks[n.min(MAX_FALL_BLOCKS)]
    }
}

impl Default for FallTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the cost, in ticks, of falling `n` blocks and landing.
///
/// `n < 0` or `n > 256` is infeasible. `safe_water` suppresses the fall
/// damage penalty (the agent lands in water deep enough to cushion the
/// fall).
pub fn get_fall_cost(table: &FallTable, n: i64, safe_water: bool) -> f64 {
    if n < 0 || n > MAX_FALL_BLOCKS as i64 {
        return COST_INF;
    }

    let base = table.ticks_for(n as usize) + CENTER_AFTER_FALL_COST;

    if !safe_water && (n as f64) > SAFE_FALL_BLOCKS {
        base + ((n as f64) - SAFE_FALL_BLOCKS) * FALL_DAMAGE_PENALTY_PER_BLOCK
    } else {
        base
    }
}

// ---------------------------------------------------------------------------
// BREAK COST
// ---------------------------------------------------------------------------

/// Returns the cost, in ticks, of breaking a block with the given hardness,
/// tool speed multiplier, and efficiency enchantment level.
///
/// `hardness < 0` means unbreakable and returns [`COST_INF`].
pub fn get_break_cost(hardness: f32, tool_mult: f32, efficiency_level: u32) -> f64 {
    if hardness < 0.0 {
        return COST_INF;
    }

    let eff_bonus = if tool_mult > 1.0 {
        (efficiency_level as f32).powi(2) + 1.0
    } else {
        0.0
    };
    let effective = tool_mult + eff_bonus;

    if effective <= 0.0 {
        return COST_INF;
    }

    (hardness as f64 * 30.0) / effective as f64
}

// ---------------------------------------------------------------------------
// TERRAIN MULTIPLIER
// ---------------------------------------------------------------------------

/// A terrain-specific override of the base movement cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TerrainOverride {
    /// Multiply the base cost by this factor.
    Multiplier(f64),
    /// Force the move to be performed sneaking (uses [`SNEAK_ONE_BLOCK_COST`]
    /// instead of the base cost, regardless of sprint/walk).
    ForceSneak,
}

/// Returns the terrain cost override for the named block, if any, and the
/// resulting cost when applied to `base`.
pub fn get_terrain_cost(base: f64, block_name: &str) -> f64 {
    match terrain_override(block_name) {
        Some(TerrainOverride::Multiplier(m)) => base * m,
        Some(TerrainOverride::ForceSneak) => SNEAK_ONE_BLOCK_COST,
        None => base,
    }
}

/// Looks up the terrain override for a block name, if it has one.
pub fn terrain_override(block_name: &str) -> Option<TerrainOverride> {
    if block_name == "soul_sand" || block_name.ends_with("_soil") || block_name == "soil" {
        Some(TerrainOverride::Multiplier(1.4))
    } else if block_name == "honey_block" {
        Some(TerrainOverride::Multiplier(2.0))
    } else if block_name == "slime_block" {
        Some(TerrainOverride::Multiplier(0.8))
    } else if block_name.contains("ice") {
        Some(TerrainOverride::Multiplier(0.8))
    } else if block_name == "magma_block" {
        Some(TerrainOverride::ForceSneak)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------
