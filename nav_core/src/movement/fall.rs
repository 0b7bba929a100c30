//! Fall: large descent, optionally cushioned with a placed water bucket (MLG).

use super::{Movement, MovementState, Status};
use crate::context::CalculationContext;
use crate::cost::{COST_INF, PLACE_ONE_BLOCK_COST, WALK_OFF_BLOCK_COST};
use crate::helper::MovementHelper;
use nav_if::HostAgent;

/// Falls taller than this many blocks take damage unless cushioned.
const SAFE_FALL_BLOCKS: i32 = 3;

/// Height above ground, in blocks, at which the water-bucket MLG attempt
/// begins if it hasn't already.
const MLG_TRIGGER_HEIGHT: f64 = 2.5;

/// Tick count past which the MLG attempt begins regardless of height, as a
/// fallback against a bad ground-distance estimate.
const MLG_TRIGGER_TICKS: u32 = 40;

/// Ticks to wait on the ground before reclaiming the placed water.
const POST_LAND_WAIT_TICKS: u32 = 3;

pub fn calculate_cost(m: &mut Movement, ctx: &CalculationContext, height: i32) -> f64 {
    if height < 1 {
        return COST_INF;
    }

    for dy in 1..height {
        let body = m.src.offset(0, -dy, 0);
        let head = body.offset(0, 1, 0);
        for cell in [body, head] {
            if cell == m.src {
                continue;
            }
            match ctx.get_block_at(&cell) {
                Some(block) if !ctx.can_walk_through(&block) => return COST_INF,
                _ => {}
            }
        }
    }

    let dest_body = m.dest;
    let dest_passable = ctx
        .get_block_at(&dest_body)
        .map(|b| ctx.can_walk_through(&b))
        .unwrap_or(true);
    if !dest_passable {
        return COST_INF;
    }

    let floor = ctx.get_block_at(&dest_body.offset(0, -1, 0));
    let floor_is_water = floor.as_ref().map(|b| ctx.is_water(b)).unwrap_or(false);
    let floor_solid = floor.as_ref().map(|b| ctx.can_walk_on(b)).unwrap_or(false);
    if !floor_is_water && !floor_solid {
        return COST_INF;
    }

    let cost = if height <= SAFE_FALL_BLOCKS {
        WALK_OFF_BLOCK_COST + ctx.fall_cost(height as i64, false)
    } else if floor_is_water {
        WALK_OFF_BLOCK_COST + ctx.fall_cost(height as i64, true)
    } else if ctx.allow_water_bucket() && ctx.has_water_bucket() && dest_passable {
        m.scratch.use_water_bucket = true;
        WALK_OFF_BLOCK_COST + ctx.fall_cost(height as i64, true) + 2.0 * PLACE_ONE_BLOCK_COST
    } else {
        WALK_OFF_BLOCK_COST + ctx.fall_cost(height as i64, false)
    };

    cost * ctx.get_favoring(m.dest.x, m.dest.y, m.dest.z) as f64
}

pub fn tick(
    m: &mut Movement,
    ctx: &CalculationContext,
    agent: &mut dyn HostAgent,
    helper: &mut MovementHelper,
) -> Status {
    if m.fall_override_active {
        m.state = MovementState::Waiting;
    } else if m.state == MovementState::NotStarted {
        m.state = MovementState::Moving;
    }

    match m.state {
        MovementState::Moving => {
            helper.move_toward(agent, &m.dest, 0.25, false, false);
            if !agent.on_ground() {
                m.state = MovementState::Waiting;
            }
            Status::Running
        }
        MovementState::Waiting => {
            let (_, py, _) = agent.position();
            let height_above_ground = py - m.dest.y as f64;

            if m.scratch.use_water_bucket
                && !m.scratch.water_placed
                && (height_above_ground <= MLG_TRIGGER_HEIGHT
                    || m.ticks_on_current > MLG_TRIGGER_TICKS)
            {
                agent.equip("water_bucket", 0);
                agent.look(agent.yaw(), 90.0, true);
                let _op = agent.place_block((m.dest.x, m.dest.y, m.dest.z), (0, 1, 0));
                m.scratch.water_placed = true;
            }

            if agent.on_ground() {
                m.scratch.ticks_since_land = Some(m.scratch.ticks_since_land.unwrap_or(0) + 1);
            }

            let landed_long_enough = m
                .scratch
                .ticks_since_land
                .map(|t| t >= POST_LAND_WAIT_TICKS)
                .unwrap_or(false);

            if agent.on_ground() && landed_long_enough {
                if m.scratch.use_water_bucket
                    && m.scratch.water_placed
                    && !m.scratch.bucket_picked_up
                {
                    agent.equip("bucket", 0);
                    agent.look(agent.yaw(), 90.0, true);
                    agent.activate_item();
                    m.scratch.bucket_picked_up = true;
                }
                m.fall_override_active = false;
                m.state = MovementState::Finished;
                Status::Success
            } else {
                Status::Running
            }
        }
        MovementState::Finished => Status::Success,
        _ => Status::Running,
    }
}
