//! Diagonal: one-block step across a corner, same Y.

use super::{Movement, MovementState, Status};
use crate::context::CalculationContext;
use crate::cost::{COST_INF, SPRINT_MULTIPLIER, SQRT_2, WALK_ONE_BLOCK_COST};
use crate::helper::MovementHelper;
use nav_if::HostAgent;

fn corner_clear(ctx: &CalculationContext, corner: nav_if::Cell) -> bool {
    let body_ok = ctx
        .get_block_at(&corner)
        .map(|b| ctx.can_walk_through(&b))
        .unwrap_or(true);
    let head_ok = ctx
        .get_block_at(&corner.offset(0, 1, 0))
        .map(|b| ctx.can_walk_through(&b))
        .unwrap_or(true);
    body_ok && head_ok
}

pub fn calculate_cost(m: &mut Movement, ctx: &CalculationContext) -> f64 {
    let dx = m.dest.x - m.src.x;
    let dz = m.dest.z - m.src.z;
    if dx.abs() != 1 || dz.abs() != 1 {
        return COST_INF;
    }

    let dest_body = m.dest;
    let dest_head = m.dest.offset(0, 1, 0);
    for cell in [dest_body, dest_head] {
        match ctx.get_block_at(&cell) {
            Some(block) if !ctx.can_walk_through(&block) => return COST_INF,
            _ => {}
        }
    }

    let floor_solid = ctx
        .get_block_at(&dest_body.offset(0, -1, 0))
        .map(|b| ctx.can_walk_on(&b))
        .unwrap_or(false);
    if !floor_solid {
        return COST_INF;
    }

    let corner_a = m.src.offset(dx, 0, 0);
    let corner_b = m.src.offset(0, 0, dz);
    let clear_a = corner_clear(ctx, corner_a);
    let clear_b = corner_clear(ctx, corner_b);

    if !clear_a && !clear_b {
        return COST_INF;
    }

    let mut cost = WALK_ONE_BLOCK_COST * SQRT_2;
    if clear_a && clear_b && ctx.allow_sprint() {
        cost *= SPRINT_MULTIPLIER;
    }

    cost * ctx.get_favoring(m.dest.x, m.dest.y, m.dest.z) as f64
}

pub fn tick(
    m: &mut Movement,
    ctx: &CalculationContext,
    agent: &mut dyn HostAgent,
    helper: &mut MovementHelper,
) -> Status {
    if m.state == MovementState::NotStarted {
        m.state = MovementState::Moving;
    }

    match m.state {
        MovementState::Moving => {
            if helper.move_toward(agent, &m.dest, 0.25, ctx.allow_sprint(), false) {
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
