//! Ascend: step up one block, with a jump.

use super::{Movement, MovementState, Status};
use crate::context::CalculationContext;
use crate::cost::{COST_INF, JUMP_ONE_BLOCK_COST, PLACE_ONE_BLOCK_COST, WALK_ONE_BLOCK_COST};
use crate::helper::MovementHelper;
use nav_if::host::Control;
use nav_if::HostAgent;

pub fn calculate_cost(m: &mut Movement, ctx: &CalculationContext) -> f64 {
    let dest_body = m.dest;
    let dest_head = m.dest.offset(0, 1, 0);
    let head_clearance = m.src.offset(0, 2, 0);

    let mut obstacle_cost = 0.0;
    for cell in [dest_body, dest_head, head_clearance] {
        let Some(block) = ctx.get_block_at(&cell) else {
            continue;
        };
        if ctx.can_walk_through(&block) {
            continue;
        }
        if !ctx.can_dig() {
            return COST_INF;
        }
        let break_time = ctx.get_break_time(&block);
        if break_time >= COST_INF {
            return COST_INF;
        }
        obstacle_cost += break_time;
        m.to_break.push(cell);
    }

    let mut total = WALK_ONE_BLOCK_COST + JUMP_ONE_BLOCK_COST + ctx.jump_penalty() + obstacle_cost;

    let floor_solid = ctx
        .get_block_at(&dest_body.offset(0, -1, 0))
        .map(|b| ctx.can_walk_on(&b))
        .unwrap_or(false);
    if !floor_solid {
        if !ctx.can_place() {
            return COST_INF;
        }
        m.to_place.push(dest_body.offset(0, -1, 0));
        total += PLACE_ONE_BLOCK_COST;
    }

    total * ctx.get_favoring(m.dest.x, m.dest.y, m.dest.z) as f64
}

pub fn tick(
    m: &mut Movement,
    ctx: &CalculationContext,
    agent: &mut dyn HostAgent,
    helper: &mut MovementHelper,
) -> Status {
    m.begin_break_or_place_or(MovementState::Moving);

    match m.state {
        MovementState::Breaking => match helper.tick_breaking(&mut m.to_break, ctx, agent) {
            Status::Success => {
                m.begin_break_or_place_or(MovementState::Moving);
                Status::Running
            }
            other => other,
        },
        MovementState::Placing => match helper.tick_placing(&mut m.to_place, ctx, agent) {
            Status::Success => {
                m.state = MovementState::Moving;
                Status::Running
            }
            other => other,
        },
        MovementState::Moving => {
            let (px, py, pz) = agent.position();
            let src_center_xz = crate::helper::cell_center_xz(&m.src);
            let at_src_xz = ((px - src_center_xz.0).powi(2) + (pz - src_center_xz.1).powi(2))
                .sqrt()
                < 0.3;

            if agent.on_ground() && at_src_xz && (py - m.src.y as f64).abs() < 0.1 {
                agent.set_control(Control::Jump, true);
            }

            let close_xz = helper.move_toward(agent, &m.dest, 0.3, ctx.allow_sprint(), true);
            let y_matches = (py - m.dest.y as f64).abs() < 0.5;

            if close_xz && y_matches {
                agent.set_control(Control::Jump, false);
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
