//! ThroughDoor/ThroughFenceGate/ThroughTrapdoor: openable obstacles between
//! `src` and `dest`.

use super::{Movement, MovementState, Status};
use crate::context::CalculationContext;
use crate::cost::{COST_INF, DOOR_OPEN_COST, WALK_ONE_BLOCK_COST};
use crate::helper::MovementHelper;
use nav_if::host::OpPoll;
use nav_if::{BlockInfo, Cell, HostAgent};

fn is_redstone_gated(block: &BlockInfo) -> bool {
    block.name == "iron_door" || block.name == "iron_trapdoor"
}

/// Finds the openable block between `src` and `dest`, checking feet then
/// head level at both cells.
fn find_openable(ctx: &CalculationContext, src: Cell, dest: Cell) -> Option<(Cell, BlockInfo)> {
    for cell in [src, dest, src.offset(0, 1, 0), dest.offset(0, 1, 0)] {
        if let Some(block) = ctx.get_block_at(&cell) {
            if ctx.is_openable(&block) {
                return Some((cell, block));
            }
        }
    }
    None
}

pub fn calculate_door_cost(m: &mut Movement, ctx: &CalculationContext) -> f64 {
    let Some((cell, block)) = find_openable(ctx, m.src, m.dest) else {
        return COST_INF;
    };
    if is_redstone_gated(&block) {
        return COST_INF;
    }
    m.scratch.door_opened = ctx.can_walk_through(&block);
    let _ = cell;
    (WALK_ONE_BLOCK_COST + DOOR_OPEN_COST) * ctx.get_favoring(m.dest.x, m.dest.y, m.dest.z) as f64
}

pub fn calculate_gate_cost(m: &mut Movement, ctx: &CalculationContext) -> f64 {
    let Some((cell, block)) = find_openable(ctx, m.src, m.dest) else {
        return COST_INF;
    };
    m.scratch.door_opened = ctx.can_walk_through(&block);
    let _ = cell;
    (WALK_ONE_BLOCK_COST + DOOR_OPEN_COST) * ctx.get_favoring(m.dest.x, m.dest.y, m.dest.z) as f64
}

pub fn calculate_trapdoor_cost(m: &mut Movement, ctx: &CalculationContext, going_up: bool) -> f64 {
    let Some((cell, block)) = find_openable(ctx, m.src, m.dest) else {
        return COST_INF;
    };
    if is_redstone_gated(&block) {
        return COST_INF;
    }
    m.scratch.door_opened = ctx.can_walk_through(&block);
    let _ = cell;
    let base = if going_up { 8.0 } else { 4.0 };
    (base + DOOR_OPEN_COST) * ctx.get_favoring(m.dest.x, m.dest.y, m.dest.z) as f64
}

fn tick_openable(
    m: &mut Movement,
    ctx: &CalculationContext,
    agent: &mut dyn HostAgent,
    helper: &mut MovementHelper,
) -> Status {
    if m.state == MovementState::NotStarted {
        m.state = if m.scratch.door_opened {
            MovementState::Moving
        } else {
            MovementState::Waiting
        };
    }

    match m.state {
        MovementState::Waiting => {
            let Some((cell, _)) = find_openable(ctx, m.src, m.dest) else {
                return Status::Failed;
            };
            let mut op = agent.activate_block(cell.x, cell.y, cell.z);
            match op.poll() {
                OpPoll::Pending => Status::Running,
                OpPoll::Ready => {
                    m.scratch.door_opened = true;
                    m.state = MovementState::Moving;
                    Status::Running
                }
                OpPoll::Failed => Status::Failed,
            }
        }
        MovementState::Moving => {
            if helper.move_toward(agent, &m.dest, 0.25, false, false) {
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

pub fn tick_door(
    m: &mut Movement,
    ctx: &CalculationContext,
    agent: &mut dyn HostAgent,
    helper: &mut MovementHelper,
) -> Status {
    tick_openable(m, ctx, agent, helper)
}

pub fn tick_gate(
    m: &mut Movement,
    ctx: &CalculationContext,
    agent: &mut dyn HostAgent,
    helper: &mut MovementHelper,
) -> Status {
    tick_openable(m, ctx, agent, helper)
}

pub fn tick_trapdoor(
    m: &mut Movement,
    ctx: &CalculationContext,
    agent: &mut dyn HostAgent,
    helper: &mut MovementHelper,
    _going_up: bool,
) -> Status {
    tick_openable(m, ctx, agent, helper)
}
