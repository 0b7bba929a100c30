//! Swim edges: horizontal/vertical movement through water, and the
//! transitions onto/off of it.

use super::{Movement, MovementState, Status};
use crate::context::CalculationContext;
use crate::cost::{COST_INF, SWIM_DOWN_COST, SWIM_UP_COST, WALK_ONE_IN_WATER_COST};
use crate::helper::MovementHelper;
use nav_if::host::Control;
use nav_if::HostAgent;

fn is_water_at(ctx: &CalculationContext, cell: &nav_if::Cell) -> bool {
    ctx.get_block_at(cell).map(|b| ctx.is_water(&b)).unwrap_or(false)
}

fn is_solid_at(ctx: &CalculationContext, cell: &nav_if::Cell) -> bool {
    ctx.get_block_at(cell).map(|b| ctx.can_walk_on(&b)).unwrap_or(false)
}

pub fn calculate_horizontal_cost(m: &mut Movement, ctx: &CalculationContext) -> f64 {
    if !is_water_at(ctx, &m.src) || !is_water_at(ctx, &m.dest) {
        return COST_INF;
    }
    WALK_ONE_IN_WATER_COST * ctx.get_favoring(m.dest.x, m.dest.y, m.dest.z) as f64
}

pub fn calculate_up_cost(m: &mut Movement, ctx: &CalculationContext) -> f64 {
    if !is_water_at(ctx, &m.src) || !is_water_at(ctx, &m.dest) {
        return COST_INF;
    }
    SWIM_UP_COST * ctx.get_favoring(m.dest.x, m.dest.y, m.dest.z) as f64
}

pub fn calculate_down_cost(m: &mut Movement, ctx: &CalculationContext) -> f64 {
    if !is_water_at(ctx, &m.src) || !is_water_at(ctx, &m.dest) {
        return COST_INF;
    }
    SWIM_DOWN_COST * ctx.get_favoring(m.dest.x, m.dest.y, m.dest.z) as f64
}

pub fn calculate_entry_cost(m: &mut Movement, ctx: &CalculationContext) -> f64 {
    if is_water_at(ctx, &m.src) || !is_water_at(ctx, &m.dest) {
        return COST_INF;
    }
    WALK_ONE_IN_WATER_COST * ctx.get_favoring(m.dest.x, m.dest.y, m.dest.z) as f64
}

pub fn calculate_exit_cost(m: &mut Movement, ctx: &CalculationContext) -> f64 {
    if !is_water_at(ctx, &m.src) {
        return COST_INF;
    }
    if !is_solid_at(ctx, &m.dest.offset(0, -1, 0)) {
        return COST_INF;
    }
    let dest_passable = ctx
        .get_block_at(&m.dest)
        .map(|b| ctx.can_walk_through(&b))
        .unwrap_or(true);
    if !dest_passable {
        return COST_INF;
    }
    WALK_ONE_IN_WATER_COST * ctx.get_favoring(m.dest.x, m.dest.y, m.dest.z) as f64
}

fn simple_swim_tick(
    m: &mut Movement,
    ctx: &CalculationContext,
    agent: &mut dyn HostAgent,
    helper: &mut MovementHelper,
    tol: f64,
) -> Status {
    if m.fall_override_active {
        m.fall_override_active = false;
    }
    if m.state == MovementState::NotStarted {
        m.state = MovementState::Moving;
    }
    if helper.move_toward(agent, &m.dest, tol, false, false) {
        m.state = MovementState::Finished;
        return Status::Success;
    }
    let _ = ctx;
    Status::Running
}

pub fn tick_horizontal(
    m: &mut Movement,
    ctx: &CalculationContext,
    agent: &mut dyn HostAgent,
    helper: &mut MovementHelper,
) -> Status {
    simple_swim_tick(m, ctx, agent, helper, 0.3)
}

pub fn tick_up(
    m: &mut Movement,
    ctx: &CalculationContext,
    agent: &mut dyn HostAgent,
    helper: &mut MovementHelper,
) -> Status {
    if m.state == MovementState::NotStarted {
        m.state = MovementState::Moving;
    }
    agent.set_control(Control::Jump, true);
    if helper.move_toward(agent, &m.dest, 0.3, false, true) {
        agent.set_control(Control::Jump, false);
        m.state = MovementState::Finished;
        return Status::Success;
    }
    let _ = ctx;
    Status::Running
}

pub fn tick_down(
    m: &mut Movement,
    ctx: &CalculationContext,
    agent: &mut dyn HostAgent,
    helper: &mut MovementHelper,
) -> Status {
    if m.fall_override_active {
        m.fall_override_active = false;
    }
    if m.state == MovementState::NotStarted {
        m.state = MovementState::Moving;
    }
    agent.set_control(Control::Sneak, true);
    if helper.move_toward(agent, &m.dest, 0.3, false, false) {
        agent.set_control(Control::Sneak, false);
        m.state = MovementState::Finished;
        return Status::Success;
    }
    let _ = ctx;
    Status::Running
}

pub fn tick_entry(
    m: &mut Movement,
    ctx: &CalculationContext,
    agent: &mut dyn HostAgent,
    helper: &mut MovementHelper,
) -> Status {
    if m.fall_override_active {
        m.fall_override_active = false;
    }
    simple_swim_tick(m, ctx, agent, helper, 0.3)
}

pub fn tick_exit(
    m: &mut Movement,
    ctx: &CalculationContext,
    agent: &mut dyn HostAgent,
    helper: &mut MovementHelper,
) -> Status {
    if m.state == MovementState::NotStarted {
        m.state = MovementState::Moving;
    }
    let adjacent_to_land = helper.is_at_position(agent, &m.dest, 1.2);
    if adjacent_to_land {
        agent.set_control(Control::Jump, true);
    }
    if helper.move_toward(agent, &m.dest, 0.3, false, adjacent_to_land) {
        agent.set_control(Control::Jump, false);
        m.state = MovementState::Finished;
        return Status::Success;
    }
    let _ = ctx;
    Status::Running
}
