//! Climb edges: ladders and vines, mounting and dismounting them.

use super::{Movement, MovementState, Status};
use crate::context::CalculationContext;
use crate::cost::{COST_INF, LADDER_DOWN_ONE_COST, LADDER_UP_ONE_COST, WALK_ONE_BLOCK_COST};
use crate::helper::MovementHelper;
use nav_if::host::Control;
use nav_if::{BlockInfo, Cell, HostAgent};

/// Tick timeout past which a climb edge is reported `Unreachable` rather
/// than retried (spec §4.2).
const CLIMB_TICK_TIMEOUT: u32 = 100;

const VINE_UP_MULTIPLIER: f64 = 1.2;
const VINE_DOWN_MULTIPLIER: f64 = 1.1;

fn is_vine(block: &BlockInfo) -> bool {
    block.name != "ladder"
}

fn has_solid_backing(ctx: &CalculationContext, cell: &Cell) -> bool {
    const NEIGHBORS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
    NEIGHBORS.iter().any(|(dx, dz)| {
        ctx.get_block_at(&cell.offset(*dx, 0, *dz))
            .map(|b| ctx.can_walk_on(&b))
            .unwrap_or(false)
    })
}

fn climbable_cost(ctx: &CalculationContext, cell: &Cell, up: bool) -> f64 {
    let Some(block) = ctx.get_block_at(cell) else {
        return COST_INF;
    };
    if !ctx.is_climbable(&block) {
        return COST_INF;
    }
    if is_vine(&block) && !has_solid_backing(ctx, cell) {
        return COST_INF;
    }
    let base = if up { LADDER_UP_ONE_COST } else { LADDER_DOWN_ONE_COST };
    if is_vine(&block) {
        base * if up { VINE_UP_MULTIPLIER } else { VINE_DOWN_MULTIPLIER }
    } else {
        base
    }
}

pub fn calculate_up_cost(m: &mut Movement, ctx: &CalculationContext) -> f64 {
    let cost = climbable_cost(ctx, &m.src, true);
    if cost >= COST_INF {
        return COST_INF;
    }
    cost * ctx.get_favoring(m.dest.x, m.dest.y, m.dest.z) as f64
}

pub fn calculate_down_cost(m: &mut Movement, ctx: &CalculationContext) -> f64 {
    let cost = climbable_cost(ctx, &m.dest, false);
    if cost >= COST_INF {
        return COST_INF;
    }
    cost * ctx.get_favoring(m.dest.x, m.dest.y, m.dest.z) as f64
}

pub fn calculate_mount_cost(m: &mut Movement, ctx: &CalculationContext) -> f64 {
    let cost = climbable_cost(ctx, &m.dest, true);
    if cost >= COST_INF {
        return COST_INF;
    }
    let _ = WALK_ONE_BLOCK_COST;
    WALK_ONE_BLOCK_COST * ctx.get_favoring(m.dest.x, m.dest.y, m.dest.z) as f64
}

pub fn calculate_dismount_cost(m: &mut Movement, ctx: &CalculationContext) -> f64 {
    let cost = climbable_cost(ctx, &m.src, true);
    if cost >= COST_INF {
        return COST_INF;
    }
    WALK_ONE_BLOCK_COST * ctx.get_favoring(m.dest.x, m.dest.y, m.dest.z) as f64
}

fn timed_out(m: &Movement) -> bool {
    m.ticks_on_current > CLIMB_TICK_TIMEOUT
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
    if timed_out(m) {
        return Status::Unreachable;
    }
    agent.look(agent.yaw(), -20.0, false);
    agent.set_control(Control::Jump, true);
    if helper.is_at_position(agent, &m.dest, 0.3) {
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
        m.state = MovementState::Moving;
    } else if m.state == MovementState::NotStarted {
        m.state = MovementState::Moving;
    }
    if timed_out(m) {
        return Status::Unreachable;
    }
    agent.set_control(Control::Sneak, true);
    if helper.is_at_position(agent, &m.dest, 0.3) {
        agent.set_control(Control::Sneak, false);
        m.state = MovementState::Finished;
        return Status::Success;
    }
    let _ = ctx;
    Status::Running
}

pub fn tick_mount(
    m: &mut Movement,
    ctx: &CalculationContext,
    agent: &mut dyn HostAgent,
    helper: &mut MovementHelper,
) -> Status {
    if m.state == MovementState::NotStarted {
        m.state = MovementState::Moving;
    }
    if helper.move_toward(agent, &m.dest, 0.25, false, false) {
        m.state = MovementState::Finished;
        return Status::Success;
    }
    let _ = ctx;
    Status::Running
}

pub fn tick_dismount(
    m: &mut Movement,
    ctx: &CalculationContext,
    agent: &mut dyn HostAgent,
    helper: &mut MovementHelper,
) -> Status {
    if m.state == MovementState::NotStarted {
        m.state = MovementState::Moving;
    }
    if helper.move_toward(agent, &m.dest, 0.25, false, false) {
        m.state = MovementState::Finished;
        return Status::Success;
    }
    let _ = ctx;
    Status::Running
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::MovementKind;
    use nav_if::{BoundingBox, HostWorld, Settings};
    use std::collections::HashMap;

    struct LadderWorld;
    impl HostWorld for LadderWorld {
        fn get_block(&self, x: i32, y: i32, z: i32) -> Option<BlockInfo> {
            if x == 0 && z == 0 && (60..=64).contains(&y) {
                Some(BlockInfo::new("ladder", BoundingBox::Other, 0.4))
            } else {
                Some(BlockInfo::air())
            }
        }
        fn entities(&self) -> HashMap<u64, nav_if::host::Entity> {
            HashMap::new()
        }
    }

    #[test]
    fn climb_up_ladder_cost() {
        let world = LadderWorld;
        let ctx = CalculationContext::new(&world, Settings::default());
        let mut m = Movement::new(Cell::new(0, 60, 0), Cell::new(0, 61, 0), MovementKind::ClimbUp);
        let cost = m.calculate_cost(&ctx);
        assert!((cost - LADDER_UP_ONE_COST).abs() < 1e-9);
    }

    #[test]
    fn climb_down_without_climbable_is_infeasible() {
        struct EmptyWorld;
        impl HostWorld for EmptyWorld {
            fn get_block(&self, _x: i32, _y: i32, _z: i32) -> Option<BlockInfo> {
                Some(BlockInfo::air())
            }
            fn entities(&self) -> HashMap<u64, nav_if::host::Entity> {
                HashMap::new()
            }
        }
        let world = EmptyWorld;
        let ctx = CalculationContext::new(&world, Settings::default());
        let mut m = Movement::new(Cell::new(0, 60, 0), Cell::new(0, 59, 0), MovementKind::ClimbDown);
        assert_eq!(m.calculate_cost(&ctx), COST_INF);
    }

    #[test]
    fn climb_timeout_is_unreachable() {
        let world = LadderWorld;
        let ctx = CalculationContext::new(&world, Settings::default());
        let mut m = Movement::new(Cell::new(0, 60, 0), Cell::new(0, 61, 0), MovementKind::ClimbUp);
        m.ticks_on_current = CLIMB_TICK_TIMEOUT + 1;
        m.state = MovementState::Moving;

        struct NeverAgent {
            pos: (f64, f64, f64),
        }
        impl HostAgent for NeverAgent {
            fn position(&self) -> (f64, f64, f64) {
                self.pos
            }
            fn cell(&self) -> Cell {
                Cell::new(0, 60, 0)
            }
            fn on_ground(&self) -> bool {
                false
            }
            fn in_water(&self) -> bool {
                false
            }
            fn velocity(&self) -> (f64, f64, f64) {
                (0.0, 0.0, 0.0)
            }
            fn yaw(&self) -> f64 {
                0.0
            }
            fn pitch(&self) -> f64 {
                0.0
            }
            fn set_control(&mut self, _control: nav_if::host::Control, _active: bool) {}
            fn look(&mut self, _yaw: f64, _pitch: f64, _force: bool) {}
            fn dig(&mut self, _x: i32, _y: i32, _z: i32, _force_look: bool) -> Box<dyn nav_if::host::PendingOp> {
                unimplemented!()
            }
            fn stop_digging(&mut self) {}
            fn place_block(
                &mut self,
                _reference: (i32, i32, i32),
                _face: (i32, i32, i32),
            ) -> Box<dyn nav_if::host::PendingOp> {
                unimplemented!()
            }
            fn equip(&mut self, _item_name: &str, _slot: u32) {}
            fn activate_item(&mut self) {}
            fn activate_block(&mut self, _x: i32, _y: i32, _z: i32) -> Box<dyn nav_if::host::PendingOp> {
                unimplemented!()
            }
            fn inventory_items(&self) -> Vec<nav_if::host::Item> {
                Vec::new()
            }
        }

        let mut agent = NeverAgent { pos: (0.5, 60.5, 0.5) };
        let mut helper = MovementHelper::new();
        let status = tick_up(&mut m, &ctx, &mut agent, &mut helper);
        assert_eq!(status, Status::Unreachable);
    }
}
