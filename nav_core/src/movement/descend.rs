//! Descend: controlled drop of `k >= 1` blocks.

use super::{Movement, MovementState, Status};
use crate::context::CalculationContext;
use crate::cost::{COST_INF, WALK_OFF_BLOCK_COST};
use crate::helper::MovementHelper;
use nav_if::HostAgent;

pub fn calculate_cost(m: &mut Movement, ctx: &CalculationContext, drop: i32) -> f64 {
    if drop < 1 {
        return COST_INF;
    }

    let floor = ctx.get_block_at(&m.dest.offset(0, -1, 0));
    let floor_ok = match floor {
        Some(ref b) => ctx.can_walk_on(b) || ctx.is_water(b),
        None => false,
    };
    if !floor_ok {
        return COST_INF;
    }

    for dy in 1..=drop {
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

    let safe_water = floor.map(|b| ctx.is_water(&b)).unwrap_or(false);
    let cost = WALK_OFF_BLOCK_COST + ctx.fall_cost(drop as i64, safe_water);
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
            helper.move_toward(agent, &m.dest, 0.25, ctx.allow_sprint(), false);
            if !agent.on_ground() {
                m.state = MovementState::Waiting;
            }
            Status::Running
        }
        MovementState::Waiting => {
            helper.move_toward(agent, &m.dest, 0.25, false, false);
            if agent.on_ground() {
                if helper.is_at_position(agent, &m.dest, 0.5) {
                    m.fall_override_active = false;
                    m.state = MovementState::Finished;
                    Status::Success
                } else {
                    Status::Failed
                }
            } else {
                Status::Running
            }
        }
        MovementState::Finished => Status::Success,
        _ => Status::Running,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::MovementKind;
    use nav_if::{BlockInfo, BoundingBox, Cell, HostWorld, Settings};
    use std::collections::HashMap;

    struct PitWorld;
    impl HostWorld for PitWorld {
        fn get_block(&self, _x: i32, y: i32, _z: i32) -> Option<BlockInfo> {
            if y == 60 {
                Some(BlockInfo::new("stone", BoundingBox::Block, 1.5))
            } else {
                Some(BlockInfo::air())
            }
        }
        fn entities(&self) -> HashMap<u64, nav_if::host::Entity> {
            HashMap::new()
        }
    }

    #[test]
    fn descend_one_block_is_feasible() {
        let world = PitWorld;
        let ctx = CalculationContext::new(&world, Settings::default());
        let mut m = Movement::new(Cell::new(0, 62, 0), Cell::new(0, 61, 0), MovementKind::Descend { drop: 1 });
        let cost = m.calculate_cost(&ctx);
        assert!(cost < COST_INF);
        assert!(cost > WALK_OFF_BLOCK_COST);
    }

    #[test]
    fn descend_without_floor_is_infeasible() {
        let world = PitWorld;
        let ctx = CalculationContext::new(&world, Settings::default());
        let mut m = Movement::new(Cell::new(0, 62, 0), Cell::new(0, 58, 0), MovementKind::Descend { drop: 4 });
        assert_eq!(m.calculate_cost(&ctx), COST_INF);
    }
}
