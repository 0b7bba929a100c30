//! Pillar: ascend one block straight up, by ladder/vine or by placement.

use super::{Movement, MovementState, Status};
use crate::context::CalculationContext;
use crate::cost::{COST_INF, JUMP_ONE_BLOCK_COST, LADDER_UP_ONE_COST, PLACE_ONE_BLOCK_COST};
use crate::helper::MovementHelper;
use nav_if::host::Control;
use nav_if::HostAgent;

pub fn calculate_cost(m: &mut Movement, ctx: &CalculationContext) -> f64 {
    let head_clearance = m.src.offset(0, 2, 0);
    let clearance_passable = ctx
        .get_block_at(&head_clearance)
        .map(|b| ctx.can_walk_through(&b))
        .unwrap_or(true);

    let on_climbable = ctx
        .get_block_at(&m.src)
        .map(|b| ctx.is_climbable(&b))
        .unwrap_or(false);

    if on_climbable {
        if !clearance_passable {
            return COST_INF;
        }
        return LADDER_UP_ONE_COST * ctx.get_favoring(m.dest.x, m.dest.y, m.dest.z) as f64;
    }

    if !ctx.can_place() {
        return COST_INF;
    }

    let mut cost = JUMP_ONE_BLOCK_COST + PLACE_ONE_BLOCK_COST + ctx.jump_penalty();

    if !clearance_passable {
        let Some(block) = ctx.get_block_at(&head_clearance) else {
            return COST_INF;
        };
        if !ctx.can_dig() {
            return COST_INF;
        }
        let break_time = ctx.get_break_time(&block);
        if break_time >= COST_INF {
            return COST_INF;
        }
        cost += break_time;
        m.to_break.push(head_clearance);
    }

    m.to_place.push(m.src);

    cost * ctx.get_favoring(m.dest.x, m.dest.y, m.dest.z) as f64
}

pub fn tick(
    m: &mut Movement,
    ctx: &CalculationContext,
    agent: &mut dyn HostAgent,
    helper: &mut MovementHelper,
) -> Status {
    if m.state == MovementState::NotStarted {
        m.state = if !m.to_break.is_empty() {
            MovementState::Breaking
        } else {
            MovementState::Moving
        };
    }

    match m.state {
        MovementState::Breaking => match helper.tick_breaking(&mut m.to_break, ctx, agent) {
            Status::Success => {
                m.state = MovementState::Moving;
                Status::Running
            }
            other => other,
        },
        MovementState::Moving => {
            let on_ground_at_start = agent.on_ground();
            if on_ground_at_start && m.scratch.jump_start_y.is_none() {
                m.scratch.jump_start_y = Some(agent.position().1);
                agent.set_control(Control::Jump, true);
            }

            let (_, py, _) = agent.position();
            if let Some(start_y) = m.scratch.jump_start_y {
                if py > start_y + 0.8 {
                    agent.look(agent.yaw(), 75.0, true);
                    if !m.to_place.is_empty() {
                        m.state = MovementState::Placing;
                        return Status::Running;
                    }
                }
            }

            if agent.on_ground() && py >= m.dest.y as f64 {
                agent.set_control(Control::Jump, false);
                m.state = MovementState::Finished;
                return Status::Success;
            }
            Status::Running
        }
        MovementState::Placing => match helper.tick_placing(&mut m.to_place, ctx, agent) {
            Status::Success => {
                m.state = MovementState::Moving;
                Status::Running
            }
            Status::Failed => Status::Failed,
            other => other,
        },
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

    struct OpenWorld;
    impl HostWorld for OpenWorld {
        fn get_block(&self, _x: i32, _y: i32, _z: i32) -> Option<BlockInfo> {
            Some(BlockInfo::air())
        }
        fn entities(&self) -> HashMap<u64, nav_if::host::Entity> {
            HashMap::new()
        }
    }

    #[test]
    fn pillar_by_placement_cost() {
        let world = OpenWorld;
        let ctx = CalculationContext::new(&world, Settings::default());
        let mut m = Movement::new(Cell::new(0, 64, 0), Cell::new(0, 65, 0), MovementKind::Pillar);
        let cost = m.calculate_cost(&ctx);
        assert!((cost - (JUMP_ONE_BLOCK_COST + PLACE_ONE_BLOCK_COST)).abs() < 1e-9);
        assert_eq!(m.to_place, vec![Cell::new(0, 64, 0)]);
    }

    #[test]
    fn pillar_by_ladder_cost() {
        struct LadderWorld;
        impl HostWorld for LadderWorld {
            fn get_block(&self, x: i32, y: i32, z: i32) -> Option<BlockInfo> {
                if x == 0 && y == 64 && z == 0 {
                    Some(BlockInfo::new("ladder", BoundingBox::Other, 0.4))
                } else {
                    Some(BlockInfo::air())
                }
            }
            fn entities(&self) -> HashMap<u64, nav_if::host::Entity> {
                HashMap::new()
            }
        }
        let world = LadderWorld;
        let ctx = CalculationContext::new(&world, Settings::default());
        let mut m = Movement::new(Cell::new(0, 64, 0), Cell::new(0, 65, 0), MovementKind::Pillar);
        let cost = m.calculate_cost(&ctx);
        assert!((cost - LADDER_UP_ONE_COST).abs() < 1e-9);
    }

    #[test]
    fn pillar_without_place_permission_is_infeasible() {
        let world = OpenWorld;
        let settings = Settings {
            can_place: false,
            ..Default::default()
        };
        let ctx = CalculationContext::new(&world, settings);
        let mut m = Movement::new(Cell::new(0, 64, 0), Cell::new(0, 65, 0), MovementKind::Pillar);
        assert_eq!(m.calculate_cost(&ctx), COST_INF);
    }
}
