//! Traverse: same-Y horizontal step of one block.

use super::{Movement, MovementState, Status};
use crate::context::CalculationContext;
use crate::cost::{self, COST_INF, PLACE_ONE_BLOCK_COST, SPRINT_MULTIPLIER, WALK_ONE_BLOCK_COST};
use crate::helper::MovementHelper;
use nav_if::HostAgent;

pub fn calculate_cost(m: &mut Movement, ctx: &CalculationContext) -> f64 {
    let dx = m.dest.x - m.src.x;
    let dz = m.dest.z - m.src.z;

    let dest_body = m.dest;
    let dest_head = m.dest.offset(0, 1, 0);

    let mut obstacle_cost = 0.0;
    for cell in [dest_body, dest_head] {
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

    let mut base = match ctx.get_block_at(&dest_body) {
        Some(block) => cost::get_terrain_cost(WALK_ONE_BLOCK_COST, &block.name),
        None => WALK_ONE_BLOCK_COST,
    };

    let floor = ctx.get_block_at(&m.dest.offset(0, -1, 0));
    let floor_solid = floor.as_ref().map(ctx_can_walk_on(ctx)).unwrap_or(false);

    if !floor_solid {
        if !ctx.can_place() {
            return COST_INF;
        }
        m.to_place.push(m.dest.offset(0, -1, 0));
        base += PLACE_ONE_BLOCK_COST;

        let (perp_a, perp_b) = lateral_neighbors(m.src, dx, dz);
        let lacks_floor = |c: nav_if::Cell| {
            !ctx
                .get_block_at(&c.offset(0, -1, 0))
                .map(ctx_can_walk_on(ctx))
                .unwrap_or(false)
        };
        if lacks_floor(perp_a) && lacks_floor(perp_b) {
            base += cost::BACKPLACE_ADDITIONAL_PENALTY;
        }
    }

    let dest_is_water = ctx
        .get_block_at(&dest_body)
        .map(|b| ctx.is_water(&b))
        .unwrap_or(false);

    if obstacle_cost == 0.0 && ctx.allow_sprint() && !dest_is_water {
        base *= SPRINT_MULTIPLIER;
    }

    let total = base + obstacle_cost;
    total * ctx.get_favoring(m.dest.x, m.dest.y, m.dest.z) as f64
}

fn ctx_can_walk_on<'a>(
    ctx: &'a CalculationContext,
) -> impl Fn(&nav_if::BlockInfo) -> bool + 'a {
    move |b| ctx.can_walk_on(b)
}

fn lateral_neighbors(src: nav_if::Cell, dx: i32, dz: i32) -> (nav_if::Cell, nav_if::Cell) {
    if dx != 0 {
        (src.offset(0, 0, 1), src.offset(0, 0, -1))
    } else {
        let _ = dz;
        (src.offset(1, 0, 0), src.offset(-1, 0, 0))
    }
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
            let sprint = ctx.allow_sprint() && m.to_break.is_empty();
            if helper.move_toward(agent, &m.dest, 0.25, sprint, false) {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::MovementKind;
    use nav_if::{BlockInfo, BoundingBox, Cell, HostWorld, Settings};
    use std::collections::HashMap;

    struct FlatWorld;
    impl HostWorld for FlatWorld {
        fn get_block(&self, _x: i32, y: i32, _z: i32) -> Option<BlockInfo> {
            if y == 63 {
                Some(BlockInfo::new("grass_block", BoundingBox::Block, 0.6))
            } else {
                Some(BlockInfo::air())
            }
        }
        fn entities(&self) -> HashMap<u64, nav_if::host::Entity> {
            HashMap::new()
        }
    }

    #[test]
    fn walk_one_block_sprint_allowed() {
        let world = FlatWorld;
        let settings = Settings {
            allow_sprint: true,
            ..Default::default()
        };
        let ctx = CalculationContext::new(&world, settings);
        let mut m = Movement::new(Cell::new(0, 64, 0), Cell::new(1, 64, 0), MovementKind::Traverse);
        let cost = m.calculate_cost(&ctx);
        assert!((cost - 3.564).abs() < 0.01, "cost was {cost}");
        assert!(m.to_break.is_empty());
        assert!(m.to_place.is_empty());
    }

    #[test]
    fn traverse_onto_gap_no_place_is_infeasible() {
        struct GapWorld;
        impl HostWorld for GapWorld {
            fn get_block(&self, x: i32, y: i32, _z: i32) -> Option<BlockInfo> {
                if y == 63 && x == 0 {
                    Some(BlockInfo::new("grass_block", BoundingBox::Block, 0.6))
                } else {
                    Some(BlockInfo::air())
                }
            }
            fn entities(&self) -> HashMap<u64, nav_if::host::Entity> {
                HashMap::new()
            }
        }
        let world = GapWorld;
        let settings = Settings {
            can_place: false,
            ..Default::default()
        };
        let ctx = CalculationContext::new(&world, settings);
        let mut m = Movement::new(Cell::new(0, 64, 0), Cell::new(1, 64, 0), MovementKind::Traverse);
        assert_eq!(m.calculate_cost(&ctx), COST_INF);
    }

    #[test]
    fn traverse_onto_gap_place_allowed() {
        struct GapWorld;
        impl HostWorld for GapWorld {
            fn get_block(&self, x: i32, y: i32, _z: i32) -> Option<BlockInfo> {
                if y == 63 && x == 0 {
                    Some(BlockInfo::new("grass_block", BoundingBox::Block, 0.6))
                } else {
                    Some(BlockInfo::air())
                }
            }
            fn entities(&self) -> HashMap<u64, nav_if::host::Entity> {
                HashMap::new()
            }
        }
        let world = GapWorld;
        let settings = Settings {
            can_place: true,
            allow_sprint: true,
            ..Default::default()
        };
        let ctx = CalculationContext::new(&world, settings);
        let mut m = Movement::new(Cell::new(0, 64, 0), Cell::new(1, 64, 0), MovementKind::Traverse);
        let cost = m.calculate_cost(&ctx);
        assert!((cost - (WALK_ONE_BLOCK_COST + PLACE_ONE_BLOCK_COST)).abs() < 0.01);
        assert_eq!(m.to_place, vec![Cell::new(1, 63, 0)]);
    }
}
