//! Parkour and ParkourAscend: sprint-jump gaps, level or rising.

use super::{Movement, MovementState, Status};
use crate::context::CalculationContext;
use crate::cost::{COST_INF, JUMP_ONE_BLOCK_COST, SPRINT_ONE_BLOCK_COST, WALK_ONE_BLOCK_COST};
use crate::helper::MovementHelper;
use nav_if::host::Control;
use nav_if::HostAgent;

/// Tick budget for `ParkourAscend` (spec §4.2); failure past this is `Failed`.
const PARKOUR_ASCEND_TICK_BUDGET: u32 = 60;

/// Grace period, in ticks past the jump, before falling back to or below
/// `src.y` is considered a failure.
const PARKOUR_ASCEND_FALLBACK_GRACE: u32 = 10;

pub fn calculate_cost(m: &mut Movement, ctx: &CalculationContext, dist: i32) -> f64 {
    if !ctx.allow_parkour() {
        return COST_INF;
    }
    if !(2..=4).contains(&dist) {
        return COST_INF;
    }
    if dist >= 4 && !ctx.allow_sprint() {
        return COST_INF;
    }

    let floor_solid = ctx
        .get_block_at(&m.dest.offset(0, -1, 0))
        .map(|b| ctx.can_walk_on(&b))
        .unwrap_or(false);
    if !floor_solid {
        return COST_INF;
    }

    let head_clearance = m.src.offset(0, 2, 0);
    let clearance_ok = ctx
        .get_block_at(&head_clearance)
        .map(|b| ctx.can_walk_through(&b))
        .unwrap_or(true);
    if !clearance_ok {
        return COST_INF;
    }

    let base = if dist <= 3 {
        WALK_ONE_BLOCK_COST * dist as f64
    } else {
        SPRINT_ONE_BLOCK_COST * dist as f64
    };

    let cost = base + ctx.jump_penalty();
    cost * ctx.get_favoring(m.dest.x, m.dest.y, m.dest.z) as f64
}

pub fn calculate_ascend_cost(m: &mut Movement, ctx: &CalculationContext) -> f64 {
    if !ctx.allow_parkour() || !ctx.allow_sprint() {
        return COST_INF;
    }

    let dx = m.dest.x - m.src.x;
    let dz = m.dest.z - m.src.z;
    let dist_sq = dx * dx + dz * dz;
    let dist = (dist_sq as f64).sqrt();
    if dist > 3.0 + 1e-6 {
        return COST_INF;
    }

    let gap_exists = {
        let mut found_gap = false;
        let steps = dist.round().max(1.0) as i32;
        for i in 1..steps {
            let cx = m.src.x + dx * i / steps.max(1);
            let cz = m.src.z + dz * i / steps.max(1);
            let column = nav_if::Cell::new(cx, m.src.y - 1, cz);
            let has_floor = ctx
                .get_block_at(&column)
                .map(|b| ctx.can_walk_on(&b))
                .unwrap_or(false);
            if !has_floor {
                found_gap = true;
            }
        }
        found_gap
    };
    if !gap_exists {
        return COST_INF;
    }

    let mid_x = m.src.x + dx / 2;
    let mid_z = m.src.z + dz / 2;
    let midpoint = nav_if::Cell::new(mid_x, m.src.y, mid_z);
    for cell in [midpoint, midpoint.offset(0, 1, 0)] {
        match ctx.get_block_at(&cell) {
            Some(block) if !ctx.can_walk_through(&block) => return COST_INF,
            _ => {}
        }
    }

    let cost = SPRINT_ONE_BLOCK_COST * dist + JUMP_ONE_BLOCK_COST + 1.5 * ctx.jump_penalty();
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

    let (px, _py, pz) = agent.position();
    let src_center = crate::helper::cell_center_xz(&m.src);
    let dist_from_src = ((px - src_center.0).powi(2) + (pz - src_center.1).powi(2)).sqrt();

    agent.set_control(Control::Sprint, ctx.allow_sprint());
    if dist_from_src >= 0.3 && agent.on_ground() {
        agent.set_control(Control::Jump, true);
    }

    if helper.move_toward(agent, &m.dest, 0.4, true, false) && agent.on_ground() {
        agent.set_control(Control::Jump, false);
        m.state = MovementState::Finished;
        return Status::Success;
    }
    Status::Running
}

pub fn tick_ascend(
    m: &mut Movement,
    ctx: &CalculationContext,
    agent: &mut dyn HostAgent,
    helper: &mut MovementHelper,
) -> Status {
    if m.state == MovementState::NotStarted {
        m.state = MovementState::Moving;
        m.scratch.jump_start_y = Some(agent.position().1);
    }

    if m.ticks_on_current > PARKOUR_ASCEND_TICK_BUDGET {
        return Status::Failed;
    }

    let (_, py, _) = agent.position();
    if let Some(start_y) = m.scratch.jump_start_y {
        if py <= start_y && m.ticks_on_current > PARKOUR_ASCEND_FALLBACK_GRACE {
            return Status::Failed;
        }
    }

    agent.set_control(Control::Sprint, true);
    if agent.on_ground() {
        agent.set_control(Control::Jump, true);
    }

    if helper.move_toward(agent, &m.dest, 0.4, true, false)
        && agent.on_ground()
        && py >= m.dest.y as f64
    {
        agent.set_control(Control::Jump, false);
        m.state = MovementState::Finished;
        return Status::Success;
    }
    Status::Running
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
    fn parkour_4_block_without_sprint_is_infeasible() {
        let world = FlatWorld;
        let settings = Settings {
            allow_parkour: true,
            allow_sprint: false,
            ..Default::default()
        };
        let ctx = CalculationContext::new(&world, settings);
        let mut m = Movement::new(Cell::new(0, 64, 0), Cell::new(4, 64, 0), MovementKind::Parkour { dist: 4 });
        assert_eq!(m.calculate_cost(&ctx), COST_INF);
    }

    #[test]
    fn parkour_without_policy_flag_is_infeasible() {
        let world = FlatWorld;
        let settings = Settings {
            allow_parkour: false,
            ..Default::default()
        };
        let ctx = CalculationContext::new(&world, settings);
        let mut m = Movement::new(Cell::new(0, 64, 0), Cell::new(2, 64, 0), MovementKind::Parkour { dist: 2 });
        assert_eq!(m.calculate_cost(&ctx), COST_INF);
    }
}
