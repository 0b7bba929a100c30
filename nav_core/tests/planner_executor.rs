//! End-to-end planner + executor exercises against scripted worlds (spec §8).

mod common;

use common::{FixtureWorld, ScriptedAgent};
use nav_core::{Cell, CalculationContext, ExecutorTick, Goal, PathExecutor};
use nav_core::planner::PlanOptions;
use nav_if::{BlockInfo, BoundingBox, Settings};
use std::time::Duration;

fn quick_budget() -> PlanOptions {
    PlanOptions {
        time_budget: Duration::from_millis(50),
        failure_budget: Duration::from_millis(50),
        iteration_budget: 5_000,
        ..PlanOptions::default()
    }
}

#[test]
fn executor_walks_a_short_flat_path_to_completion() {
    let world = FixtureWorld::new().with_flat_floor(63);
    let ctx = CalculationContext::new(&world, Settings::default());
    let mut agent = ScriptedAgent::at(0.5, 64.0, 0.5);
    let mut executor = PathExecutor::new(Goal::Block(Cell::new(3, 64, 0)), quick_budget());

    let mut outcome = ExecutorTick::Running;
    for _ in 0..400 {
        outcome = executor.tick(&ctx, &mut agent).unwrap();
        if outcome == ExecutorTick::Done {
            break;
        }
    }
    assert_eq!(outcome, ExecutorTick::Done);
    assert!(!executor.is_fatal());
}

#[test]
fn executor_reaches_a_near_goal_without_exact_coincidence() {
    let world = FixtureWorld::new().with_flat_floor(63);
    let ctx = CalculationContext::new(&world, Settings::default());
    let mut agent = ScriptedAgent::at(0.5, 64.0, 0.5);
    let goal = Goal::Near {
        cell: Cell::new(5, 64, 0),
        range: 2.0,
    };
    let mut executor = PathExecutor::new(goal, quick_budget());

    let mut outcome = ExecutorTick::Running;
    for _ in 0..400 {
        outcome = executor.tick(&ctx, &mut agent).unwrap();
        if outcome == ExecutorTick::Done {
            break;
        }
    }
    assert_eq!(outcome, ExecutorTick::Done);
}

#[test]
fn executor_routes_around_a_bedrock_column_it_cannot_dig_through() {
    // A single-cell bedrock plug directly in the straight-line path, with
    // can_dig off, so only a detour through an adjacent row works.
    let world = FixtureWorld::new()
        .with_flat_floor(63)
        .set(2, 64, 0, BlockInfo::new("bedrock", BoundingBox::Block, -1.0))
        .set(2, 65, 0, BlockInfo::new("bedrock", BoundingBox::Block, -1.0));
    let settings = Settings {
        can_dig: false,
        ..Default::default()
    };
    let ctx = CalculationContext::new(&world, settings);
    let mut agent = ScriptedAgent::at(0.5, 64.0, 0.5);
    let mut executor = PathExecutor::new(Goal::Block(Cell::new(4, 64, 0)), quick_budget());

    let mut outcome = ExecutorTick::Running;
    for _ in 0..2_000 {
        outcome = executor.tick(&ctx, &mut agent).unwrap();
        if outcome == ExecutorTick::Done {
            break;
        }
        if executor.is_fatal() {
            break;
        }
    }
    assert_eq!(outcome, ExecutorTick::Done, "expected a detour around the bedrock wall");
}

#[test]
fn executor_reports_no_path_when_fully_enclosed() {
    let world = FixtureWorld::new()
        .with_flat_floor(63)
        .set(1, 64, 0, BlockInfo::new("bedrock", BoundingBox::Block, -1.0))
        .set(-1, 64, 0, BlockInfo::new("bedrock", BoundingBox::Block, -1.0))
        .set(0, 64, 1, BlockInfo::new("bedrock", BoundingBox::Block, -1.0))
        .set(0, 64, -1, BlockInfo::new("bedrock", BoundingBox::Block, -1.0))
        .set(0, 65, 0, BlockInfo::new("bedrock", BoundingBox::Block, -1.0));
    let settings = Settings {
        can_dig: false,
        allow_parkour: false,
        ..Default::default()
    };
    let ctx = CalculationContext::new(&world, settings);
    let mut agent = ScriptedAgent::at(0.5, 64.0, 0.5);
    let mut executor = PathExecutor::new(Goal::Block(Cell::new(50, 64, 50)), quick_budget());

    let mut saw_no_path = false;
    for _ in 0..20 {
        match executor.tick(&ctx, &mut agent) {
            Ok(ExecutorTick::NoPath) => {
                saw_no_path = true;
                break;
            }
            Ok(ExecutorTick::Done) => panic!("should not be able to reach a goal 50 blocks away from an enclosed cell"),
            Ok(ExecutorTick::Running) => {}
            Err(nav_core::ExecutorError::Fatal(_)) => {
                saw_no_path = true;
                break;
            }
            Err(err) => panic!("unexpected executor error: {err}"),
        }
    }
    assert!(saw_no_path);
}
