//! # Path Executor & Replan Loop (C7), Fall Override Subsystem (C8).
//!
//! Drives the current [`Movement`] edge every tick, replans on a fixed
//! interval or on edge failure, and lets an airborne agent fast-forward
//! straight into a compatible next edge instead of re-pathing mid-fall.

use crate::blacklist::Blacklist;
use crate::context::CalculationContext;
use crate::error::{ExecutorError, PlannerError};
use crate::helper::MovementHelper;
use crate::movement::{Movement, Status};
use crate::planner::{PlanOptions, Planner};
use nav_if::{Cell, Goal, HostAgent};

/// Ticks between forced replans, even without an edge failure (spec §4,
/// control-flow summary).
pub const REPLAN_INTERVAL_TICKS: u32 = 20;

/// Consecutive replan failures after which the executor reports the goal as
/// permanently unreachable (spec §7).
const MAX_CONSECUTIVE_FAILURES: u32 = 5;

/// Result of ticking the executor once.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExecutorTick {
    /// Still working the current plan.
    Running,
    /// The goal has been reached.
    Done,
    /// No path to the goal could be found at all (not a timeout best-so-far,
    /// an actually-empty plan from the start cell).
    NoPath,
}

/// Drives a planned path to completion, replanning as needed.
pub struct PathExecutor {
    goal: Goal,
    planner: Planner,
    plan_options: PlanOptions,
    blacklist: Blacklist,
    helper: MovementHelper,

    path: Vec<Movement>,
    cursor: usize,
    ticks_since_replan: u32,
    consecutive_failures: u32,
}

impl PathExecutor {
    pub fn new(goal: Goal, plan_options: PlanOptions) -> Self {
        Self {
            goal,
            planner: Planner::new(),
            plan_options,
            blacklist: Blacklist::new(),
            helper: MovementHelper::new(),
            path: Vec::new(),
            cursor: 0,
            ticks_since_replan: 0,
            consecutive_failures: 0,
        }
    }

    pub fn blacklist(&self) -> &Blacklist {
        &self.blacklist
    }

    /// Cancels execution: stops in-flight sub-ops, clears control state, and
    /// drops the current plan (spec §5 resource-cleanup guarantee).
    pub fn stop(&mut self, agent: &mut dyn HostAgent) {
        self.helper.clear(agent);
        self.path.clear();
        self.cursor = 0;
    }

    fn current(&mut self) -> Option<&mut Movement> {
        self.path.get_mut(self.cursor)
    }

    fn replan(&mut self, ctx: &CalculationContext, start: Cell) -> Result<(), PlannerError> {
        let result = self
            .planner
            .plan(ctx, &self.blacklist, start, &self.goal, self.plan_options)?;

        if result.edges.is_empty() && !self.goal.is_end(&start) {
            return Err(PlannerError::NoPath(start));
        }

        self.path = result
            .edges
            .into_iter()
            .map(|e| Movement::new(e.src, e.dest, e.kind))
            .collect();
        self.cursor = 0;
        self.ticks_since_replan = 0;
        Ok(())
    }

    /// Advances execution by one simulation tick. The host is expected to
    /// call this once per tick, passing a fresh [`CalculationContext`] built
    /// from the current world snapshot.
    pub fn tick(
        &mut self,
        ctx: &CalculationContext,
        agent: &mut dyn HostAgent,
    ) -> Result<ExecutorTick, ExecutorError> {
        self.blacklist.tick();

        let start = agent.cell();
        if self.goal.is_end(&start) {
            self.stop(agent);
            return Ok(ExecutorTick::Done);
        }

        let needs_replan = self.path.is_empty()
            || self.cursor >= self.path.len()
            || self.ticks_since_replan >= REPLAN_INTERVAL_TICKS;

        if needs_replan {
            match self.replan(ctx, start) {
                Ok(()) => {
                    self.consecutive_failures = 0;
                }
                Err(PlannerError::NoPath(_)) if self.path.is_empty() => {
                    self.consecutive_failures += 1;
                    if self.is_fatal() {
                        return Err(ExecutorError::Fatal(self.consecutive_failures));
                    }
                    return Ok(ExecutorTick::NoPath);
                }
                Err(err) => {
                    self.consecutive_failures += 1;
                    if self.is_fatal() {
                        return Err(ExecutorError::Fatal(self.consecutive_failures));
                    }
                    return Err(ExecutorError::Planner(err));
                }
            }
        }
        self.ticks_since_replan += 1;

        self.maybe_apply_fall_override(agent);

        let status = match self.current() {
            Some(movement) => movement.tick(ctx, agent, &mut self.helper),
            None => return Ok(ExecutorTick::NoPath),
        };

        match status {
            Status::Success => {
                self.helper.clear(agent);
                self.cursor += 1;
                if self.cursor >= self.path.len() {
                    if self.goal.is_end(&agent.cell()) {
                        self.stop(agent);
                        return Ok(ExecutorTick::Done);
                    }
                    self.ticks_since_replan = REPLAN_INTERVAL_TICKS;
                }
                Ok(ExecutorTick::Running)
            }
            Status::Failed => {
                self.on_edge_failure(agent, false);
                if self.is_fatal() {
                    return Err(ExecutorError::Fatal(self.consecutive_failures));
                }
                Ok(ExecutorTick::Running)
            }
            Status::Unreachable => {
                self.on_edge_failure(agent, true);
                if self.is_fatal() {
                    return Err(ExecutorError::Fatal(self.consecutive_failures));
                }
                Ok(ExecutorTick::Running)
            }
            Status::Prepping | Status::Running | Status::Waiting => Ok(ExecutorTick::Running),
        }
    }

    fn on_edge_failure(&mut self, agent: &mut dyn HostAgent, long_cooldown: bool) {
        if let Some(movement) = self.current() {
            let dest = movement.dest;
            if long_cooldown {
                self.blacklist.add_long(dest);
            } else {
                self.blacklist.add_short(dest);
            }
        }
        self.helper.clear(agent);
        self.path.clear();
        self.cursor = 0;
        self.ticks_since_replan = REPLAN_INTERVAL_TICKS;
        self.consecutive_failures += 1;
    }

    /// Whether the executor should treat the goal as permanently lost,
    /// after repeated consecutive replan failures.
    pub fn is_fatal(&self) -> bool {
        self.consecutive_failures >= MAX_CONSECUTIVE_FAILURES
    }

    /// Fall override subsystem (C8): if the agent is airborne mid-edge and
    /// the *next* edge in the plan accepts a fall override, skip straight
    /// into it rather than waiting for the current edge to resolve.
    fn maybe_apply_fall_override(&mut self, agent: &dyn HostAgent) {
        if agent.on_ground() {
            return;
        }
        let Some(current_index) = (self.cursor < self.path.len()).then_some(self.cursor) else {
            return;
        };
        let current_finished = matches!(
            self.path[current_index].state,
            crate::movement::MovementState::Finished
        );
        if !current_finished {
            return;
        }
        let Some(next) = self.path.get_mut(current_index + 1) else {
            return;
        };
        if next.can_accept_fall_override && !next.fall_override_active {
            next.fall_override_active = true;
            self.cursor = current_index + 1;
        }
    }
}
