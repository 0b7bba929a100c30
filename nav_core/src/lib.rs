//! # Navigation core library.
//!
//! Implements the block-graph cost model, the movement edge catalog, the
//! weighted A* planner, and the tick-driven path executor that together
//! form the pathfinding and movement-execution core of a voxel-world
//! autonomous agent.
//!
//! This crate owns no wire protocol and no on-disk format: the host embeds
//! it, implements [`nav_if::HostWorld`]/[`nav_if::HostAgent`], and drives
//! [`executor::PathExecutor::tick`] once per simulation tick.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

/// Tick-denominated cost constants and the pre-tabulated fall cost table (C1).
pub mod cost;

/// Read-only world+policy snapshot consumed by cost checks (C3).
pub mod context;

/// Per-cell cooldown registry used to steer the planner and executor away
/// from recently-failed destinations (spec §7).
pub mod blacklist;

/// The movement edge catalog (C4).
pub mod movement;

/// Serialized break/place sub-operations and move/look primitives (C5).
pub mod helper;

/// The weighted A* planner (C6).
pub mod planner;

/// The path executor, replan loop, and fall override subsystem (C7, C8).
pub mod executor;

/// Ticked control-intent and look-angle smoothing (C9).
pub mod input;

/// Error types shared across the core.
pub mod error;

pub use blacklist::Blacklist;
pub use context::CalculationContext;
pub use error::{ExecutorError, HelperError, MovementError, PlannerError};
pub use executor::{ExecutorTick, PathExecutor};
pub use input::{ControlState, InputHelper, PartialControl, RotationHelper, SprintGate};
pub use movement::{Movement, MovementKind, Status};
pub use nav_if::{BlockInfo, BoundingBox, Cell, Goal, Settings, ToolRef};
pub use planner::Planner;
