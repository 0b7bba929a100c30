//! Error types shared across the core (spec §7 Error Handling Design).
//!
//! Recoverable conditions are carried as [`crate::movement::Status`] values,
//! never as `Result::Err`; these error enums cover the genuinely exceptional
//! paths (malformed input, invariant violations) that the host needs to be
//! able to match on.

use nav_if::Cell;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MovementError {
    #[error("cell {0:?} is outside the loaded world")]
    OutOfBounds(Cell),

    #[error("movement has no valid edges from {0:?} to {1:?}")]
    NoValidPositions(Cell, Cell),
}

#[derive(Debug, Error)]
pub enum HelperError {
    #[error("no reachable reference block to place against near {0:?}")]
    NoPlacementReference(Cell),

    #[error("no scaffold item available to place")]
    NoScaffoldItem,

    #[error("break of {0:?} failed")]
    BreakFailed(Cell),

    #[error("place at {0:?} failed")]
    PlaceFailed(Cell),
}

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("start cell {0:?} is outside the configured pathing range")]
    StartOutOfRange(Cell),

    #[error("goal is unreachable: no path exists from {0:?}")]
    NoPath(Cell),
}

#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error(transparent)]
    Planner(#[from] PlannerError),

    #[error("goal became permanently unreachable after {0} consecutive replans")]
    Fatal(u32),
}
