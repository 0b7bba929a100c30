//! # Navigation interface crate.
//!
//! Provides all common interfaces shared between the navigation core and the
//! host that embeds it: the world/agent contracts of the external interface,
//! the block and tool description types, and the operator-facing settings.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Cell and goal types used to describe plan endpoints.
pub mod goal;

/// Block, tool and bounding-box description types returned by the host world.
pub mod block;

/// Host world / host agent contracts (§6 External Interfaces).
pub mod host;

/// Operator-facing settings, loaded by the host and handed to the core.
pub mod settings;

pub use block::{BlockInfo, BoundingBox, ToolRef};
pub use goal::{Cell, Goal};
pub use host::{Entity, HostAgent, HostWorld};
pub use settings::Settings;
