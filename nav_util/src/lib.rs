//! # Navigation utility crate.
//!
//! Ambient tooling shared by the navigation core and its host: parameter
//! file loading, logger initialisation, cyclic-module interface, and
//! run-archiving. Mirrors the `util` crate of the rover autonomy stack this
//! workspace is descended from.

/// Generic TOML parameter loading.
pub mod params;

/// Logger initialisation (`log` + `fern`).
pub mod logger;

/// Per-cycle module processing interface.
pub mod module;

/// Run archiving: timestamped session directories for debug artifacts.
pub mod session;
