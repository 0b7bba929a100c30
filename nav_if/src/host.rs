//! Host world / host agent contracts (spec §6 External Interfaces).
//!
//! The core never blocks a tick waiting on the host: long-running host
//! operations (`dig`, `place_block`, `activate_block`) return a [`PendingOp`]
//! handle that the core polls once per tick via [`PendingOp::poll`]. This is
//! the "(a) poll a pending future each tick" resolution of the open question
//! in spec §9 — chosen over a channel/mailbox because the teacher's stack
//! carries no async runtime dependency anywhere in this crate family, and a
//! hand-rolled poll handle keeps that true here too.

use crate::block::BlockInfo;
use std::collections::HashMap;

/// Control input names accepted by `HostAgent::set_control`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Forward,
    Back,
    Left,
    Right,
    Jump,
    Sneak,
    Sprint,
}

/// Progress of a long-running host operation (dig, place, activate).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpPoll {
    Pending,
    Ready,
    Failed,
}

/// A handle to a long-running host operation, polled once per tick.
pub trait PendingOp: std::fmt::Debug {
    fn poll(&mut self) -> OpPoll;
}

/// An in-world entity, as returned by `HostWorld::entities`.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub name: String,
    pub position: (f64, f64, f64),
    pub height: f64,
    pub is_valid: bool,
    pub username: Option<String>,
}

/// An inventory slot, as returned by `HostAgent::inventory_items`.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub name: String,
    pub count: u32,
    pub slot: u32,
}

/// The read-only world-state surface the core consumes.
///
/// Implemented by the host; the core never mutates the world directly, only
/// through [`HostAgent`]'s control/dig/place operations.
pub trait HostWorld {
    fn get_block(&self, x: i32, y: i32, z: i32) -> Option<BlockInfo>;

    fn entities(&self) -> HashMap<u64, Entity>;
}

/// The agent-control surface the core drives every tick.
pub trait HostAgent {
    fn position(&self) -> (f64, f64, f64);

    fn cell(&self) -> crate::goal::Cell;

    fn on_ground(&self) -> bool;

    fn in_water(&self) -> bool;

    fn velocity(&self) -> (f64, f64, f64);

    fn yaw(&self) -> f64;

    fn pitch(&self) -> f64;

    fn set_control(&mut self, control: Control, active: bool);

    fn look(&mut self, yaw: f64, pitch: f64, force: bool);

    fn dig(&mut self, x: i32, y: i32, z: i32, force_look: bool) -> Box<dyn PendingOp>;

    fn stop_digging(&mut self);

    fn place_block(
        &mut self,
        reference: (i32, i32, i32),
        face: (i32, i32, i32),
    ) -> Box<dyn PendingOp>;

    fn equip(&mut self, item_name: &str, slot: u32);

    fn activate_item(&mut self);

    fn activate_block(&mut self, x: i32, y: i32, z: i32) -> Box<dyn PendingOp>;

    fn inventory_items(&self) -> Vec<Item>;
}
