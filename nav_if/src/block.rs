//! Block and tool description types returned by the host world.

use serde::{Deserialize, Serialize};

/// Coarse collision shape of a block, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundingBox {
    /// A full solid cube occupying the cell.
    Block,
    /// No collision at all (air, signs face-on, etc.).
    Empty,
    /// Partial/irregular collision (slabs, stairs, fences, doors, ladders, ...).
    Other,
}

/// Description of the block occupying a cell, as returned by
/// `HostWorld::get_block`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockInfo {
    pub name: String,
    pub bounding_box: BoundingBox,
    /// Hardness in the host's native units; negative means unbreakable.
    pub hardness: f32,
}

impl BlockInfo {
    pub fn new(name: impl Into<String>, bounding_box: BoundingBox, hardness: f32) -> Self {
        Self {
            name: name.into(),
            bounding_box,
            hardness,
        }
    }

    pub fn air() -> Self {
        Self::new("air", BoundingBox::Empty, 0.0)
    }

    pub fn is_unbreakable(&self) -> bool {
        self.hardness < 0.0
    }
}

/// Reference to a tool item held or available to the agent, as returned by
/// `CalculationContext::get_best_tool`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolRef {
    pub name: String,
    /// Multiplicative speed bonus this tool gives against the target block.
    pub tool_mult: f32,
    /// Efficiency enchantment level, if any.
    pub efficiency_level: u32,
}

impl ToolRef {
    pub fn hand() -> Self {
        Self {
            name: "hand".into(),
            tool_mult: 1.0,
            efficiency_level: 0,
        }
    }
}
