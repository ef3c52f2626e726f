//! Per-frame input snapshot.
//!
//! The shell translates raw key events into these flags; the simulation polls
//! them once per frame. Triggers act on the frame whose snapshot carries them.

use glam::Vec2;

use crate::components::ItemKind;

/// Input state for one frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub attack: bool,
    pub feed_cat: bool,
    pub toggle_inventory: bool,
    pub use_item: Option<ItemKind>,
    /// Hovering an inventory slot shows its description; `None` hides it
    pub describe_item: Option<ItemKind>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unit-per-axis direction from the held movement flags. Down beats up
    /// and right beats left when both are held.
    pub fn movement_direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.up {
            dir.y = -1.0;
        }
        if self.down {
            dir.y = 1.0;
        }
        if self.left {
            dir.x = -1.0;
        }
        if self.right {
            dir.x = 1.0;
        }
        dir
    }
}
