//! Game constants organized by domain.
//!
//! Centralizing magic numbers makes tuning easier and documents intent.
//! Constants are split into submodules by domain for easier navigation.

mod enemies;
mod gameplay;
mod geometry;
mod items;
mod time;

pub use enemies::*;
pub use gameplay::*;
pub use geometry::*;
pub use items::*;
pub use time::*;
