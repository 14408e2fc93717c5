/// Zombie shooter simulation core.
///
/// Everything in this crate is terminal-agnostic: the binary feeds it input
/// snapshots and surface sizes, and reads the resulting `GameState` back out
/// for drawing.

pub mod combat;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod input;
pub mod level;
pub mod movement;
pub mod placement;
