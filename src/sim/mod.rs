//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied elapsed time only, no wall clock
//! - Seeded RNG only
//! - Stable iteration order (entities kept in spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod level;
pub mod state;
pub mod tick;

pub use autopilot::choose_move;
pub use collision::{collides, collides_within};
pub use level::{LevelTier, TIERS, level_for};
pub use state::{Background, Direction, EntityKind, FallingEntity, GameState, Player};
pub use tick::{GameEvent, tick};
