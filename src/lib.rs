//! Escape Blocks - dodge falling blocks, catch falling coins
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, collisions, scoring, levels)
//! - `game`: Session lifecycle and Menu/Playing/GameOver state machine
//! - `effects`: Timed one-shot presentation effects (explosions, level popups)
//! - `error`: Command rejection errors
//!
//! Rendering, menus and input capture live in the presentation shell that
//! drives [`Game`].

pub mod effects;
pub mod error;
pub mod game;
pub mod sim;

pub use effects::{EffectKind, EffectQueue, TimedEffect};
pub use error::GameError;
pub use game::{Choice, Command, FrameUpdate, FrameView, Game, Phase};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (30 ms cadence)
    pub const SIM_DT: f32 = 0.030;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the accumulator will accept
    pub const MAX_FRAME_TIME: f32 = 0.1;

    /// Play area dimensions
    pub const WIDTH: f32 = 800.0;
    pub const HEIGHT: f32 = 600.0;

    /// Player keeps this distance from every edge
    pub const PLAYER_MARGIN: f32 = 40.0;
    /// Distance moved per directional command
    pub const PLAYER_STEP: f32 = 20.0;
    /// Player spawn height above the bottom edge
    pub const PLAYER_START_OFFSET: f32 = 80.0;

    /// Falling objects spawn at least this far from the side edges
    pub const SPAWN_MARGIN: i32 = 50;

    /// Level 1 fall speed (units per tick)
    pub const BASE_FALL_SPEED: f32 = 6.0;
    /// Coins fall this much slower than blocks
    pub const COIN_SPEED_PENALTY: f32 = 2.0;
    /// Coins never fall slower than this
    pub const MIN_COIN_SPEED: f32 = 1.0;

    pub const STARTING_LIVES: u8 = 3;
    pub const COIN_BONUS: u64 = 5;

    /// Centre distance below which two objects collide
    pub const COLLISION_DISTANCE: f32 = 50.0;

    /// Seconds between coin spawns (level independent)
    pub const COIN_INTERVAL: f64 = 3.0;
    /// Seconds between survival score ticks
    pub const SCORE_INTERVAL: f64 = 1.0;

    /// Background scroll per tick
    pub const SCROLL_SPEED: f32 = 2.0;

    /// Presentation effect lifetimes (seconds)
    pub const EXPLOSION_DURATION: f32 = 0.4;
    pub const LEVEL_POPUP_DURATION: f32 = 1.2;
}

/// Clamp a position so the player stays inside the play area margins
#[inline]
pub fn clamp_to_play_area(pos: Vec2) -> Vec2 {
    use consts::{HEIGHT, PLAYER_MARGIN, WIDTH};
    Vec2::new(
        pos.x.clamp(PLAYER_MARGIN, WIDTH - PLAYER_MARGIN),
        pos.y.clamp(PLAYER_MARGIN, HEIGHT - PLAYER_MARGIN),
    )
}

/// True once an object has fallen past the bottom edge
#[inline]
pub fn below_play_area(pos: Vec2) -> bool {
    pos.y > consts::HEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_to_play_area() {
        assert_eq!(clamp_to_play_area(Vec2::new(0.0, 0.0)), Vec2::new(40.0, 40.0));
        assert_eq!(
            clamp_to_play_area(Vec2::new(1000.0, 1000.0)),
            Vec2::new(760.0, 560.0)
        );
        assert_eq!(
            clamp_to_play_area(Vec2::new(400.0, 300.0)),
            Vec2::new(400.0, 300.0)
        );
    }

    #[test]
    fn test_below_play_area() {
        assert!(!below_play_area(Vec2::new(100.0, 600.0)));
        assert!(below_play_area(Vec2::new(100.0, 600.5)));
    }
}
