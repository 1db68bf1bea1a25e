//! Session state and core simulation types
//!
//! One `GameState` lives for exactly one play session and is rebuilt on
//! restart.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::level::{LevelTier, level_for};
use crate::clamp_to_play_area;
use crate::consts::*;

/// Directional move command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Position delta for one step (screen coordinates, y grows downward)
    pub fn delta(self) -> Vec2 {
        match self {
            Direction::Left => Vec2::new(-PLAYER_STEP, 0.0),
            Direction::Right => Vec2::new(PLAYER_STEP, 0.0),
            Direction::Up => Vec2::new(0.0, -PLAYER_STEP),
            Direction::Down => Vec2::new(0.0, PLAYER_STEP),
        }
    }
}

/// The player sprite
#[derive(Debug, Clone, Serialize)]
pub struct Player {
    pub pos: Vec2,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(WIDTH / 2.0, HEIGHT - PLAYER_START_OFFSET),
        }
    }
}

impl Player {
    /// Move by `delta`, clamping each axis to the play area
    pub fn move_by(&mut self, delta: Vec2) {
        self.pos = clamp_to_play_area(self.pos + delta);
    }
}

/// Falling object types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntityKind {
    /// Costs a life on contact
    Block,
    /// Worth `COIN_BONUS` on contact
    Coin,
}

/// A falling object
#[derive(Debug, Clone, Serialize)]
pub struct FallingEntity {
    pub id: u32,
    pub kind: EntityKind,
    pub pos: Vec2,
}

impl FallingEntity {
    /// Move down by `speed` units
    pub fn fall(&mut self, speed: f32) {
        self.pos.y += speed;
    }
}

/// Coin fall speed for a given block fall speed, never below `MIN_COIN_SPEED`
pub fn coin_speed_for(fall_speed: f32) -> f32 {
    (fall_speed - COIN_SPEED_PENALTY).max(MIN_COIN_SPEED)
}

/// Two stacked background layers scrolling downward
#[derive(Debug, Clone, Serialize)]
pub struct Background {
    /// Vertical offset of each layer's top edge
    pub offsets: [f32; 2],
}

impl Default for Background {
    fn default() -> Self {
        Self {
            offsets: [0.0, -HEIGHT],
        }
    }
}

impl Background {
    /// Scroll both layers, moving any layer that left the viewport back on top
    pub fn scroll(&mut self, speed: f32) {
        for offset in &mut self.offsets {
            *offset += speed;
        }
        let [first, second] = self.offsets;
        if first >= HEIGHT {
            self.offsets[0] = second - HEIGHT;
        }
        if second >= HEIGHT {
            self.offsets[1] = first - HEIGHT;
        }
    }
}

/// Complete session state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    #[serde(skip)]
    rng: Pcg32,
    pub score: u64,
    pub lives: u8,
    /// Active difficulty tier; only re-evaluated from score
    tier: LevelTier,
    /// False once the session has ended
    pub running: bool,
    /// Seconds of simulated time since the session began
    pub clock: f64,
    pub last_block_spawn: f64,
    pub last_coin_spawn: f64,
    pub last_score_tick: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    /// Live blocks, oldest first
    pub blocks: Vec<FallingEntity>,
    /// Live coins, oldest first
    pub coins: Vec<FallingEntity>,
    pub background: Background,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a fresh session with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            score: 0,
            lives: STARTING_LIVES,
            tier: level_for(0),
            running: true,
            clock: 0.0,
            last_block_spawn: 0.0,
            last_coin_spawn: 0.0,
            last_score_tick: 0.0,
            time_ticks: 0,
            player: Player::default(),
            blocks: Vec::new(),
            coins: Vec::new(),
            background: Background::default(),
            next_id: 1,
        }
    }

    /// Current difficulty tier
    pub fn level(&self) -> LevelTier {
        self.tier
    }

    /// Re-evaluate the tier from the current score.
    /// Returns the new tier if it changed.
    pub fn refresh_level(&mut self) -> Option<LevelTier> {
        let tier = level_for(self.score);
        if tier.level == self.tier.level {
            return None;
        }
        self.tier = tier;
        Some(tier)
    }

    /// Coin fall speed for the current tier
    pub fn coin_speed(&self) -> f32 {
        coin_speed_for(self.tier.fall_speed)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Apply a directional move to the player (ignored once the session ended)
    pub fn move_player(&mut self, direction: Direction) {
        if self.running {
            self.player.move_by(direction.delta());
        }
    }

    /// Random spawn column, always inside the side margins
    fn spawn_x(&mut self) -> f32 {
        let x: i32 = self
            .rng
            .random_range(SPAWN_MARGIN..=WIDTH as i32 - SPAWN_MARGIN);
        x as f32
    }

    /// Spawn a block at the top edge
    pub fn spawn_block(&mut self) -> u32 {
        let id = self.next_entity_id();
        let x = self.spawn_x();
        self.blocks.push(FallingEntity {
            id,
            kind: EntityKind::Block,
            pos: Vec2::new(x, 0.0),
        });
        id
    }

    /// Spawn a coin at the top edge
    pub fn spawn_coin(&mut self) -> u32 {
        let id = self.next_entity_id();
        let x = self.spawn_x();
        self.coins.push(FallingEntity {
            id,
            kind: EntityKind::Coin,
            pos: Vec2::new(x, 0.0),
        });
        id
    }
}
