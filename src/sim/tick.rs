//! Simulation tick
//!
//! Core game loop step. Processing order:
//!   1. Clock advance
//!   2. Background scroll
//!   3. Block / coin spawn timers
//!   4. Block motion, despawn and player hits (may end the session)
//!   5. Coin motion, despawn and pickups
//!   6. Survival score tick and level re-evaluation

use glam::Vec2;
use serde::Serialize;

use super::collision::collides;
use super::level::LevelTier;
use super::state::GameState;
use crate::below_play_area;
use crate::consts::*;

/// Something the presentation shell should react to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    BlockSpawned { id: u32, x: f32 },
    CoinSpawned { id: u32, x: f32 },
    /// Block hit the player; show an explosion here
    Explosion { pos: Vec2 },
    /// Remove the most recently added life indicator
    LifeLost { remaining: u8 },
    CoinCollected { id: u32, pos: Vec2, score: u64 },
    ScoreTick { score: u64 },
    LevelChanged(LevelTier),
    GameOver { final_score: u64, level: u8 },
}

/// Advance the session by `dt` seconds
pub fn tick(state: &mut GameState, dt: f32) -> Vec<GameEvent> {
    if !state.running {
        return Vec::new();
    }

    let mut events = Vec::new();
    state.clock += f64::from(dt);
    state.time_ticks += 1;

    state.background.scroll(SCROLL_SPEED);

    spawn_due(state, &mut events);

    if resolve_blocks(state, &mut events) {
        return events;
    }
    resolve_coins(state, &mut events);
    score_tick(state, &mut events);

    events
}

fn spawn_due(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let spawn_interval = f64::from(state.level().spawn_interval);
    if state.clock - state.last_block_spawn > spawn_interval {
        let id = state.spawn_block();
        state.last_block_spawn = state.clock;
        if let Some(block) = state.blocks.last() {
            log::debug!("Block {} spawned at x={}", id, block.pos.x);
            events.push(GameEvent::BlockSpawned { id, x: block.pos.x });
        }
    }

    if state.clock - state.last_coin_spawn > COIN_INTERVAL {
        let id = state.spawn_coin();
        state.last_coin_spawn = state.clock;
        if let Some(coin) = state.coins.last() {
            log::debug!("Coin {} spawned at x={}", id, coin.pos.x);
            events.push(GameEvent::CoinSpawned { id, x: coin.pos.x });
        }
    }
}

/// Move blocks and apply hits. Returns true if the session ended.
fn resolve_blocks(state: &mut GameState, events: &mut Vec<GameEvent>) -> bool {
    let player = state.player.pos;
    let speed = state.level().fall_speed;
    let mut i = 0;
    while i < state.blocks.len() {
        let block = &mut state.blocks[i];
        block.fall(speed);

        if below_play_area(block.pos) {
            state.blocks.remove(i);
            continue;
        }

        if !collides(player, block.pos) {
            i += 1;
            continue;
        }

        let hit = state.blocks.remove(i);
        state.lives = state.lives.saturating_sub(1);
        log::debug!("Block {} hit player, {} lives left", hit.id, state.lives);
        events.push(GameEvent::Explosion { pos: hit.pos });
        events.push(GameEvent::LifeLost {
            remaining: state.lives,
        });

        if state.lives == 0 {
            state.running = false;
            let level = state.level().level;
            log::info!("Game over: score {} at level {}", state.score, level);
            events.push(GameEvent::GameOver {
                final_score: state.score,
                level,
            });
            return true;
        }
    }
    false
}

fn resolve_coins(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let player = state.player.pos;
    let speed = state.coin_speed();
    let mut i = 0;
    while i < state.coins.len() {
        let coin = &mut state.coins[i];
        coin.fall(speed);

        if below_play_area(coin.pos) {
            state.coins.remove(i);
            continue;
        }

        if collides(player, coin.pos) {
            let coin = state.coins.remove(i);
            state.score += COIN_BONUS;
            events.push(GameEvent::CoinCollected {
                id: coin.id,
                pos: coin.pos,
                score: state.score,
            });
            continue;
        }

        i += 1;
    }
}

fn score_tick(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if state.clock - state.last_score_tick < SCORE_INTERVAL {
        return;
    }
    state.score += 1;
    state.last_score_tick = state.clock;
    events.push(GameEvent::ScoreTick { score: state.score });

    if let Some(tier) = state.refresh_level() {
        log::info!("Level up: {} (score {})", tier.label(), state.score);
        events.push(GameEvent::LevelChanged(tier));
    }
}
