//! Idle/demo mode steering
//!
//! Picks one directional move per tick: dodge the most dangerous block,
//! otherwise chase the nearest coin, otherwise drift back to the start row.

use glam::Vec2;

use super::state::{Direction, GameState};
use crate::consts::*;

/// Horizontal distance inside which a block counts as a threat
const THREAT_LANE: f32 = COLLISION_DISTANCE + PLAYER_STEP;
/// How far above the player a block is still worth reacting to
const LOOKAHEAD: f32 = 160.0;

/// Choose the next move for the demo player
pub fn choose_move(state: &GameState) -> Option<Direction> {
    let player = state.player.pos;

    // Closest block that is above the player and in its lane
    let threat = state
        .blocks
        .iter()
        .filter(|b| {
            let dy = player.y - b.pos.y;
            (b.pos.x - player.x).abs() < THREAT_LANE && dy > -COLLISION_DISTANCE && dy < LOOKAHEAD
        })
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    if let Some(block) = threat {
        return Some(dodge(player, block.pos));
    }

    let coin = state
        .coins
        .iter()
        .filter(|c| c.pos.y < player.y)
        .min_by(|a, b| {
            a.pos
                .distance_squared(player)
                .total_cmp(&b.pos.distance_squared(player))
        });

    if let Some(coin) = coin {
        let dx = coin.pos.x - player.x;
        if dx.abs() > PLAYER_STEP / 2.0 {
            return Some(if dx < 0.0 {
                Direction::Left
            } else {
                Direction::Right
            });
        }
        return None;
    }

    let home_y = HEIGHT - PLAYER_START_OFFSET;
    if player.y < home_y - PLAYER_STEP / 2.0 {
        return Some(Direction::Down);
    }
    None
}

/// Step sideways away from the block, preferring the side with more room
fn dodge(player: Vec2, block: Vec2) -> Direction {
    let min_x = PLAYER_MARGIN;
    let max_x = WIDTH - PLAYER_MARGIN;
    if player.x <= min_x {
        return Direction::Right;
    }
    if player.x >= max_x {
        return Direction::Left;
    }
    if block.x > player.x {
        Direction::Left
    } else if block.x < player.x {
        Direction::Right
    } else if player.x - min_x > max_x - player.x {
        Direction::Left
    } else {
        Direction::Right
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{EntityKind, FallingEntity};
    use crate::sim::tick;

    fn entity(id: u32, kind: EntityKind, x: f32, y: f32) -> FallingEntity {
        FallingEntity {
            id,
            kind,
            pos: Vec2::new(x, y),
        }
    }

    #[test]
    fn test_dodges_block_overhead() {
        let mut state = GameState::new(1);
        state.blocks.push(entity(1, EntityKind::Block, 410.0, 450.0));
        assert_eq!(choose_move(&state), Some(Direction::Left));

        state.blocks[0].pos.x = 390.0;
        assert_eq!(choose_move(&state), Some(Direction::Right));
    }

    #[test]
    fn test_dodge_at_wall_moves_inward() {
        let mut state = GameState::new(1);
        state.player.pos.x = PLAYER_MARGIN;
        state.blocks.push(entity(1, EntityKind::Block, 30.0, 450.0));
        assert_eq!(choose_move(&state), Some(Direction::Right));
    }

    #[test]
    fn test_chases_coin_when_safe() {
        let mut state = GameState::new(1);
        state.coins.push(entity(1, EntityKind::Coin, 600.0, 100.0));
        assert_eq!(choose_move(&state), Some(Direction::Right));
    }

    #[test]
    fn test_ignores_far_blocks() {
        let mut state = GameState::new(1);
        state.blocks.push(entity(1, EntityKind::Block, 400.0, 10.0));
        assert_eq!(choose_move(&state), None);
    }

    #[test]
    fn test_autopilot_run_is_reproducible() {
        let run = || {
            let mut state = GameState::new(2024);
            for _ in 0..3000 {
                if let Some(dir) = choose_move(&state) {
                    state.move_player(dir);
                }
                tick(&mut state, SIM_DT);
            }
            (state.score, state.lives, state.time_ticks, state.player.pos)
        };
        assert_eq!(run(), run());
    }
}
