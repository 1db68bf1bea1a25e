//! Session lifecycle and the Menu/Playing/GameOver state machine
//!
//! `Game` is the only thing the presentation shell talks to. It owns the
//! current session, runs fixed-step ticks from a frame-time accumulator and
//! turns simulation events into timed presentation effects.

use core::fmt;

use glam::Vec2;
use serde::Serialize;

use crate::consts::*;
use crate::effects::{EffectKind, EffectQueue, TimedEffect};
use crate::error::GameError;
use crate::sim::{Direction, FallingEntity, GameEvent, GameState, tick};

/// Top-level game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    /// Main menu, no session
    Menu,
    /// Session running, ticks advance
    Playing,
    /// Session ended, waiting for restart or menu
    GameOver,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Menu => write!(f, "in the menu"),
            Phase::Playing => write!(f, "playing"),
            Phase::GameOver => write!(f, "game over"),
        }
    }
}

/// Input from the presentation shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Command {
    Move(Direction),
    Start,
    Restart,
    MainMenu,
    Quit,
}

/// Post-game choices offered on the game over screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Choice {
    Restart,
    MainMenu,
}

/// Falling object as the renderer sees it
#[derive(Debug, Clone, Serialize)]
pub struct EntityView {
    pub id: u32,
    pub pos: Vec2,
}

/// Everything the shell needs to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameView {
    pub phase: Phase,
    pub score: u64,
    pub lives: u8,
    pub level: u8,
    pub level_label: String,
    pub player: Option<Vec2>,
    pub blocks: Vec<EntityView>,
    pub coins: Vec<EntityView>,
    pub background: [f32; 2],
    pub effects: Vec<TimedEffect>,
    /// "Your Score: N" once the session is over
    pub game_over_text: Option<String>,
    pub choices: Vec<Choice>,
}

/// What happened during one `Game::update` call
#[derive(Debug, Clone, Default)]
pub struct FrameUpdate {
    /// Simulation events from every tick run this frame
    pub events: Vec<GameEvent>,
    /// Effects of the live session whose display time ran out
    pub expired: Vec<TimedEffect>,
}

/// Game controller
pub struct Game {
    phase: Phase,
    session: Option<GameState>,
    /// Incremented on every new session
    session_id: u64,
    base_seed: u64,
    effects: EffectQueue,
    accumulator: f32,
    quit_requested: bool,
}

impl Game {
    /// Create a controller sitting in the main menu
    pub fn new(base_seed: u64) -> Self {
        Self {
            phase: Phase::Menu,
            session: None,
            session_id: 0,
            base_seed,
            effects: EffectQueue::new(),
            accumulator: 0.0,
            quit_requested: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current (or just-finished) session
    pub fn session(&self) -> Option<&GameState> {
        self.session.as_ref()
    }

    pub fn session_id(&self) -> u64 {
        self.session_id
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Session whose effects are still allowed to surface
    fn live_session(&self) -> Option<u64> {
        self.session.as_ref().map(|_| self.session_id)
    }

    /// Apply a shell command
    pub fn handle(&mut self, command: Command) -> Result<(), GameError> {
        match (self.phase, command) {
            (_, Command::Quit) => {
                self.quit();
                Ok(())
            }
            (Phase::Menu, Command::Start) => {
                self.start();
                Ok(())
            }
            (Phase::GameOver, Command::Start | Command::Restart) => {
                self.restart();
                Ok(())
            }
            (Phase::GameOver, Command::MainMenu) => {
                self.stop();
                Ok(())
            }
            (Phase::Playing, Command::Move(direction)) => {
                if let Some(state) = self.session.as_mut() {
                    state.move_player(direction);
                }
                Ok(())
            }
            (phase, command) => {
                log::warn!("Rejected {:?} while {}", command, phase);
                Err(GameError::InvalidCommand { command, phase })
            }
        }
    }

    /// Begin a new session
    pub fn start(&mut self) {
        self.session_id += 1;
        let seed = self.base_seed.wrapping_add(self.session_id);
        self.session = Some(GameState::new(seed));
        self.accumulator = 0.0;
        self.phase = Phase::Playing;
        log::info!("Session {} started with seed {}", self.session_id, seed);
    }

    /// Throw away the current session and begin another
    pub fn restart(&mut self) {
        log::info!("Restarting after session {}", self.session_id);
        self.start();
    }

    /// Stop ticking and return to the main menu
    pub fn stop(&mut self) {
        self.session = None;
        self.accumulator = 0.0;
        self.phase = Phase::Menu;
        log::info!("Returned to main menu");
    }

    pub fn quit(&mut self) {
        self.quit_requested = true;
        log::info!("Quit requested");
    }

    /// Advance by `elapsed` seconds of wall time.
    ///
    /// Effects count down in every phase; the simulation only steps while
    /// playing. Non-finite or negative frame times count as zero.
    pub fn update(&mut self, elapsed: f32) -> FrameUpdate {
        let elapsed = if elapsed.is_finite() {
            elapsed.clamp(0.0, MAX_FRAME_TIME)
        } else {
            0.0
        };
        let mut frame = FrameUpdate {
            events: Vec::new(),
            expired: self.effects.advance(elapsed, self.live_session()),
        };

        if self.phase != Phase::Playing {
            return frame;
        }

        self.accumulator += elapsed;
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let Some(state) = self.session.as_mut() else {
                break;
            };
            let step_events = tick(state, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            let finished = self.apply_events(&step_events);
            frame.events.extend(step_events);
            if finished {
                break;
            }
        }
        frame
    }

    /// Schedule effects and phase changes for simulation events.
    /// Returns true if the session ended.
    fn apply_events(&mut self, events: &[GameEvent]) -> bool {
        let session = self.session_id;
        let mut finished = false;
        for event in events {
            match event {
                GameEvent::Explosion { pos } => {
                    self.effects
                        .schedule(EffectKind::Explosion { pos: *pos }, session);
                }
                GameEvent::LevelChanged(tier) => {
                    self.effects.schedule(
                        EffectKind::LevelAnnouncement {
                            level: tier.level,
                            text: tier.announcement(),
                        },
                        session,
                    );
                }
                GameEvent::GameOver { .. } => {
                    self.phase = Phase::GameOver;
                    self.accumulator = 0.0;
                    finished = true;
                }
                _ => {}
            }
        }
        finished
    }

    /// Build the render view for the current frame
    pub fn view(&self) -> FrameView {
        let live = self.live_session();
        let effects = self.effects.visible(live).into_iter().cloned().collect();

        let Some(state) = self.session.as_ref() else {
            return FrameView {
                phase: self.phase,
                score: 0,
                lives: 0,
                level: 0,
                level_label: String::new(),
                player: None,
                blocks: Vec::new(),
                coins: Vec::new(),
                background: [0.0, -HEIGHT],
                effects,
                game_over_text: None,
                choices: Vec::new(),
            };
        };

        let entities = |list: &[FallingEntity]| -> Vec<EntityView> {
            list.iter()
                .map(|e| EntityView { id: e.id, pos: e.pos })
                .collect()
        };
        let game_over = self.phase == Phase::GameOver;
        let tier = state.level();

        FrameView {
            phase: self.phase,
            score: state.score,
            lives: state.lives,
            level: tier.level,
            level_label: tier.label(),
            player: Some(state.player.pos),
            blocks: entities(&state.blocks),
            coins: entities(&state.coins),
            background: state.background.offsets,
            effects,
            game_over_text: game_over.then(|| format!("Your Score: {}", state.score)),
            choices: if game_over {
                vec![Choice::Restart, Choice::MainMenu]
            } else {
                Vec::new()
            },
        }
    }
}
