//! Errors for shell commands that the current game phase rejects

use core::fmt;

use crate::game::{Command, Phase};

#[derive(Clone, Debug, PartialEq)]
pub enum GameError {
    /// Command has no meaning in the current phase
    InvalidCommand { command: Command, phase: Phase },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCommand { command, phase } => {
                write!(f, "command {command:?} is not valid while {phase}")
            }
        }
    }
}

impl std::error::Error for GameError {}
