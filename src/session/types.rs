//! Session state machine.

use crate::catalog::Character;
use serde::Serialize;

/// Where the session is between player actions.
///
/// `Drawing` only exists while a pull is resolving; callers observe `Idle`
/// or `AwaitingDecision`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub enum SessionPhase {
    #[default]
    Idle,
    Drawing,
    /// Drawn cards waiting for save/sell, `index` is the card on show.
    AwaitingDecision { batch: Vec<Character>, index: usize },
}

impl SessionPhase {
    pub fn is_idle(&self) -> bool {
        matches!(self, SessionPhase::Idle)
    }

    pub fn current(&self) -> Option<&Character> {
        match self {
            SessionPhase::AwaitingDecision { batch, index } => batch.get(*index),
            _ => None,
        }
    }

    /// Cards still waiting for a decision, the current one included.
    pub fn remaining(&self) -> &[Character] {
        match self {
            SessionPhase::AwaitingDecision { batch, index } => {
                batch.get(*index..).unwrap_or(&[])
            }
            _ => &[],
        }
    }
}

/// Drawn card on show plus its position in the batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingDraw {
    pub character: Character,
    pub position: usize,
    pub batch_size: usize,
}
