use serde::Serialize;

use crate::card::CardOutcome;
use crate::launcher::PlayerName;
use crate::level::Level;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Memorizing,
    Recalling,
    Resolved,
}

impl Phase {
    /// A round is running while its timers may still fire
    pub fn in_round(self) -> bool {
        matches!(self, Phase::Memorizing | Phase::Recalling)
    }
}

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum RoundResult {
    Won { points: u32 },
    WrongCard { picked: u8 },
    TimedOut,
}

impl RoundResult {
    pub fn message(&self) -> String {
        match self {
            RoundResult::Won { points } => {
                format!("You win {points} points. Press start to play again.")
            }
            RoundResult::WrongCard { .. } => {
                "You have failed. Press start to play again.".to_string()
            }
            RoundResult::TimedOut => {
                "You didn't press in time. Press start to play again.".to_string()
            }
        }
    }

    pub fn is_win(&self) -> bool {
        matches!(self, RoundResult::Won { .. })
    }
}

/// What the renderer may know about a card. Hidden cards carry no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub value: Option<u8>,
    pub outcome: CardOutcome,
    pub interactive: bool,
}

impl CardView {
    pub fn visible(&self) -> bool {
        self.value.is_some()
    }
}

/// Read-only view of a game session handed to the rendering layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub player: PlayerName,
    pub level: Level,
    pub phase: Phase,
    pub cards: Vec<CardView>,
    /// Withheld while the cards are being memorized
    pub target: Option<u8>,
    pub seconds_remaining: u32,
    pub score: u32,
    pub result_message: String,
}

impl Snapshot {
    pub fn target_visible(&self) -> bool {
        self.target.is_some()
    }
}
