use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Difficulty tier chosen before a round starts
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    #[default]
    Medium,
    High,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Low, Level::Medium, Level::High];

    /// How long the cards stay face up before they are hidden
    pub fn memorize_duration(self) -> Duration {
        match self {
            Level::Low => Duration::from_millis(10_000),
            Level::Medium => Duration::from_millis(5_000),
            Level::High => Duration::from_millis(2_000),
        }
    }

    /// Whole seconds the player gets to pick a card once they are hidden
    pub fn recall_secs(self) -> u32 {
        match self {
            Level::Low => 10,
            Level::Medium => 5,
            Level::High => 2,
        }
    }

    pub fn points(self) -> u32 {
        level_points(self)
    }

    /// Maps the level hotkeys used on the game screen
    pub fn from_key(c: char) -> Option<Level> {
        match c.to_ascii_lowercase() {
            'l' => Some(Level::Low),
            'm' => Some(Level::Medium),
            'h' => Some(Level::High),
            _ => None,
        }
    }
}

/// Points awarded for a winning round at `level`
pub fn level_points(level: Level) -> u32 {
    match level {
        Level::Low => 10,
        Level::Medium => 20,
        Level::High => 30,
    }
}
