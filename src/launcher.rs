use serde::Serialize;
use thiserror::Error;

use crate::game::GameSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LaunchError {
    #[error("Please enter a valid name.")]
    EmptyName,
}

/// A player name that is known to contain something other than whitespace.
/// The text is kept exactly as entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PlayerName(String);

impl PlayerName {
    pub fn parse(raw: &str) -> Result<Self, LaunchError> {
        if raw.trim().is_empty() {
            return Err(LaunchError::EmptyName);
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Proof that a name passed validation; turns into a fresh session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionHandle {
    player: PlayerName,
}

impl SessionHandle {
    pub fn player(&self) -> &PlayerName {
        &self.player
    }

    pub fn into_session(self) -> GameSession {
        GameSession::new(self.player)
    }
}

pub fn validate_and_start(name: &str) -> Result<SessionHandle, LaunchError> {
    let player = PlayerName::parse(name).inspect_err(|_| {
        tracing::debug!("rejected blank player name");
    })?;
    tracing::info!(player = %player, "player name accepted");
    Ok(SessionHandle { player })
}

/// Where the front-end should be when the game view is requested
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Launcher,
    Game(SessionHandle),
}

/// The game view checks the name again on entry and falls back to the
/// launcher when it is missing or blank.
pub fn route_for(name: Option<&str>) -> Route {
    match name.map(validate_and_start) {
        Some(Ok(handle)) => Route::Game(handle),
        _ => Route::Launcher,
    }
}
