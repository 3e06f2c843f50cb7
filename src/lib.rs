// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod card;
pub mod config;
pub mod game;
pub mod launcher;
pub mod level;
pub mod logging;
pub mod runtime;
pub mod session;
pub mod timer;

pub use game::GameSession;
pub use launcher::{route_for, validate_and_start, LaunchError, PlayerName, Route, SessionHandle};
pub use level::{level_points, Level};
pub use session::{CardView, Phase, RoundResult, Snapshot};
