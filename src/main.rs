pub mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use glimpse::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    runtime::{Clock, CrosstermEventSource, FixedTicker, GameEvent, Runner},
    route_for, validate_and_start, GameSession, Level, Route, SessionHandle,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::Duration,
};

use crate::ui::screen::current_screen;

/// Longest name accepted on the name screen
const MAX_NAME_LEN: usize = 24;
/// Lower bound so a bad config cannot spin the event loop
const MIN_TICK_RATE_MS: u64 = 10;

/// glimpse nine cards, then find the number
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A quick memory game: nine numbered cards are shown for a moment, then hidden. Find the card that held the target number before time runs out."
)]
pub struct Cli {
    /// player name; skips the name screen when it is not blank
    #[clap(short = 'n', long)]
    name: Option<String>,

    /// difficulty level (defaults to the level used last time)
    #[clap(short = 'l', long, value_enum)]
    level: Option<Level>,

    /// do not remember level changes between runs
    #[clap(long)]
    no_save: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    NameEntry,
    Game,
}

#[derive(Debug, PartialEq)]
enum Flow {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct App {
    pub state: AppState,
    pub name_input: String,
    /// Blocking message; the next key press only dismisses it
    pub notice: Option<String>,
    pub session: Option<GameSession>,
    pub level: Level,
    pub config: Config,
    store: Option<FileConfigStore>,
}

impl App {
    pub fn new(cli: &Cli, config: Config, store: Option<FileConfigStore>) -> Self {
        let level = cli.level.unwrap_or(config.level);
        let mut app = Self {
            state: AppState::NameEntry,
            name_input: String::new(),
            notice: None,
            session: None,
            level,
            config,
            store,
        };

        match route_for(cli.name.as_deref()) {
            Route::Game(handle) => app.enter_game(handle),
            Route::Launcher => app.state = AppState::NameEntry,
        }
        app
    }

    fn enter_game(&mut self, handle: SessionHandle) {
        self.name_input = handle.player().to_string();
        let mut session = handle.into_session();
        session.set_level(self.level);
        self.session = Some(session);
        self.state = AppState::Game;
    }

    /// Dropping the session releases any running timer
    fn leave_game(&mut self) {
        self.session = None;
        self.state = AppState::NameEntry;
    }

    /// The game view needs a session; without one it falls back to the name screen
    fn ensure_route(&mut self) {
        if self.state == AppState::Game && self.session.is_none() {
            tracing::debug!("game view entered without a session, redirecting");
            self.state = AppState::NameEntry;
        }
    }

    fn submit_name(&mut self) {
        match validate_and_start(&self.name_input) {
            Ok(handle) => self.enter_game(handle),
            Err(err) => self.notice = Some(err.to_string()),
        }
    }

    fn choose_level(&mut self, level: Level) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !session.set_level(level) || self.level == level {
            return;
        }
        self.level = level;
        self.config.level = level;
        if let Some(store) = &self.store {
            if let Err(err) = store.save(&self.config) {
                tracing::warn!(%err, "could not save level");
            }
        }
    }

    pub fn on_tick(&mut self, elapsed: Duration) {
        if let Some(session) = self.session.as_mut() {
            session.advance(elapsed);
        }
    }

    fn on_key(&mut self, key: KeyEvent) -> Flow {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Flow::Quit;
        }
        if self.notice.take().is_some() {
            return Flow::Continue;
        }
        self.ensure_route();

        match self.state {
            AppState::NameEntry => match key.code {
                KeyCode::Esc => return Flow::Quit,
                KeyCode::Enter => self.submit_name(),
                KeyCode::Backspace => {
                    self.name_input.pop();
                }
                KeyCode::Char(c) => {
                    if self.name_input.chars().count() < MAX_NAME_LEN {
                        self.name_input.push(c);
                    }
                }
                _ => {}
            },
            AppState::Game => match key.code {
                KeyCode::Esc => self.leave_game(),
                KeyCode::Enter | KeyCode::Char('s') => {
                    let level = self.level;
                    if let Some(session) = self.session.as_mut() {
                        session.start(level);
                    }
                }
                KeyCode::Char('r') => {
                    if let Some(session) = self.session.as_mut() {
                        session.restart();
                    }
                }
                KeyCode::Char(c) => {
                    if let Some(pos) = ui::grid::position_for_key(c) {
                        if let Some(session) = self.session.as_mut() {
                            session.select_card(pos);
                        }
                    } else if let Some(level) = Level::from_key(c) {
                        self.choose_level(level);
                    }
                }
                _ => {}
            },
        }
        Flow::Continue
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let _log_guard = AppDirs::state_dir().and_then(|dir| logging::init_tracing(&dir));

    let store = FileConfigStore::new();
    let config = store.load();
    let store = (!cli.no_save).then_some(store);
    let mut app = App::new(&cli, config, store);

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let tick_rate = Duration::from_millis(app.config.tick_rate_ms.max(MIN_TICK_RATE_MS));
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::new(tick_rate));
    let mut clock = Clock::start();

    terminal.draw(|f| ui(app, f))?;

    loop {
        let event = runner.step();
        // time is applied before the key, so a timeout that is already due
        // resolves the round ahead of a late pick
        app.on_tick(clock.lap());

        match event {
            GameEvent::Tick | GameEvent::Resize => {}
            GameEvent::Key(key) => {
                if app.on_key(key) == Flow::Quit {
                    break;
                }
            }
        }

        terminal.draw(|f| ui(app, f))?;
    }

    Ok(())
}

fn ui(app: &mut App, f: &mut Frame) {
    app.ensure_route();
    current_screen(&app.state).render(app, f);
}
