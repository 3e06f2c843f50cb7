use ratatui::{layout::Position, Frame};
use unicode_width::UnicodeWidthStr;

use crate::{ui::name_input_area, App, AppState};

/// A UI Screen boundary: responsible for rendering the current app state
pub trait Screen {
    fn render(&self, app: &mut App, f: &mut Frame);
}

/// Name screen - renders the prompt and places the terminal cursor in the input
pub struct NameEntryScreen;

impl Screen for NameEntryScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        f.render_widget(&*app, f.area());

        if app.notice.is_none() {
            let input = name_input_area(f.area());
            let typed = app.name_input.width() as u16;
            let x = (input.x + 1 + typed).min(input.right().saturating_sub(2));
            f.set_cursor_position(Position::new(x, input.y + 1));
        }
    }
}

/// Game screen - renders the board using the App widget
pub struct GameScreen;

impl Screen for GameScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        f.render_widget(&*app, f.area());
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: &AppState) -> Box<dyn Screen> {
    match state {
        AppState::NameEntry => Box::new(NameEntryScreen),
        AppState::Game => Box::new(GameScreen),
    }
}
