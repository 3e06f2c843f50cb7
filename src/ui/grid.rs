use ratatui::layout::{Constraint, Direction, Layout, Rect};

use glimpse::CardView;

pub const COLUMNS: u16 = 3;
pub const CARD_WIDTH: u16 = 9;
pub const CARD_HEIGHT: u16 = 3;
const GAP: u16 = 1;

/// Rect of `width` x `height` centered in `area`, clipped to it
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Areas for the nine cards, row-major
pub fn card_areas(area: Rect) -> Vec<Rect> {
    let board = centered(
        area,
        CARD_WIDTH * COLUMNS + GAP * (COLUMNS - 1),
        CARD_HEIGHT * COLUMNS,
    );

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, COLUMNS as u32); COLUMNS as usize])
        .split(board);

    rows.iter()
        .flat_map(|row| {
            Layout::default()
                .direction(Direction::Horizontal)
                .spacing(GAP)
                .constraints([Constraint::Ratio(1, COLUMNS as u32); COLUMNS as usize])
                .split(*row)
                .to_vec()
        })
        .collect()
}

/// Keys 1-9 pick the card at that grid position
pub fn position_for_key(c: char) -> Option<usize> {
    match c.to_digit(10) {
        Some(d @ 1..=9) => Some(d as usize - 1),
        _ => None,
    }
}

pub fn card_label(card: &CardView) -> String {
    match card.value {
        Some(v) => v.to_string(),
        None => "?".to_string(),
    }
}
