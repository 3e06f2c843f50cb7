pub mod grid;
pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use glimpse::{card::CardOutcome, Phase, Snapshot};

use crate::{App, AppState};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;
const NAME_INPUT_WIDTH: u16 = 30;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match (&self.state, &self.session) {
            (AppState::Game, Some(session)) => render_game(&session.snapshot(), area, buf),
            _ => render_name_entry(self, area, buf),
        }

        if let Some(notice) = &self.notice {
            render_notice(notice, area, buf);
        }
    }
}

/// Bordered input box on the name screen
pub fn name_input_area(area: Rect) -> Rect {
    grid::centered(area, NAME_INPUT_WIDTH, 3)
}

fn render_name_entry(app: &App, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let input = name_input_area(area);

    let title = Paragraph::new(Span::styled(
        "glimpse",
        Style::default().patch(bold_style).fg(Color::Magenta),
    ))
    .alignment(Alignment::Center);
    title.render(
        Rect::new(area.x, input.y.saturating_sub(4), area.width, 1),
        buf,
    );

    let prompt = Paragraph::new(Span::styled("Enter your name", bold_style))
        .alignment(Alignment::Center);
    prompt.render(
        Rect::new(area.x, input.y.saturating_sub(2), area.width, 1),
        buf,
    );

    Paragraph::new(app.name_input.as_str())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .render(input, buf);

    let legend = Paragraph::new(Span::styled("(enter) play / (esc)ape", italic_style))
        .alignment(Alignment::Center);
    let legend_y = (input.bottom() + 1).min(area.bottom().saturating_sub(1));
    legend.render(Rect::new(area.x, legend_y, area.width, 1), buf);
}

fn render_game(snapshot: &Snapshot, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_bold_style = Style::default()
        .patch(bold_style)
        .add_modifier(Modifier::DIM);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1), // player / level / score
            Constraint::Length(1), // padding
            Constraint::Length(1), // phase status
            Constraint::Min(grid::CARD_HEIGHT * grid::COLUMNS),
            Constraint::Length(2), // result message
            Constraint::Length(1), // legend
        ])
        .split(area);

    let header = Paragraph::new(Line::from(vec![
        Span::styled(snapshot.player.to_string(), bold_style),
        Span::raw("   level: "),
        Span::styled(snapshot.level.to_string(), bold_style),
        Span::raw("   score: "),
        Span::styled(snapshot.score.to_string(), bold_style),
    ]))
    .alignment(Alignment::Center);
    header.render(chunks[0], buf);

    status_line(snapshot)
        .alignment(Alignment::Center)
        .render(chunks[2], buf);

    for (card, card_area) in snapshot.cards.iter().zip(grid::card_areas(chunks[3])) {
        let style = match card.outcome {
            CardOutcome::Correct => Style::default().patch(bold_style).fg(Color::Green),
            CardOutcome::Incorrect => Style::default().patch(bold_style).fg(Color::Red),
            CardOutcome::Neutral if card.interactive => bold_style.fg(Color::Cyan),
            CardOutcome::Neutral if card.visible() => bold_style,
            CardOutcome::Neutral => dim_bold_style,
        };

        Paragraph::new(Span::styled(grid::card_label(card), style))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(style),
            )
            .render(card_area, buf);
    }

    if snapshot.phase == Phase::Resolved {
        let won = snapshot
            .cards
            .iter()
            .any(|c| c.outcome == CardOutcome::Correct);
        let color = if won { Color::Green } else { Color::Red };
        Paragraph::new(Span::styled(
            snapshot.result_message.as_str(),
            Style::default().patch(bold_style).fg(color),
        ))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[4], buf);
    }

    let legend = match snapshot.phase {
        Phase::Idle | Phase::Resolved => {
            "(s)tart / (l)ow (m)edium (h)igh / (esc) change player"
        }
        Phase::Memorizing => "(s) new cards / (r)eset / (esc) change player",
        Phase::Recalling => "(1-9) pick a card / (r)eset / (esc) change player",
    };
    Paragraph::new(Span::styled(legend, italic_style)).render(chunks[5], buf);
}

fn status_line(snapshot: &Snapshot) -> Paragraph<'static> {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let yellow_bold_style = Style::default().patch(bold_style).fg(Color::Yellow);

    let line = match (snapshot.phase, snapshot.target) {
        (Phase::Idle, _) => Line::from(Span::styled("Press (s) to start", bold_style)),
        (Phase::Memorizing, _) => {
            Line::from(Span::styled("Memorize the cards!", yellow_bold_style))
        }
        (Phase::Recalling, Some(target)) => Line::from(vec![
            Span::styled(format!("Find the number {target}"), yellow_bold_style),
            Span::raw("   "),
            Span::styled(
                format!("{}s left", snapshot.seconds_remaining),
                Style::default()
                    .patch(bold_style)
                    .add_modifier(Modifier::DIM),
            ),
        ]),
        (Phase::Resolved, Some(target)) => {
            Line::from(Span::styled(format!("The number was {target}"), bold_style))
        }
        (_, None) => Line::default(),
    };

    Paragraph::new(line)
}

/// Modal box over whatever is on screen; cleared by the next key press
fn render_notice(message: &str, area: Rect, buf: &mut Buffer) {
    let width = (message.chars().count() as u16 + 6).max(24);
    let popup = grid::centered(area, width, 5);

    Clear.render(popup, buf);
    Paragraph::new(vec![
        Line::from(Span::styled(
            message.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "press any key",
            Style::default().add_modifier(Modifier::ITALIC),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .title(" notice ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    )
    .render(popup, buf);
}
