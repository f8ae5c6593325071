//! Key bindings modal

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const OVERLAY_WIDTH: u16 = 50;

/// Sections of the overlay, each a heading and its `(keys, action)` rows
const BINDINGS: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("↑/k, ↓/j", "Move selection up/down"),
            ("g, G", "Jump to first/last entry"),
            ("q", "Quit, also from this help"),
            ("Esc", "Quit, or close this help"),
        ],
    ),
    (
        "Sorting",
        &[
            ("s, Tab", "Next sort key"),
            ("S, S-Tab", "Previous sort key"),
            ("1", "Newest first"),
            ("2", "Most kudos first"),
            ("3", "Highest level first"),
        ],
    ),
    (
        "Other",
        &[("r", "Retry a failed load"), ("?", "Toggle this help")],
    ),
];

fn lines() -> Vec<Line<'static>> {
    let heading = Style::default().add_modifier(Modifier::BOLD);
    let key = Style::default().fg(Color::Yellow);

    let mut lines = Vec::new();
    for (title, rows) in BINDINGS {
        lines.push(Line::from(Span::styled(*title, heading)));
        lines.extend(rows.iter().map(|(keys, action)| {
            Line::from(vec![
                Span::styled(format!("  {keys:<12}"), key),
                Span::raw(*action),
            ])
        }));
        lines.push(Line::from(""));
    }
    lines.push(Line::styled(
        "Press Esc or ? to close",
        Style::default().fg(Color::DarkGray),
    ));
    lines
}

/// Draws the key bindings over whatever is on screen
pub fn render(frame: &mut Frame) {
    let lines = lines();
    // Content plus the two border rows
    let height = lines.len() as u16 + 2;
    let area = centered(frame.area(), OVERLAY_WIDTH, height);

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        ),
        area,
    );
}

/// `width` x `height` in the middle of `area`, clamped to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
