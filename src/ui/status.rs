//! Placeholder screens shown before the feed is available

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

/// Splits the screen so content of `height` lines sits in the middle
fn centered_band(area: Rect, height: u16) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(height),
            Constraint::Percentage(45),
        ])
        .split(area);
    chunks[1]
}

/// Renders a loading message while data is being fetched
pub fn render_loading(frame: &mut Frame) {
    let area = centered_band(frame.area(), 3);

    let loading_text = Paragraph::new("Loading, wait please")
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center);

    frame.render_widget(loading_text, area);
}

/// Renders the failure message with the retry hint
pub fn render_error(frame: &mut Frame, message: &str) {
    let area = centered_band(frame.area(), 5);

    let lines = vec![
        Line::from(Span::styled(
            "Could not load the feed",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("r", Style::default().fg(Color::Yellow)),
            Span::raw(" Retry  "),
            Span::styled("q", Style::default().fg(Color::Yellow)),
            Span::raw(" Quit"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}
