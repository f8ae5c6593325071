//! Feed list screen rendering
//!
//! Renders the sort selector and the sorted, filtered feed with kudos count,
//! level and local creation time for every entry.

use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs},
    Frame,
};

use crate::app::App;
use crate::feed::SkillLevel;
use crate::loader::LoadSource;
use crate::sort::SortKey;
use crate::view::ItemSummary;

/// Color for a skill level
fn level_color(level: SkillLevel) -> Color {
    match level {
        SkillLevel::Advanced => Color::Red,
        SkillLevel::Medium => Color::Yellow,
        SkillLevel::Newbie => Color::Green,
        SkillLevel::Unknown => Color::Gray,
    }
}

/// Color for the data source indicator
fn source_color(source: LoadSource) -> Color {
    match source {
        LoadSource::Cache => Color::Cyan,
        LoadSource::Network => Color::Green,
        LoadSource::StaleCache => Color::Yellow,
    }
}

/// Renders the feed list screen
pub fn render_feed_list(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Sort selector
            Constraint::Min(3),    // Feed
            Constraint::Length(1), // Help text
        ])
        .split(area);

    render_sort_selector(frame, app, chunks[0]);
    render_list(frame, app, chunks[1]);
    render_help(frame, chunks[2], app);
}

/// Renders the "Sort by" tabs
fn render_sort_selector(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = SortKey::ALL
        .iter()
        .enumerate()
        .map(|(i, key)| Line::from(format!("{} {}", i + 1, key.label())))
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .title(" Sort by ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .select(app.sort_key.index())
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        )
        .divider("│");

    frame.render_widget(tabs, area);
}

/// Renders the feed entries
fn render_list(frame: &mut Frame, app: &App, area: Rect) {
    let visible = app.visible();

    let title = format!(" Workout Feed ({}) ", visible.len());
    let block = Block::default()
        .title(Span::styled(
            title,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    if visible.is_empty() {
        let empty = Paragraph::new("No items to show")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let rows: Vec<ListItem> = visible
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let summary = ItemSummary::from_item(item);
            let is_selected = index == app.selected_index;
            let cursor = if is_selected { "\u{25B8} " } else { "  " }; // ▸ or space

            let kudos_style = if is_selected {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let first = Line::from(vec![
                Span::styled(cursor, Style::default().fg(Color::Cyan)),
                Span::styled(format!("{:<18}", summary.kudos), kudos_style),
                Span::raw(" "),
                Span::styled(
                    summary.level,
                    Style::default().fg(level_color(item.skill_level())),
                ),
            ]);
            let second = Line::from(vec![
                Span::raw("  "),
                Span::styled(summary.created, Style::default().fg(Color::DarkGray)),
            ]);

            ListItem::new(Text::from(vec![first, second]))
        })
        .collect();

    let list = List::new(rows).block(block);
    let mut state = ListState::default().with_selected(Some(app.selected_index));

    frame.render_stateful_widget(list, area, &mut state);
}

/// Renders help text with the data source and freshness
fn render_help(frame: &mut Frame, area: Rect, app: &App) {
    let mut help_spans = vec![
        Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
        Span::raw(" Navigate  "),
        Span::styled("s/Tab", Style::default().fg(Color::Yellow)),
        Span::raw(" Sort  "),
        Span::styled("?", Style::default().fg(Color::Yellow)),
        Span::raw(" Help  "),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(" Quit"),
    ];

    if let Some(source) = app.source {
        help_spans.push(Span::styled(" │ From ", Style::default().fg(Color::DarkGray)));
        help_spans.push(Span::styled(
            source.label(),
            Style::default().fg(source_color(source)),
        ));
    }

    if let Some(loaded_at) = app.loaded_at {
        let mins_ago = (Local::now() - loaded_at).num_minutes();
        let freshness_text = if mins_ago < 1 {
            " just now".to_string()
        } else {
            format!(" {}m ago", mins_ago)
        };
        help_spans.push(Span::styled(
            freshness_text,
            Style::default().fg(Color::DarkGray),
        ));
    }

    let paragraph = Paragraph::new(Line::from(help_spans)).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(paragraph, area);
}
