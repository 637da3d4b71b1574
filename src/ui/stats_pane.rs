use crate::app::AppState;
use crate::domain::format_minutes;
use crate::ui::styles::{border_style, gauge_style, title_style};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Render the stats cards: tasks, total duration, progress
pub fn render_stats_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let stats = app.stats();

    let gauge = Gauge::default()
        .gauge_style(gauge_style())
        .percent(stats.efficiency_score.min(100) as u16)
        .label(format!("{}%", stats.efficiency_score));

    let lines = vec![
        Line::from(vec![
            Span::styled("Tasks:    ", title_style()),
            Span::raw(stats.total_activities.to_string()),
        ]),
        Line::from(vec![
            Span::styled("Duration: ", title_style()),
            Span::raw(format_minutes(stats.total_planned_minutes)),
        ]),
        Line::from(vec![
            Span::styled("Progress: ", title_style()),
            Span::raw(stats.progress_label()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(app.settings.dark_mode))
        .title(Span::styled(" Stats ", title_style()));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Text lines
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // Gauge
        ])
        .split(block.inner(area));

    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines), chunks[0]);
    f.render_widget(gauge, chunks[2]);
}
