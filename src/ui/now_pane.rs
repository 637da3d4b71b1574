use crate::app::AppState;
use crate::domain::SessionMode;
use crate::ui::styles::{border_style, default_style, done_style, hex_to_color, idle_style, paused_style, running_style, title_style};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the current-activity pane: countdown while running, summary at the end
pub fn render_now_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let dark = app.settings.dark_mode;
    let mut lines = Vec::new();

    match app.mode() {
        SessionMode::Planning => {
            lines.push(Line::raw(""));
            if app.activities().is_empty() {
                lines.push(Line::styled("Nothing planned yet", idle_style()));
            } else {
                lines.push(Line::styled("Ready when you are", default_style(dark)));
                lines.push(Line::styled("Press Space to start", idle_style()));
            }
        }
        SessionMode::Running => {
            if let Some(current) = app.session.current_activity() {
                lines.push(Line::from(vec![
                    Span::styled("■ ", Style::default().fg(hex_to_color(&current.color))),
                    Span::styled(current.name.clone(), default_style(dark).add_modifier(Modifier::BOLD)),
                ]));

                let countdown_style = if app.session.is_running() {
                    running_style()
                } else {
                    paused_style()
                };
                lines.push(Line::styled(current.remaining_formatted(), countdown_style));
                lines.push(Line::styled(
                    format!("{:.0}% through", current.progress_ratio() * 100.0),
                    idle_style(),
                ));
                if !app.session.is_running() {
                    lines.push(Line::styled("paused", paused_style()));
                }
            }

            let next = app
                .session
                .next_activity()
                .map(|a| a.name.clone())
                .unwrap_or_else(|| "Finish".to_string());
            lines.push(Line::raw(""));
            lines.push(Line::from(vec![
                Span::styled("Next: ", title_style()),
                Span::raw(next),
            ]));
        }
        SessionMode::Summary => {
            let stats = app.stats();
            lines.push(Line::styled("Session complete ✓", done_style()));
            lines.push(Line::raw(""));
            lines.push(Line::raw(format!("Completed: {}", stats.progress_label())));
            lines.push(Line::raw(format!("Efficiency: {}%", stats.efficiency_score)));
            lines.push(Line::styled("Enter to plan again", idle_style()));
        }
    }

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(dark))
                .title(Span::styled(" Now ", title_style())),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}
