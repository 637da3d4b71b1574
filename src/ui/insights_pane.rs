use crate::app::AppState;
use crate::ui::styles::{border_style, default_style, title_style};
use ratatui::{
    layout::Rect,
    text::Span,
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the coaching insights pane
pub fn render_insights_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let dark = app.settings.dark_mode;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(dark))
        .title(Span::styled(" ✦ Insights ", title_style()));

    let paragraph = Paragraph::new(app.insights.as_str())
        .style(default_style(dark))
        .block(block)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}
