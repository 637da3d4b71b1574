use crate::app::AppState;
use crate::domain::UiMode;
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the input form for adding or editing an activity
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(form) = &app.input_form {
        let modal_area = create_modal_area(area);

        // Clear the area behind the form
        f.render_widget(Clear, modal_area);

        let title_text = if app.ui_mode == UiMode::EditingActivity {
            " Edit Activity "
        } else {
            " Add Activity "
        };

        let field = |label: &'static str, value: &str, active: bool| -> Vec<Line<'static>> {
            vec![
                Line::raw(if active { format!("{} (editing)", label) } else { label.to_string() }),
                Line::from(vec![
                    Span::raw("> "),
                    Span::styled(value.to_string(), modal_title_style()),
                    if active {
                        Span::styled("█", modal_title_style()) // Cursor
                    } else {
                        Span::raw("")
                    },
                ]),
                Line::raw(""),
            ]
        };

        let mut lines = vec![Line::raw("")];
        lines.extend(field("Name:", &form.name, form.editing_field == 0));
        lines.extend(field("Duration (minutes):", &form.duration, form.editing_field == 1));

        if form.editing_id.is_some() {
            lines.push(Line::raw("Changing the duration restarts its countdown."));
            lines.push(Line::raw(""));
        }

        // Instructions
        lines.push(Line::raw("Tab to switch fields  ·  Enter to submit  ·  Esc to cancel"));

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(title_text, modal_title_style()))
                    .style(modal_bg_style(app.settings.dark_mode)),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}
