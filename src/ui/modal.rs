use crate::app::{AppState, SettingsRow};
use crate::domain::{builtin_presets, format_minutes, SoundKey, UiMode};
use crate::ui::{
    layout::{create_modal_area, create_modal_area_with_height},
    styles::{modal_bg_style, modal_title_style, selected_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Draw `lines` in a cleared, titled modal box
fn render_box(f: &mut Frame, app: &AppState, modal_area: Rect, title: &str, lines: Vec<Line>) {
    f.render_widget(Clear, modal_area);

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(format!(" {} ", title), modal_title_style()))
                .style(modal_bg_style(app.settings.dark_mode)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

fn key_hint(key: &str, label: &str) -> Vec<Span<'static>> {
    vec![
        Span::styled(format!("[{}]", key), modal_title_style()),
        Span::raw(format!(" {}  ", label)),
    ]
}

/// Render the delete confirmation modal
pub fn render_confirm_delete_modal(f: &mut Frame, app: &AppState, area: Rect) {
    let count = app.pending_delete.len();
    let message = if count == 1 {
        let name = app
            .pending_delete
            .first()
            .and_then(|id| app.session.store.find(*id))
            .map(|a| a.name.clone())
            .unwrap_or_default();
        format!("  Delete \"{}\"?", name)
    } else {
        format!("  Delete {} activities?", count)
    };

    let mut hints = key_hint("y", "Delete");
    hints.extend(key_hint("n", "Keep"));

    let lines = vec![
        Line::raw(""),
        Line::raw(message),
        Line::raw(""),
        Line::raw("  This cannot be undone."),
        Line::raw(""),
        Line::from(hints),
    ];
    render_box(f, app, create_modal_area_with_height(area, 9), "Confirm Delete", lines);
}

/// Render a one-line text prompt (template name, import path)
pub fn render_text_prompt(f: &mut Frame, app: &AppState, area: Rect) {
    let (title, label, help) = match app.ui_mode {
        UiMode::SavingTemplate => (
            "Save as Template",
            "Template name:",
            "Saves the current list as a reusable template.",
        ),
        _ => (
            "Import Activities",
            "Path to a document or image:",
            "Tasks and estimated durations are extracted and appended.",
        ),
    };

    let lines = vec![
        Line::raw(""),
        Line::raw(label),
        Line::from(vec![
            Span::raw("> "),
            Span::styled(app.text_input.clone(), modal_title_style()),
            Span::styled("█", modal_title_style()), // Cursor
        ]),
        Line::raw(""),
        Line::raw(help),
        Line::raw(""),
        Line::raw("Enter to confirm  ·  Esc to cancel"),
    ];
    render_box(f, app, create_modal_area_with_height(area, 10), title, lines);
}

/// Render the template picker (built-ins first, then custom templates)
pub fn render_template_picker(f: &mut Frame, app: &AppState, area: Rect) {
    let builtin_count = builtin_presets().len();
    let mut lines = vec![Line::raw("")];

    for (idx, preset) in app.all_templates().iter().enumerate() {
        if idx == builtin_count {
            lines.push(Line::raw(""));
            lines.push(Line::styled("  Your templates", modal_title_style()));
        }

        let text = format!(
            "  {} {}  ({} · {})",
            preset.icon,
            preset.name,
            preset.activities.len(),
            format_minutes(preset.total_minutes())
        );
        if idx == app.template_cursor {
            lines.push(Line::styled(text, selected_style()));
            if !preset.description.is_empty() {
                lines.push(Line::raw(format!("      {}", preset.description)));
            }
        } else {
            lines.push(Line::raw(text));
        }
    }

    lines.push(Line::raw(""));
    let mut hints = key_hint("Enter", "Load");
    hints.extend(key_hint("d", "Delete custom"));
    hints.extend(key_hint("Esc", "Close"));
    lines.push(Line::from(hints));

    let height = (lines.len() as u16 + 2).max(10);
    render_box(f, app, create_modal_area_with_height(area, height), "Templates", lines);
}

/// Render the settings modal
pub fn render_settings_modal(f: &mut Frame, app: &AppState, area: Rect) {
    let settings = &app.settings;
    let on_off = |value: bool| if value { "On" } else { "Off" };

    let mut lines = vec![Line::raw("")];
    for (idx, row) in SettingsRow::all().iter().enumerate() {
        let text = match row {
            SettingsRow::Sound => format!(
                "  Alert sound        {}",
                SoundKey::all()
                    .iter()
                    .map(|s| if *s == settings.sound { format!("[{}]", s.key()) } else { s.key().to_string() })
                    .collect::<Vec<_>>()
                    .join(" ")
            ),
            SettingsRow::Volume => format!("  Volume             ‹ {:.0}% ›", settings.volume * 100.0),
            SettingsRow::BreakDuration => format!("  Break length       ‹ {}m ›", settings.break_duration),
            SettingsRow::ConfirmDelete => format!("  Confirm deletes    ‹ {} ›", on_off(settings.confirm_delete)),
            SettingsRow::DarkMode => format!("  Dark mode          ‹ {} ›", on_off(settings.dark_mode)),
        };
        if idx == app.settings_cursor {
            lines.push(Line::styled(text, selected_style()));
        } else {
            lines.push(Line::raw(text));
        }
    }

    lines.push(Line::raw(""));
    let mut hints = key_hint("←/→", "Change");
    hints.extend(key_hint("s", "Preview"));
    hints.extend(key_hint("Esc", "Close"));
    lines.push(Line::from(hints));

    render_box(f, app, create_modal_area_with_height(area, 11), "Settings", lines);
}

/// Render the end-of-session summary
pub fn render_summary_modal(f: &mut Frame, app: &AppState, area: Rect) {
    let stats = app.stats();

    let lines = vec![
        Line::raw(""),
        Line::raw("  Session complete. Nice work!"),
        Line::raw(""),
        Line::raw(format!(
            "  Completed {} of {} activities",
            stats.completed_activities, stats.total_activities
        )),
        Line::raw(format!("  Planned time: {}", format_minutes(stats.total_planned_minutes))),
        Line::raw(format!("  Efficiency: {}%", stats.efficiency_score)),
        Line::raw(""),
        Line::from({
            let mut hints = key_hint("Enter", "Plan again");
            hints.extend(key_hint("q", "Quit"));
            hints
        }),
    ];
    render_box(f, app, create_modal_area(area), "Summary", lines);
}
