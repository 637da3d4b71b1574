use crate::app::AppState;
use crate::domain::{format_minutes, Activity, SessionMode};
use crate::ui::styles::{
    border_style, default_style, done_style, hex_to_color, idle_style, paused_style, running_style,
    selected_style, title_style,
};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Playback state of a row, as shown in its badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowState {
    Pending,
    Playing,
    Paused,
    Done,
}

fn row_state(app: &AppState, index: usize, activity: &Activity) -> RowState {
    if activity.completed {
        return RowState::Done;
    }
    if app.mode() == SessionMode::Running && index == app.session.current_index() {
        if app.session.is_running() {
            RowState::Playing
        } else {
            RowState::Paused
        }
    } else {
        RowState::Pending
    }
}

/// Render the planner list
pub fn render_list_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let dark = app.settings.dark_mode;
    let items: Vec<ListItem> = app
        .activities()
        .iter()
        .enumerate()
        .map(|(idx, activity)| {
            let state = row_state(app, idx, activity);
            let checked = app.session.store.is_selected(activity.id);
            let line = create_activity_line(activity, state, checked);
            let style = if idx == app.selected_index {
                selected_style()
            } else {
                default_style(dark)
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let stats = app.stats();
    let selected = app.session.store.selection_len();
    let title = match app.mode() {
        SessionMode::Planning if selected > 0 => format!(" Planner ({} selected) ", selected),
        SessionMode::Planning => format!(" Planner ({} · {}) ", stats.total_activities, format_minutes(stats.total_planned_minutes)),
        SessionMode::Running => format!(" Session {} ", stats.progress_label()),
        SessionMode::Summary => " Session complete ".to_string(),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(dark))
        .title(Span::styled(title, title_style()));

    if items.is_empty() {
        let empty = ratatui::widgets::Paragraph::new(vec![
            Line::raw(""),
            Line::raw("  No activities yet."),
            Line::raw("  Press 'a' to add one, 'p' for a preset or 'i' to import a file."),
        ])
        .style(idle_style())
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    // Keep the cursor row scrolled into view
    let mut state = ListState::default().with_selected(Some(app.selected_index));
    let list = List::new(items).block(block);
    f.render_stateful_widget(list, area, &mut state);
}

/// Format: [x] ■ Deep Work Sprint   25m  ▶ 12:04
fn create_activity_line(activity: &Activity, state: RowState, checked: bool) -> Line<'static> {
    let mut spans = Vec::new();

    spans.push(Span::raw(if checked { "[x] " } else { "[ ] " }));
    spans.push(Span::styled("■ ", Style::default().fg(hex_to_color(&activity.color))));

    let name_style = if state == RowState::Done {
        done_style()
    } else {
        Style::default()
    };
    spans.push(Span::styled(activity.name.clone(), name_style));
    spans.push(Span::raw(format!("  {}m ", activity.duration)));

    match state {
        RowState::Playing => spans.push(Span::styled(
            format!(" ▶ {}", activity.remaining_formatted()),
            running_style(),
        )),
        RowState::Paused => spans.push(Span::styled(
            format!(" ⏸ {}", activity.remaining_formatted()),
            paused_style(),
        )),
        RowState::Done => spans.push(Span::styled(" ✓ done", done_style())),
        RowState::Pending => {}
    }

    Line::from(spans)
}
