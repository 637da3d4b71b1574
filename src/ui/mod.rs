pub mod clock_pane;
pub mod input_form;
pub mod insights_pane;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod modal;
pub mod now_pane;
pub mod stats_pane;
pub mod styles;

use crate::app::AppState;
use crate::domain::{SessionMode, UiMode};
use clock_pane::render_clock_pane;
use input_form::render_input_form;
use insights_pane::render_insights_pane;
use keybindings::render_keybindings;
use layout::create_layout;
use list_pane::render_list_pane;
use modal::{
    render_confirm_delete_modal, render_settings_modal, render_summary_modal, render_template_picker,
    render_text_prompt,
};
use now_pane::render_now_pane;
use ratatui::{
    layout::Rect,
    text::Span,
    widgets::{Block, Paragraph},
    Frame,
};
use stats_pane::render_stats_pane;
use styles::{background_style, hint_style, notice_style};

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);

    f.render_widget(Block::default().style(background_style(app.settings.dark_mode)), size);

    // Render keybindings bar
    render_keybindings(f, app.mode(), layout.keybindings_area);

    // Render panes
    render_list_pane(f, app, layout.list_area);
    render_clock_pane(f, app, layout.clock_area);
    render_now_pane(f, app, layout.now_area);
    render_stats_pane(f, app, layout.stats_area);
    render_insights_pane(f, app, layout.insights_area);
    render_status_line(f, app, layout.status_area);

    // Render the active modal, if any
    match app.ui_mode {
        UiMode::AddingActivity | UiMode::EditingActivity => render_input_form(f, app, size),
        UiMode::ConfirmDelete => render_confirm_delete_modal(f, app, size),
        UiMode::SavingTemplate | UiMode::ImportPrompt => render_text_prompt(f, app, size),
        UiMode::TemplatePicker => render_template_picker(f, app, size),
        UiMode::Settings => render_settings_modal(f, app, size),
        UiMode::Normal if app.mode() == SessionMode::Summary => render_summary_modal(f, app, size),
        UiMode::Normal => {}
    }
}

/// Import progress, errors and other one-line notices
fn render_status_line(f: &mut Frame, app: &AppState, area: Rect) {
    let span = match &app.status_message {
        Some(message) if app.is_importing => Span::styled(format!(" ⟳ {}", message), hint_style()),
        Some(message) => Span::styled(format!(" {}", message), notice_style()),
        None => Span::styled(format!(" {}", app.store.path().display()), hint_style()),
    };
    f.render_widget(Paragraph::new(span), area);
}
