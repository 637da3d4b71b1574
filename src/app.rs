use crate::ai::{AiRequest, AiResponse, AiWorker, EMPTY_LIST_INSIGHT};
use crate::alerts::{self, AlertPlayer, ALERT_DURATION, PREVIEW_DURATION};
use crate::domain::{
    builtin_presets, clamp_duration, reduce, Activity, ActivityPatch, ActivityStore, Preset, Session,
    SessionAction, SessionEffect, SessionMode, SessionStats, UiMode,
};
use crate::persistence::{
    load_activities, load_templates, read_bytes, save_activities, save_templates, KvStore, Settings,
};
use crate::ticker::{Ticker, SECOND};
use anyhow::Result;
use chrono::{DateTime, Local};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Volume change per keypress in the settings modal
pub const VOLUME_STEP: f32 = 0.1;

/// Input form state for adding or editing an activity
#[derive(Debug, Clone)]
pub struct InputFormState {
    pub name: String,
    pub duration: String,
    pub editing_field: usize, // 0 = name, 1 = duration
    /// Activity being edited (None when adding)
    pub editing_id: Option<Uuid>,
}

/// Rows of the settings modal, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsRow {
    Sound,
    Volume,
    BreakDuration,
    ConfirmDelete,
    DarkMode,
}

impl SettingsRow {
    pub fn all() -> &'static [SettingsRow] {
        &[
            SettingsRow::Sound,
            SettingsRow::Volume,
            SettingsRow::BreakDuration,
            SettingsRow::ConfirmDelete,
            SettingsRow::DarkMode,
        ]
    }
}

/// Main application state
pub struct AppState {
    pub session: Session,
    pub settings: Settings,
    pub custom_templates: Vec<Preset>,
    pub store: KvStore,

    pub selected_index: usize,
    pub ui_mode: UiMode,
    pub input_form: Option<InputFormState>,
    pub pending_delete: Vec<Uuid>,
    pub text_input: String, // Template name or import path
    pub template_cursor: usize,
    pub settings_cursor: usize,

    pub insights: String,
    insights_key: Option<(usize, SessionMode)>,
    pub status_message: Option<String>,
    pub is_importing: bool,

    pub needs_save: bool,
    pub now: DateTime<Local>,
    tick_driver: Ticker,
    clock_driver: Ticker,
    alerts: AlertPlayer,
    ai: Option<AiWorker>,
}

impl AppState {
    pub fn new(
        activities: Vec<Activity>,
        settings: Settings,
        custom_templates: Vec<Preset>,
        store: KvStore,
        ai: Option<AiWorker>,
    ) -> Self {
        let mut clock_driver = Ticker::new(SECOND);
        clock_driver.start(Instant::now());

        Self {
            session: Session::new(ActivityStore::new(activities)),
            settings,
            custom_templates,
            store,
            selected_index: 0,
            ui_mode: UiMode::Normal,
            input_form: None,
            pending_delete: Vec::new(),
            text_input: String::new(),
            template_cursor: 0,
            settings_cursor: 0,
            insights: EMPTY_LIST_INSIGHT.to_string(),
            insights_key: None,
            status_message: None,
            is_importing: false,
            needs_save: false,
            now: Local::now(),
            tick_driver: Ticker::new(SECOND),
            clock_driver,
            alerts: AlertPlayer::new(),
            ai,
        }
    }

    /// Build the app from persisted state, falling back to defaults
    pub fn from_store(store: KvStore, prefers_dark: bool, ai: Option<AiWorker>) -> Self {
        let settings = Settings::load(&store, prefers_dark);
        let activities = load_activities(&store);
        let templates = load_templates(&store);
        info!(
            activities = activities.len(),
            templates = templates.len(),
            "app: loaded state"
        );
        Self::new(activities, settings, templates, store, ai)
    }

    pub fn activities(&self) -> &[Activity] {
        self.session.store.activities()
    }

    pub fn mode(&self) -> SessionMode {
        self.session.mode()
    }

    fn is_planning(&self) -> bool {
        self.session.mode() == SessionMode::Planning
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats::compute(self.activities())
    }

    /// Built-in presets followed by custom templates (picker order)
    pub fn all_templates(&self) -> Vec<Preset> {
        let mut all = builtin_presets();
        all.extend(self.custom_templates.iter().cloned());
        all
    }

    pub fn get_selected_activity(&self) -> Option<&Activity> {
        self.session.store.get(self.selected_index)
    }

    // Session transitions

    /// Single entry point for session transitions
    pub fn dispatch(&mut self, action: SessionAction) {
        let mutates_list = matches!(action, SessionAction::LoadActivities(_));
        let effects = reduce(&mut self.session, action);

        for effect in effects {
            match effect {
                SessionEffect::PlayAlert => {
                    self.alerts
                        .play(self.settings.sound, self.settings.volume, ALERT_DURATION);
                }
                SessionEffect::ActivityCompleted { id } => {
                    debug!(%id, "app: activity completed");
                }
                SessionEffect::SessionFinished => {
                    let stats = self.stats();
                    info!(completed = stats.completed_activities, "app: session finished");
                    alerts::notify_session_finished(stats.completed_activities);
                }
            }
        }

        if mutates_list {
            self.clamp_selection();
            self.needs_save = true;
        }
        self.sync_tick_driver(Instant::now());
    }

    /// Keep the tick driver alive exactly while the session is counting down
    fn sync_tick_driver(&mut self, now: Instant) {
        self.tick_driver.sync(self.session.is_ticking(), now);
    }

    /// Start in planning mode, pause/resume while running
    pub fn start_or_toggle(&mut self) {
        match self.mode() {
            SessionMode::Planning => self.dispatch(SessionAction::Start),
            SessionMode::Running => self.dispatch(SessionAction::TogglePause),
            SessionMode::Summary => {}
        }
    }

    pub fn skip(&mut self) {
        self.dispatch(SessionAction::Skip);
    }

    pub fn reset_session(&mut self) {
        self.dispatch(SessionAction::Reset);
    }

    /// Drive timers, audio and background results; called every loop iteration
    pub fn tick(&mut self, now: Instant) {
        for _ in 0..self.tick_driver.poll(now) {
            self.dispatch(SessionAction::Tick);
            if !self.session.is_ticking() {
                break;
            }
        }

        if self.clock_driver.poll(now) > 0 {
            self.now = Local::now();
        }

        self.alerts.tick(now);
        self.drain_ai_responses();
        self.request_insights_if_stale();
    }

    pub fn is_tick_driver_active(&self) -> bool {
        self.tick_driver.is_active()
    }

    /// Stop every timer and sound (teardown)
    pub fn shutdown(&mut self) {
        self.tick_driver.stop();
        self.clock_driver.stop();
        self.alerts.stop();
    }

    // Planner list

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.session.store.len() {
            self.selected_index += 1;
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.session.store.len();
        if len == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= len {
            self.selected_index = len - 1;
        }
    }

    /// Move the selected activity one slot up (planning only)
    pub fn move_item_up(&mut self) {
        if !self.is_planning() || self.selected_index == 0 {
            return;
        }
        let from = self.selected_index;
        self.session.store.reorder(from, from - 1);
        self.selected_index -= 1;
        self.needs_save = true;
    }

    /// Move the selected activity one slot down (planning only)
    pub fn move_item_down(&mut self) {
        if !self.is_planning() || self.selected_index + 1 >= self.session.store.len() {
            return;
        }
        let from = self.selected_index;
        self.session.store.reorder(from, from + 1);
        self.selected_index += 1;
        self.needs_save = true;
    }

    pub fn add_activity(&mut self, name: &str, duration: u32) {
        if !self.is_planning() {
            return;
        }
        self.session.store.add(name, duration);
        self.selected_index = self.session.store.len() - 1;
        self.needs_save = true;
    }

    /// Append a default activity without opening the form
    pub fn add_default_activity(&mut self) {
        if !self.is_planning() {
            return;
        }
        self.session.store.add_default();
        self.selected_index = self.session.store.len() - 1;
        self.needs_save = true;
    }

    pub fn add_break(&mut self) {
        if !self.is_planning() {
            return;
        }
        self.session.store.add_break(self.settings.break_duration);
        self.selected_index = self.session.store.len() - 1;
        self.needs_save = true;
    }

    pub fn update_activity(&mut self, id: Uuid, patch: ActivityPatch) {
        if !self.is_planning() {
            return;
        }
        self.session.store.update(id, patch);
        self.needs_save = true;
    }

    pub fn toggle_select_current(&mut self) {
        if let Some(id) = self.get_selected_activity().map(|a| a.id) {
            self.session.store.toggle_select(id);
        }
    }

    pub fn toggle_select_all(&mut self) {
        self.session.store.toggle_select_all();
    }

    // Deletion

    /// Ask to delete the checked activities, or the one under the cursor when none are checked
    pub fn request_delete(&mut self) {
        if !self.is_planning() {
            return;
        }
        let mut ids = self.session.store.selected_ids();
        if ids.is_empty() {
            if let Some(activity) = self.get_selected_activity() {
                ids.push(activity.id);
            }
        }
        if ids.is_empty() {
            return;
        }

        if self.settings.confirm_delete {
            self.pending_delete = ids;
            self.ui_mode = UiMode::ConfirmDelete;
        } else {
            self.delete_activities(&ids);
        }
    }

    pub fn confirm_delete(&mut self) {
        let ids = std::mem::take(&mut self.pending_delete);
        self.delete_activities(&ids);
        self.ui_mode = UiMode::Normal;
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete.clear();
        self.ui_mode = UiMode::Normal;
    }

    fn delete_activities(&mut self, ids: &[Uuid]) {
        self.session.store.remove(ids);
        self.clamp_selection();
        self.needs_save = true;
    }

    // Add/edit form

    pub fn start_add_activity(&mut self) {
        if !self.is_planning() {
            return;
        }
        self.input_form = Some(InputFormState {
            name: crate::domain::activity::DEFAULT_ACTIVITY_NAME.to_string(),
            duration: crate::domain::activity::DEFAULT_ACTIVITY_MINUTES.to_string(),
            editing_field: 0,
            editing_id: None,
        });
        self.ui_mode = UiMode::AddingActivity;
    }

    pub fn start_edit_activity(&mut self) {
        if !self.is_planning() {
            return;
        }
        let Some(activity) = self.get_selected_activity() else {
            return;
        };
        self.input_form = Some(InputFormState {
            name: activity.name.clone(),
            duration: activity.duration.to_string(),
            editing_field: 0,
            editing_id: Some(activity.id),
        });
        self.ui_mode = UiMode::EditingActivity;
    }

    pub fn input_form_toggle_field(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.editing_field = (form.editing_field + 1) % 2;
        }
    }

    pub fn input_form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.input_form {
            match form.editing_field {
                0 => form.name.push(c),
                _ if c.is_ascii_digit() || (c == '-' && form.duration.is_empty()) => {
                    form.duration.push(c)
                }
                _ => {}
            }
        }
    }

    pub fn input_form_backspace(&mut self) {
        if let Some(form) = &mut self.input_form {
            match form.editing_field {
                0 => form.name.pop(),
                _ => form.duration.pop(),
            };
        }
    }

    pub fn submit_input_form(&mut self) {
        let Some(form) = self.input_form.take() else {
            return;
        };
        self.ui_mode = UiMode::Normal;

        let name = form.name.trim();
        if name.is_empty() {
            return;
        }
        // Invalid numbers clamp into range instead of being rejected
        let duration = clamp_duration(parse_minutes(&form.duration));

        match form.editing_id {
            Some(id) => {
                let unchanged_duration = self
                    .session
                    .store
                    .find(id)
                    .is_some_and(|a| a.duration == duration);
                let mut patch = ActivityPatch::name(name);
                if !unchanged_duration {
                    patch.duration = Some(duration);
                }
                self.update_activity(id, patch);
            }
            None => self.add_activity(name, duration),
        }
    }

    pub fn cancel_input_form(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }

    // Single-line text input (template name, import path)

    pub fn text_input_add_char(&mut self, c: char) {
        self.text_input.push(c);
    }

    pub fn text_input_backspace(&mut self) {
        self.text_input.pop();
    }

    pub fn cancel_text_input(&mut self) {
        self.text_input.clear();
        self.ui_mode = UiMode::Normal;
    }

    // Templates

    pub fn start_save_template(&mut self) {
        if self.session.store.is_empty() {
            self.status_message = Some("Add activities before saving a template".to_string());
            return;
        }
        self.text_input.clear();
        self.ui_mode = UiMode::SavingTemplate;
    }

    /// Save the current list as a custom template (newest first)
    pub fn save_current_as_template(&mut self) {
        let name = self.text_input.trim().to_string();
        if name.is_empty() {
            return;
        }
        let template = Preset::from_activities(&name, self.activities());
        self.custom_templates.insert(0, template);
        self.text_input.clear();
        self.ui_mode = UiMode::Normal;
        self.status_message = Some(format!("Saved template \"{}\"", name));
        self.needs_save = true;
    }

    pub fn open_template_picker(&mut self) {
        self.template_cursor = 0;
        self.ui_mode = UiMode::TemplatePicker;
    }

    pub fn template_cursor_up(&mut self) {
        self.template_cursor = self.template_cursor.saturating_sub(1);
    }

    pub fn template_cursor_down(&mut self) {
        let count = builtin_presets().len() + self.custom_templates.len();
        if self.template_cursor + 1 < count {
            self.template_cursor += 1;
        }
    }

    /// Replace the session's list with the template under the cursor
    pub fn load_selected_template(&mut self) {
        let templates = self.all_templates();
        if let Some(preset) = templates.get(self.template_cursor) {
            info!(name = %preset.name, "app: loading template");
            self.dispatch(SessionAction::LoadActivities(preset.instantiate()));
            self.selected_index = 0;
        }
        self.ui_mode = UiMode::Normal;
    }

    /// Delete the custom template under the cursor; built-ins are kept
    pub fn delete_selected_template(&mut self) {
        let builtin_count = builtin_presets().len();
        if self.template_cursor < builtin_count {
            return;
        }
        let index = self.template_cursor - builtin_count;
        if let Some(id) = self.custom_templates.get(index).and_then(|t| t.id) {
            self.custom_templates.retain(|t| t.id != Some(id));
            self.needs_save = true;
        }
        let count = builtin_count + self.custom_templates.len();
        if self.template_cursor >= count {
            self.template_cursor = count.saturating_sub(1);
        }
    }

    // Settings

    pub fn open_settings(&mut self) {
        self.settings_cursor = 0;
        self.ui_mode = UiMode::Settings;
    }

    pub fn close_modal(&mut self) {
        self.ui_mode = UiMode::Normal;
    }

    pub fn settings_cursor_up(&mut self) {
        self.settings_cursor = self.settings_cursor.saturating_sub(1);
    }

    pub fn settings_cursor_down(&mut self) {
        if self.settings_cursor + 1 < SettingsRow::all().len() {
            self.settings_cursor += 1;
        }
    }

    pub fn current_settings_row(&self) -> SettingsRow {
        SettingsRow::all()[self.settings_cursor.min(SettingsRow::all().len() - 1)]
    }

    /// Adjust the highlighted setting; `forward` is → / + and !forward is ← / -
    pub fn adjust_setting(&mut self, forward: bool) {
        match self.current_settings_row() {
            SettingsRow::Sound => {
                self.settings.sound = if forward {
                    self.settings.sound.next()
                } else {
                    self.settings.sound.prev()
                };
                self.preview_sound();
            }
            SettingsRow::Volume => {
                let delta = if forward { VOLUME_STEP } else { -VOLUME_STEP };
                let volume = (self.settings.volume + delta).clamp(0.0, 1.0);
                self.settings.volume = (volume * 10.0).round() / 10.0;
            }
            SettingsRow::BreakDuration => {
                let current = self.settings.break_duration as i64;
                self.settings.break_duration = clamp_duration(if forward { current + 1 } else { current - 1 });
            }
            SettingsRow::ConfirmDelete => {
                self.settings.confirm_delete = !self.settings.confirm_delete;
            }
            SettingsRow::DarkMode => {
                self.settings.dark_mode = !self.settings.dark_mode;
            }
        }
        self.needs_save = true;
    }

    pub fn preview_sound(&mut self) {
        self.alerts
            .play(self.settings.sound, self.settings.volume, PREVIEW_DURATION);
    }

    pub fn toggle_dark_mode(&mut self) {
        self.settings.dark_mode = !self.settings.dark_mode;
        self.needs_save = true;
    }

    // Import

    pub fn start_import(&mut self) {
        if !self.is_planning() {
            return;
        }
        if self.is_importing {
            self.status_message = Some("An import is already in progress".to_string());
            return;
        }
        self.text_input.clear();
        self.ui_mode = UiMode::ImportPrompt;
    }

    /// Read the file named in the prompt and hand it to the AI worker
    pub fn submit_import(&mut self) {
        let path_text = self.text_input.trim().to_string();
        self.text_input.clear();
        self.ui_mode = UiMode::Normal;
        if path_text.is_empty() {
            return;
        }

        let path = Path::new(&path_text);
        let bytes = match read_bytes(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, "import: could not read file");
                self.status_message = Some(format!("Could not read {}", path.display()));
                return;
            }
        };
        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path_text.clone());

        let submitted = self.ai.as_ref().is_some_and(|ai| {
            ai.submit(AiRequest::Extract {
                file_name: file_name.clone(),
                bytes,
                mime_type,
            })
        });

        if submitted {
            self.is_importing = true;
            self.status_message = Some(format!("Extracting activities from {}...", file_name));
        } else {
            self.status_message = Some("Import is unavailable".to_string());
        }
    }

    // Background results

    fn drain_ai_responses(&mut self) {
        let mut responses = Vec::new();
        if let Some(ai) = &self.ai {
            while let Some(response) = ai.try_recv() {
                responses.push(response);
            }
        }
        for response in responses {
            self.apply_ai_response(response);
        }
    }

    /// Apply a finished AI call, even if the state moved on since it was sent
    pub fn apply_ai_response(&mut self, response: AiResponse) {
        match response {
            AiResponse::Insights(text) => {
                self.insights = text;
            }
            AiResponse::Extracted { file_name, result } => {
                self.is_importing = false;
                match result {
                    Ok(records) => {
                        let added = self.session.store.append_extracted(&records);
                        info!(%file_name, added, "import: activities added");
                        self.status_message = Some(format!("Imported {} activities from {}", added, file_name));
                        self.needs_save = true;
                    }
                    Err(e) => {
                        warn!(%file_name, error = %e, "import: extraction failed");
                        self.status_message = Some(e.user_message());
                    }
                }
            }
        }
    }

    /// Refresh insights when the list length or mode changed while planning
    fn request_insights_if_stale(&mut self) {
        if !self.is_planning() {
            return;
        }
        let key = (self.session.store.len(), self.mode());
        if self.insights_key == Some(key) {
            return;
        }
        self.insights_key = Some(key);

        if self.session.store.is_empty() {
            self.insights = EMPTY_LIST_INSIGHT.to_string();
            return;
        }
        if let Some(ai) = &self.ai {
            ai.submit(AiRequest::Insights(self.activities().to_vec()));
        }
    }

    // Persistence

    /// Write activities, settings and templates to the store
    pub fn save(&mut self) -> Result<()> {
        self.settings.save(&mut self.store);
        save_activities(&mut self.store, self.session.store.activities());
        save_templates(&mut self.store, &self.custom_templates);
        self.store.flush()?;
        self.needs_save = false;
        Ok(())
    }
}

/// Read the duration field; digit strings too long for i64 saturate, anything else is 0
fn parse_minutes(raw: &str) -> i64 {
    let raw = raw.trim();
    raw.parse::<i64>().unwrap_or_else(|_| {
        let digits = raw.strip_prefix('-').unwrap_or(raw);
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            0
        } else if raw.starts_with('-') {
            i64::MIN
        } else {
            i64::MAX
        }
    })
}
