use super::store::KvStore;
use crate::domain::{Activity, Preset, SoundKey};
use tracing::warn;

pub const KEY_ACTIVITIES: &str = "activities";
pub const KEY_VOLUME: &str = "volume";
pub const KEY_SOUND: &str = "sound";
pub const KEY_BREAK_DURATION: &str = "break_duration";
pub const KEY_CUSTOM_TEMPLATES: &str = "custom_templates";
pub const KEY_CONFIRM_DELETE: &str = "confirm_delete";
pub const KEY_DARK_MODE: &str = "dark_mode";

/// User preferences
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Alert volume, 0.0 to 1.0
    pub volume: f32,
    pub sound: SoundKey,
    /// Length of an inserted break, in minutes (at least 1)
    pub break_duration: u32,
    pub confirm_delete: bool,
    pub dark_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            volume: 0.5,
            sound: SoundKey::Chime,
            break_duration: 5,
            confirm_delete: true,
            dark_mode: false,
        }
    }
}

impl Settings {
    /// Load settings, silently keeping defaults for missing or malformed entries
    ///
    /// `prefers_dark` is used when no dark-mode preference was ever stored.
    pub fn load(store: &KvStore, prefers_dark: bool) -> Self {
        let defaults = Self::default();

        let volume = store
            .get(KEY_VOLUME)
            .and_then(|v| v.trim().parse::<f32>().ok())
            .filter(|v| v.is_finite())
            .map(|v| v.clamp(0.0, 1.0))
            .unwrap_or(defaults.volume);

        let sound = store
            .get(KEY_SOUND)
            .and_then(SoundKey::from_key)
            .unwrap_or(defaults.sound);

        let break_duration = store
            .get(KEY_BREAK_DURATION)
            .and_then(|v| v.trim().parse::<i64>().ok())
            .map(crate::domain::clamp_duration)
            .unwrap_or(defaults.break_duration);

        let confirm_delete = store
            .get(KEY_CONFIRM_DELETE)
            .map(|v| v == "true")
            .unwrap_or(defaults.confirm_delete);

        let dark_mode = store
            .get(KEY_DARK_MODE)
            .map(|v| v == "true")
            .unwrap_or(prefers_dark);

        Self {
            volume,
            sound,
            break_duration,
            confirm_delete,
            dark_mode,
        }
    }

    pub fn save(&self, store: &mut KvStore) {
        store.set(KEY_VOLUME, self.volume.to_string());
        store.set(KEY_SOUND, self.sound.key());
        store.set(KEY_BREAK_DURATION, self.break_duration.to_string());
        store.set(KEY_CONFIRM_DELETE, self.confirm_delete.to_string());
        store.set(KEY_DARK_MODE, self.dark_mode.to_string());
    }
}

/// Guess a dark terminal background from `COLORFGBG` ("fg;bg")
pub fn prefers_dark_terminal() -> bool {
    std::env::var("COLORFGBG")
        .ok()
        .and_then(|v| v.rsplit(';').next().and_then(|bg| bg.parse::<u8>().ok()))
        .map(|bg| bg <= 6 || bg == 8)
        .unwrap_or(false)
}

/// Load the stored activity list with all progress cleared
pub fn load_activities(store: &KvStore) -> Vec<Activity> {
    let Some(raw) = store.get(KEY_ACTIVITIES) else {
        return Vec::new();
    };

    match serde_json::from_str::<Vec<Activity>>(raw) {
        Ok(mut activities) => {
            for activity in &mut activities {
                let duration = activity.duration;
                activity.set_duration(duration);
                activity.completed = false;
            }
            activities
        }
        Err(e) => {
            warn!(error = %e, "settings: ignoring malformed activity list");
            Vec::new()
        }
    }
}

pub fn save_activities(store: &mut KvStore, activities: &[Activity]) {
    match serde_json::to_string(activities) {
        Ok(json) => store.set(KEY_ACTIVITIES, json),
        Err(e) => warn!(error = %e, "settings: could not serialize activities"),
    }
}

/// Load user-saved templates (newest first)
pub fn load_templates(store: &KvStore) -> Vec<Preset> {
    let Some(raw) = store.get(KEY_CUSTOM_TEMPLATES) else {
        return Vec::new();
    };

    serde_json::from_str(raw).unwrap_or_else(|e| {
        warn!(error = %e, "settings: ignoring malformed template list");
        Vec::new()
    })
}

pub fn save_templates(store: &mut KvStore, templates: &[Preset]) {
    match serde_json::to_string(templates) {
        Ok(json) => store.set(KEY_CUSTOM_TEMPLATES, json),
        Err(e) => warn!(error = %e, "settings: could not serialize templates"),
    }
}
