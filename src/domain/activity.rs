use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed color palette for new activities, indexed by list length
pub const PALETTE: [&str; 8] = [
    "#6366f1", // Indigo
    "#ef4444", // Red
    "#10b981", // Emerald
    "#f59e0b", // Amber
    "#8b5cf6", // Violet
    "#06b6d4", // Cyan
    "#ec4899", // Pink
    "#f97316", // Orange
];

/// Color used for inserted breaks
pub const BREAK_COLOR: &str = "#10b981";

/// Default name and duration for a freshly added activity
pub const DEFAULT_ACTIVITY_NAME: &str = "New Activity";
pub const DEFAULT_ACTIVITY_MINUTES: u32 = 15;

pub const BREAK_NAME: &str = "Short Break";

/// Smallest duration an activity may have, in minutes
pub const MIN_DURATION_MINUTES: u32 = 1;

/// Largest duration an activity may have, in minutes (one day)
pub const MAX_DURATION_MINUTES: u32 = 24 * 60;

/// Pick the palette color for the activity at position `index`
pub fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Clamp a user-entered duration into the valid range
pub fn clamp_duration(minutes: i64) -> u32 {
    minutes.clamp(MIN_DURATION_MINUTES as i64, MAX_DURATION_MINUTES as i64) as u32
}

/// One schedulable task with a planned duration and live countdown state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: Uuid,
    pub name: String,
    /// Planned duration in whole minutes
    pub duration: u32,
    /// Display color as `#rrggbb`
    pub color: String,
    #[serde(default)]
    pub completed: bool,
    /// Live countdown, always within `[0, duration * 60]`
    #[serde(default)]
    pub remaining_seconds: u32,
}

impl Activity {
    pub fn new(name: impl Into<String>, duration: u32, color: impl Into<String>) -> Self {
        let duration = clamp_duration(duration as i64);
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            duration,
            color: color.into(),
            completed: false,
            remaining_seconds: duration * 60,
        }
    }

    /// Planned duration in seconds
    pub fn planned_seconds(&self) -> u32 {
        self.duration.saturating_mul(60)
    }

    /// Change the planned duration; any in-progress countdown is discarded
    pub fn set_duration(&mut self, minutes: u32) {
        self.duration = clamp_duration(minutes as i64);
        self.remaining_seconds = self.planned_seconds();
    }

    /// Mark as completed, forcing the countdown to zero
    pub fn complete(&mut self) {
        self.completed = true;
        self.remaining_seconds = 0;
    }

    /// Clear all progress
    pub fn restore(&mut self) {
        self.completed = false;
        self.remaining_seconds = self.planned_seconds();
    }

    /// Decrement the countdown by one second, saturating at zero
    pub fn tick_down(&mut self) {
        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
    }

    /// Fraction of the planned time already consumed (0.0 to 1.0)
    pub fn progress_ratio(&self) -> f64 {
        let planned = self.planned_seconds() as f64;
        if planned == 0.0 {
            return 1.0;
        }
        1.0 - self.remaining_seconds as f64 / planned
    }

    /// Countdown formatted as `m:ss`
    pub fn remaining_formatted(&self) -> String {
        format_countdown(self.remaining_seconds)
    }
}

/// Format seconds as `m:ss` (minutes are not wrapped into hours)
pub fn format_countdown(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Format minutes as "Xh Ym" (omits 0 values)
pub fn format_minutes(total_minutes: u32) -> String {
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours > 0 && minutes > 0 {
        format!("{}h {}m", hours, minutes)
    } else if hours > 0 {
        format!("{}h", hours)
    } else {
        format!("{}m", minutes)
    }
}

/// Partial update for an activity; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityPatch {
    pub name: Option<String>,
    pub duration: Option<u32>,
    pub color: Option<String>,
}

impl ActivityPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn duration(minutes: u32) -> Self {
        Self {
            duration: Some(minutes),
            ..Self::default()
        }
    }
}
