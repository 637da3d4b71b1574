use super::activity::{clamp_duration, Activity};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// State-free blueprint of one activity inside a preset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetActivity {
    pub name: String,
    pub duration: u32,
    pub color: String,
}

impl PresetActivity {
    fn new(name: &str, duration: u32, color: &str) -> Self {
        Self {
            name: name.to_string(),
            duration,
            color: color.to_string(),
        }
    }
}

/// A named, reusable list of activities
///
/// Built-in presets carry no id; user templates do, so they can be deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub description: String,
    pub activities: Vec<PresetActivity>,
}

impl Preset {
    /// Snapshot the given activities as a user template
    pub fn from_activities(name: &str, activities: &[Activity]) -> Self {
        Self {
            id: Some(Uuid::new_v4()),
            name: name.trim().to_string(),
            icon: "📌".to_string(),
            description: format!("{} custom tasks", activities.len()),
            activities: activities
                .iter()
                .map(|a| PresetActivity {
                    name: a.name.clone(),
                    duration: a.duration,
                    color: a.color.clone(),
                })
                .collect(),
        }
    }

    /// Create fresh activities (new ids, full countdowns) from this preset
    pub fn instantiate(&self) -> Vec<Activity> {
        self.activities
            .iter()
            .map(|a| Activity::new(a.name.clone(), a.duration, a.color.clone()))
            .collect()
    }

    pub fn total_minutes(&self) -> u32 {
        self.activities
            .iter()
            .map(|a| clamp_duration(a.duration as i64))
            .sum()
    }
}

/// Presets shipped with the application
pub fn builtin_presets() -> Vec<Preset> {
    vec![
        Preset {
            id: None,
            name: "Morning Routine".to_string(),
            icon: "🌅".to_string(),
            description: "Structure for a smooth start to the day.".to_string(),
            activities: vec![
                PresetActivity::new("Wake & Stretch", 5, "#10b981"),
                PresetActivity::new("Getting Ready", 15, "#6366f1"),
                PresetActivity::new("Healthy Breakfast", 20, "#f59e0b"),
                PresetActivity::new("Pack Bag", 10, "#f97316"),
            ],
        },
        Preset {
            id: None,
            name: "Study Session (Pomodoro)".to_string(),
            icon: "📚".to_string(),
            description: "Optimized deep work cycles with restorative breaks.".to_string(),
            activities: vec![
                PresetActivity::new("Deep Work Sprint", 25, "#ef4444"),
                PresetActivity::new("Short Break", 5, "#10b981"),
                PresetActivity::new("Review & Polish", 25, "#ef4444"),
                PresetActivity::new("Wrap Up", 10, "#8b5cf6"),
            ],
        },
        Preset {
            id: None,
            name: "Classroom Transition".to_string(),
            icon: "🏫".to_string(),
            description: "Clear expectations for moving between lessons.".to_string(),
            activities: vec![
                PresetActivity::new("Clean Up Station", 3, "#f59e0b"),
                PresetActivity::new("Gather on Carpet", 2, "#6366f1"),
                PresetActivity::new("Ready for Lesson", 5, "#10b981"),
            ],
        },
    ]
}
