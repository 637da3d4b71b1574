use serde::{Deserialize, Serialize};

/// Top-level mode of the session state machine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionMode {
    #[default]
    Planning,
    Running,
    Summary,
}

impl SessionMode {
    /// Short label for the header bar
    pub fn to_tag(&self) -> &'static str {
        match self {
            Self::Planning => "PLANNING",
            Self::Running => "RUNNING",
            Self::Summary => "SUMMARY",
        }
    }
}

/// Named alert sound
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundKey {
    #[default]
    Chime,
    Bell,
    Alert,
}

impl SoundKey {
    /// Parse a persisted sound key; unknown keys yield `None`
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "chime" => Some(Self::Chime),
            "bell" => Some(Self::Bell),
            "alert" => Some(Self::Alert),
            _ => None,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Chime => "chime",
            Self::Bell => "bell",
            Self::Alert => "alert",
        }
    }

    /// Cycle to the next sound (settings picker)
    pub fn next(&self) -> Self {
        match self {
            Self::Chime => Self::Bell,
            Self::Bell => Self::Alert,
            Self::Alert => Self::Chime,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::Chime => Self::Alert,
            Self::Bell => Self::Chime,
            Self::Alert => Self::Bell,
        }
    }

    pub fn all() -> &'static [SoundKey] {
        &[SoundKey::Chime, SoundKey::Bell, SoundKey::Alert]
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingActivity,
    EditingActivity,
    ConfirmDelete,
    SavingTemplate,
    TemplatePicker,
    Settings,
    ImportPrompt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sound_key_from_key() {
        assert_eq!(SoundKey::from_key("chime"), Some(SoundKey::Chime));
        assert_eq!(SoundKey::from_key("BELL"), Some(SoundKey::Bell));
        assert_eq!(SoundKey::from_key(" alert "), Some(SoundKey::Alert));
        assert_eq!(SoundKey::from_key("gong"), None);
    }

    #[test]
    fn test_sound_key_cycle() {
        let mut key = SoundKey::Chime;
        for _ in 0..SoundKey::all().len() {
            key = key.next();
        }
        assert_eq!(key, SoundKey::Chime);
    }

    #[test]
    fn test_sound_key_prev_undoes_next() {
        for key in SoundKey::all() {
            assert_eq!(key.next().prev(), *key);
        }
        assert_eq!(SoundKey::Chime.prev(), SoundKey::Alert);
    }

    #[test]
    fn test_session_mode_tags() {
        assert_eq!(SessionMode::default(), SessionMode::Planning);
        assert_eq!(SessionMode::Running.to_tag(), "RUNNING");
    }
}
