pub mod activity;
pub mod dial;
pub mod enums;
pub mod preset;
pub mod session;
pub mod stats;
pub mod store;

pub use activity::{clamp_duration, format_countdown, format_minutes, Activity, ActivityPatch};
pub use dial::{compute_dial, Dial, Wedge};
pub use enums::{SessionMode, SoundKey, UiMode};
pub use preset::{builtin_presets, Preset};
pub use session::{reduce, Session, SessionAction, SessionEffect};
pub use stats::SessionStats;
pub use store::{ActivityStore, ExtractedActivity};
