//! Session controller: the playback state machine over the activity store.
//!
//! Every transition goes through [`reduce`], so timer ticks and user actions
//! share one mutation path and never interleave mid-update.

use super::activity::Activity;
use super::enums::SessionMode;
use super::store::ActivityStore;
use tracing::debug;
use uuid::Uuid;

/// Inputs to the session state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    Start,
    Tick,
    Skip,
    TogglePause,
    Reset,
    /// Replace the list with fresh activities and return to planning
    LoadActivities(Vec<Activity>),
}

/// Side effects the caller is expected to carry out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEffect {
    PlayAlert,
    ActivityCompleted { id: Uuid },
    SessionFinished,
}

/// Why the current activity is being left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AdvanceCause {
    Expired,
    Skipped,
}

/// One run-through of the activity sequence
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub store: ActivityStore,
    current_index: usize,
    mode: SessionMode,
    running: bool,
}

impl Session {
    pub fn new(store: ActivityStore) -> Self {
        Self {
            store,
            current_index: 0,
            mode: SessionMode::Planning,
            running: false,
        }
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Running flag; only meaningful in [`SessionMode::Running`]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the one-second tick should be firing
    pub fn is_ticking(&self) -> bool {
        self.mode == SessionMode::Running && self.running
    }

    /// The activity being played, if a session is running
    pub fn current_activity(&self) -> Option<&Activity> {
        if self.mode == SessionMode::Running {
            self.store.get(self.current_index)
        } else {
            None
        }
    }

    pub fn next_activity(&self) -> Option<&Activity> {
        if self.mode == SessionMode::Running {
            self.store.get(self.current_index + 1)
        } else {
            None
        }
    }
}

/// Apply `action` to `session`, returning the effects to carry out
pub fn reduce(session: &mut Session, action: SessionAction) -> Vec<SessionEffect> {
    match action {
        SessionAction::Start => {
            start(session);
            Vec::new()
        }
        SessionAction::Tick => tick(session),
        SessionAction::Skip => {
            if session.mode != SessionMode::Running {
                return Vec::new();
            }
            advance(session, AdvanceCause::Skipped)
        }
        SessionAction::TogglePause => {
            if session.mode == SessionMode::Running {
                session.running = !session.running;
                debug!(running = session.running, "session: toggled pause");
            }
            Vec::new()
        }
        SessionAction::Reset => {
            reset(session);
            Vec::new()
        }
        SessionAction::LoadActivities(activities) => {
            session.store.replace_all(activities);
            session.mode = SessionMode::Planning;
            session.running = false;
            session.current_index = 0;
            Vec::new()
        }
    }
}

fn start(session: &mut Session) {
    if session.mode != SessionMode::Planning || session.store.is_empty() {
        debug!(mode = session.mode.to_tag(), len = session.store.len(), "session: start ignored");
        return;
    }
    session.mode = SessionMode::Running;
    session.running = true;
    session.current_index = 0;
    debug!(len = session.store.len(), "session: started");
}

fn tick(session: &mut Session) -> Vec<SessionEffect> {
    if !session.is_ticking() {
        return Vec::new();
    }

    // The tick that brings the countdown to zero is also the expiry tick
    let index = session.current_index;
    let expired = match session.store.get_mut(index) {
        Some(current) => {
            current.tick_down();
            current.remaining_seconds == 0
        }
        None => true,
    };

    if expired {
        advance(session, AdvanceCause::Expired)
    } else {
        Vec::new()
    }
}

/// Complete the current activity and move on, or finish the session
///
/// Shared by expiry and skip so exactly one non-completed activity is ever current.
fn advance(session: &mut Session, cause: AdvanceCause) -> Vec<SessionEffect> {
    let mut effects = vec![SessionEffect::PlayAlert];

    let index = session.current_index;
    if let Some(current) = session.store.get_mut(index) {
        current.complete();
        effects.push(SessionEffect::ActivityCompleted { id: current.id });
        debug!(index, name = %current.name, ?cause, "session: activity completed");
    }

    if index + 1 < session.store.len() {
        session.current_index = index + 1;
    } else {
        session.running = false;
        session.mode = SessionMode::Summary;
        effects.push(SessionEffect::SessionFinished);
        debug!("session: finished");
    }

    effects
}

fn reset(session: &mut Session) {
    session.running = false;
    session.mode = SessionMode::Planning;
    session.current_index = 0;
    session.store.restore_all();
    debug!("session: reset");
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn session_with(durations: &[(&str, u32)]) -> Session {
        let mut store = ActivityStore::default();
        for (name, minutes) in durations {
            store.add(*name, *minutes);
        }
        Session::new(store)
    }

    fn tick_n(session: &mut Session, n: usize) -> Vec<SessionEffect> {
        let mut effects = Vec::new();
        for _ in 0..n {
            effects.extend(reduce(session, SessionAction::Tick));
        }
        effects
    }

    #[test]
    fn test_start_on_non_empty_list() {
        let mut session = session_with(&[("A", 10), ("B", 5)]);
        reduce(&mut session, SessionAction::Start);
        assert_eq!(session.mode(), SessionMode::Running);
        assert!(session.is_running());
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn test_start_on_empty_list_is_noop() {
        let mut session = Session::default();
        reduce(&mut session, SessionAction::Start);
        assert_eq!(session.mode(), SessionMode::Planning);
        assert!(!session.is_running());
    }

    #[test]
    fn test_start_outside_planning_is_noop() {
        let mut session = session_with(&[("A", 1), ("B", 1)]);
        reduce(&mut session, SessionAction::Start);
        reduce(&mut session, SessionAction::Skip);
        assert_eq!(session.current_index(), 1);

        reduce(&mut session, SessionAction::Start);
        assert_eq!(session.current_index(), 1);
    }

    #[test]
    fn test_full_scenario() {
        let mut session = session_with(&[("A", 10), ("B", 5)]);
        reduce(&mut session, SessionAction::Start);
        assert_eq!(session.store.activities()[0].remaining_seconds, 600);

        tick_n(&mut session, 599);
        assert_eq!(session.store.activities()[0].remaining_seconds, 1);
        assert_eq!(session.current_index(), 0);

        let effects = tick_n(&mut session, 1);
        assert!(session.store.activities()[0].completed);
        assert_eq!(session.store.activities()[0].remaining_seconds, 0);
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.store.activities()[1].remaining_seconds, 300);
        assert_eq!(effects[0], SessionEffect::PlayAlert);

        tick_n(&mut session, 300);
        assert!(session.store.activities()[1].completed);
        assert_eq!(session.mode(), SessionMode::Summary);
        assert!(!session.is_running());
    }

    #[test]
    fn test_expiry_completes_and_advances() {
        let mut session = session_with(&[("A", 1), ("B", 1)]);
        reduce(&mut session, SessionAction::Start);
        session.store.get_mut(0).unwrap().remaining_seconds = 0;

        let effects = reduce(&mut session, SessionAction::Tick);
        let first = &session.store.activities()[0];
        assert!(first.completed);
        assert_eq!(first.remaining_seconds, 0);
        assert_eq!(session.current_index(), 1);
        assert_eq!(
            effects,
            vec![
                SessionEffect::PlayAlert,
                SessionEffect::ActivityCompleted { id: first.id },
            ]
        );
    }

    #[test]
    fn test_ticks_after_summary_are_noops() {
        let mut session = session_with(&[("A", 1)]);
        reduce(&mut session, SessionAction::Start);
        tick_n(&mut session, 60);
        assert_eq!(session.mode(), SessionMode::Summary);

        let effects = tick_n(&mut session, 10);
        assert!(effects.is_empty());
        assert_eq!(session.store.activities()[0].remaining_seconds, 0);
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn test_advance_resumes_partially_consumed_activity() {
        let mut session = session_with(&[("A", 1), ("B", 2)]);
        session.store.get_mut(1).unwrap().remaining_seconds = 30;
        reduce(&mut session, SessionAction::Start);
        reduce(&mut session, SessionAction::Skip);
        assert_eq!(session.current_activity().unwrap().remaining_seconds, 30);
    }

    #[test]
    fn test_skip_on_last_activity_finishes() {
        let mut session = session_with(&[("A", 10)]);
        reduce(&mut session, SessionAction::Start);
        tick_n(&mut session, 5);

        let effects = reduce(&mut session, SessionAction::Skip);
        assert_eq!(session.mode(), SessionMode::Summary);
        assert!(session.store.activities()[0].completed);
        assert_eq!(session.store.activities()[0].remaining_seconds, 0);
        assert!(effects.contains(&SessionEffect::PlayAlert));
        assert!(effects.contains(&SessionEffect::SessionFinished));
    }

    #[test]
    fn test_skip_in_planning_is_noop() {
        let mut session = session_with(&[("A", 10)]);
        let effects = reduce(&mut session, SessionAction::Skip);
        assert!(effects.is_empty());
        assert!(!session.store.activities()[0].completed);
    }

    #[test]
    fn test_pause_stops_time() {
        let mut session = session_with(&[("A", 1)]);
        reduce(&mut session, SessionAction::Start);
        reduce(&mut session, SessionAction::TogglePause);
        assert!(!session.is_ticking());

        tick_n(&mut session, 10);
        assert_eq!(session.store.activities()[0].remaining_seconds, 60);

        reduce(&mut session, SessionAction::TogglePause);
        tick_n(&mut session, 10);
        assert_eq!(session.store.activities()[0].remaining_seconds, 50);
        assert_eq!(session.mode(), SessionMode::Running);
    }

    #[test]
    fn test_pause_outside_running_is_noop() {
        let mut session = session_with(&[("A", 1)]);
        reduce(&mut session, SessionAction::TogglePause);
        assert!(!session.is_running());
    }

    #[test]
    fn test_reset_restores_everything() {
        let mut session = session_with(&[("A", 1), ("B", 2), ("C", 3)]);
        reduce(&mut session, SessionAction::Start);
        reduce(&mut session, SessionAction::Skip);
        tick_n(&mut session, 42);

        reduce(&mut session, SessionAction::Reset);
        assert_eq!(session.mode(), SessionMode::Planning);
        assert_eq!(session.current_index(), 0);
        assert!(!session.is_running());
        for activity in session.store.activities() {
            assert!(!activity.completed);
            assert_eq!(activity.remaining_seconds, activity.duration * 60);
        }
    }

    #[test]
    fn test_reset_from_summary() {
        let mut session = session_with(&[("A", 1)]);
        reduce(&mut session, SessionAction::Start);
        reduce(&mut session, SessionAction::Skip);
        assert_eq!(session.mode(), SessionMode::Summary);

        reduce(&mut session, SessionAction::Reset);
        assert_eq!(session.mode(), SessionMode::Planning);
        assert_eq!(session.store.activities()[0].remaining_seconds, 60);
    }

    #[test]
    fn test_load_activities_returns_to_planning() {
        let mut session = session_with(&[("A", 1)]);
        reduce(&mut session, SessionAction::Start);

        reduce(
            &mut session,
            SessionAction::LoadActivities(vec![Activity::new("New", 3, "#ef4444")]),
        );
        assert_eq!(session.mode(), SessionMode::Planning);
        assert!(!session.is_running());
        assert_eq!(session.store.len(), 1);
        assert_eq!(session.store.activities()[0].name, "New");
    }

    #[test]
    fn test_only_current_activity_is_decremented() {
        let mut session = session_with(&[("A", 1), ("B", 1), ("C", 1)]);
        reduce(&mut session, SessionAction::Start);
        reduce(&mut session, SessionAction::Skip);
        tick_n(&mut session, 20);

        let remaining: Vec<u32> = session
            .store
            .activities()
            .iter()
            .map(|a| a.remaining_seconds)
            .collect();
        assert_eq!(remaining, vec![0, 40, 60]);
    }
}
