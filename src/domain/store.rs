use super::activity::{
    clamp_duration, palette_color, Activity, ActivityPatch, BREAK_COLOR, BREAK_NAME,
    DEFAULT_ACTIVITY_MINUTES, DEFAULT_ACTIVITY_NAME,
};
use std::collections::HashSet;
use uuid::Uuid;

/// A `(name, duration)` record produced by bulk import
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ExtractedActivity {
    pub name: String,
    pub duration: i64,
}

/// Ordered activity list plus the planner's selection set
///
/// Order is playback order. Every operation is total: unknown ids and
/// out-of-range indices are no-ops.
#[derive(Debug, Clone, Default)]
pub struct ActivityStore {
    activities: Vec<Activity>,
    selected: HashSet<Uuid>,
}

impl ActivityStore {
    pub fn new(activities: Vec<Activity>) -> Self {
        Self {
            activities,
            selected: HashSet::new(),
        }
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Activity> {
        self.activities.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Activity> {
        self.activities.get_mut(index)
    }

    pub fn find(&self, id: Uuid) -> Option<&Activity> {
        self.activities.iter().find(|a| a.id == id)
    }

    /// Append an activity with a fresh id and the next palette color
    pub fn add(&mut self, name: impl Into<String>, duration: u32) -> Uuid {
        let color = palette_color(self.activities.len());
        self.push(Activity::new(name, duration, color))
    }

    /// Append the default "New Activity"
    pub fn add_default(&mut self) -> Uuid {
        self.add(DEFAULT_ACTIVITY_NAME, DEFAULT_ACTIVITY_MINUTES)
    }

    /// Append a break of the given length
    pub fn add_break(&mut self, minutes: u32) -> Uuid {
        self.push(Activity::new(BREAK_NAME, minutes, BREAK_COLOR))
    }

    fn push(&mut self, activity: Activity) -> Uuid {
        let id = activity.id;
        self.activities.push(activity);
        id
    }

    /// Merge `patch` into the activity with `id`
    ///
    /// A duration change resets the countdown to the new full duration.
    pub fn update(&mut self, id: Uuid, patch: ActivityPatch) {
        let Some(activity) = self.activities.iter_mut().find(|a| a.id == id) else {
            return;
        };

        if let Some(name) = patch.name {
            activity.name = name;
        }
        if let Some(color) = patch.color {
            activity.color = color;
        }
        if let Some(duration) = patch.duration {
            activity.set_duration(duration);
        }
    }

    /// Remove every activity whose id is in `ids`, dropping them from the selection too
    pub fn remove(&mut self, ids: &[Uuid]) {
        self.activities.retain(|a| !ids.contains(&a.id));
        for id in ids {
            self.selected.remove(id);
        }
    }

    /// Move the element at `from` to `to`, keeping everyone else's relative order
    pub fn reorder(&mut self, from: usize, to: usize) {
        let len = self.activities.len();
        if from >= len || to >= len || from == to {
            return;
        }
        let item = self.activities.remove(from);
        self.activities.insert(to, item);
    }

    /// Replace the whole list (preset load); the selection is cleared
    pub fn replace_all(&mut self, activities: Vec<Activity>) {
        self.activities = activities;
        self.selected.clear();
    }

    /// Append imported records, continuing the palette from the current length
    pub fn append_extracted(&mut self, records: &[ExtractedActivity]) -> usize {
        let base = self.activities.len();
        for (offset, record) in records.iter().enumerate() {
            let duration = clamp_duration(record.duration);
            self.activities.push(Activity::new(
                record.name.clone(),
                duration,
                palette_color(base + offset),
            ));
        }
        records.len()
    }

    /// Restore every activity to its untouched state
    pub fn restore_all(&mut self) {
        for activity in &mut self.activities {
            activity.restore();
        }
    }

    pub fn toggle_select(&mut self, id: Uuid) {
        if !self.selected.remove(&id) && self.find(id).is_some() {
            self.selected.insert(id);
        }
    }

    /// Select everything, or clear the selection if everything is already selected
    pub fn toggle_select_all(&mut self) {
        if self.selected.len() == self.activities.len() {
            self.selected.clear();
        } else {
            self.selected = self.activities.iter().map(|a| a.id).collect();
        }
    }

    pub fn is_selected(&self, id: Uuid) -> bool {
        self.selected.contains(&id)
    }

    /// Selected ids in list order
    pub fn selected_ids(&self) -> Vec<Uuid> {
        self.activities
            .iter()
            .filter(|a| self.selected.contains(&a.id))
            .map(|a| a.id)
            .collect()
    }

    pub fn selection_len(&self) -> usize {
        self.selected.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::activity::MAX_DURATION_MINUTES;
    use pretty_assertions::assert_eq;

    fn names(store: &ActivityStore) -> Vec<&str> {
        store.activities().iter().map(|a| a.name.as_str()).collect()
    }

    fn store_abcd() -> (ActivityStore, Vec<Uuid>) {
        let mut store = ActivityStore::default();
        let ids = ["A", "B", "C", "D"]
            .iter()
            .map(|n| store.add(*n, 10))
            .collect();
        (store, ids)
    }

    #[test]
    fn test_add_uses_palette_by_length() {
        let (store, _) = store_abcd();
        assert_eq!(store.activities()[0].color, "#6366f1");
        assert_eq!(store.activities()[3].color, "#f59e0b");
    }

    #[test]
    fn test_add_generates_unique_ids() {
        let (_, ids) = store_abcd();
        let unique: HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), 4);
    }

    #[test]
    fn test_add_break() {
        let mut store = ActivityStore::default();
        store.add_break(7);
        let activity = &store.activities()[0];
        assert_eq!(activity.name, "Short Break");
        assert_eq!(activity.color, BREAK_COLOR);
        assert_eq!(activity.remaining_seconds, 420);
    }

    #[test]
    fn test_update_name_keeps_progress() {
        let (mut store, ids) = store_abcd();
        store.get_mut(0).unwrap().remaining_seconds = 100;
        store.update(ids[0], ActivityPatch::name("Renamed"));
        assert_eq!(store.activities()[0].name, "Renamed");
        assert_eq!(store.activities()[0].remaining_seconds, 100);
    }

    #[test]
    fn test_update_duration_resets_remaining() {
        let (mut store, ids) = store_abcd();
        store.get_mut(1).unwrap().remaining_seconds = 17;
        store.update(ids[1], ActivityPatch::duration(4));
        assert_eq!(store.activities()[1].duration, 4);
        assert_eq!(store.activities()[1].remaining_seconds, 240);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let (mut store, _) = store_abcd();
        let before = store.activities().to_vec();
        store.update(Uuid::new_v4(), ActivityPatch::name("x"));
        assert_eq!(store.activities(), before.as_slice());
    }

    #[test]
    fn test_remove_selected_subset() {
        let (mut store, ids) = store_abcd();
        store.toggle_select(ids[1]);
        store.toggle_select(ids[3]);

        let selected = store.selected_ids();
        assert_eq!(selected, vec![ids[1], ids[3]]);

        store.remove(&selected);
        assert_eq!(names(&store), vec!["A", "C"]);
        assert_eq!(store.selection_len(), 0);
    }

    #[test]
    fn test_remove_missing_id_is_noop() {
        let (mut store, _) = store_abcd();
        store.remove(&[Uuid::new_v4()]);
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_reorder() {
        let (mut store, _) = store_abcd();
        store.reorder(0, 2);
        assert_eq!(names(&store), vec!["B", "C", "A", "D"]);

        store.reorder(3, 0);
        assert_eq!(names(&store), vec!["D", "B", "C", "A"]);

        store.reorder(0, 9);
        assert_eq!(names(&store), vec!["D", "B", "C", "A"]);
    }

    #[test]
    fn test_toggle_select_all() {
        let (mut store, ids) = store_abcd();
        store.toggle_select(ids[0]);
        store.toggle_select_all();
        assert_eq!(store.selection_len(), 4);
        store.toggle_select_all();
        assert_eq!(store.selection_len(), 0);
    }

    #[test]
    fn test_toggle_select_ignores_unknown_id() {
        let (mut store, _) = store_abcd();
        store.toggle_select(Uuid::new_v4());
        assert_eq!(store.selection_len(), 0);
    }

    #[test]
    fn test_append_extracted_continues_palette_and_clamps() {
        let (mut store, _) = store_abcd();
        let added = store.append_extracted(&[
            ExtractedActivity {
                name: "Essay".to_string(),
                duration: 45,
            },
            ExtractedActivity {
                name: "Broken".to_string(),
                duration: -3,
            },
        ]);
        assert_eq!(added, 2);
        assert_eq!(store.activities()[4].color, palette_color(4));
        assert_eq!(store.activities()[5].duration, 1);
        assert_eq!(store.activities()[5].remaining_seconds, 60);
    }

    #[test]
    fn test_append_extracted_caps_huge_duration() {
        let mut store = ActivityStore::new(Vec::new());
        store.append_extracted(&[ExtractedActivity {
            name: "Huge".to_string(),
            duration: 100_000_000,
        }]);
        let activity = &store.activities()[0];
        assert_eq!(activity.duration, MAX_DURATION_MINUTES);
        assert_eq!(activity.remaining_seconds, MAX_DURATION_MINUTES * 60);
    }

    #[test]
    fn test_update_caps_huge_duration() {
        let (mut store, ids) = store_abcd();
        store.update(ids[0], ActivityPatch::duration(u32::MAX));
        assert_eq!(store.activities()[0].duration, MAX_DURATION_MINUTES);
    }

    #[test]
    fn test_replace_all_clears_selection() {
        let (mut store, ids) = store_abcd();
        store.toggle_select(ids[0]);
        store.replace_all(vec![Activity::new("Only", 5, "#ef4444")]);
        assert_eq!(names(&store), vec!["Only"]);
        assert_eq!(store.selection_len(), 0);
    }
}
