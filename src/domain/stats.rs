use super::activity::Activity;

/// Totals shown on the stats cards and in the session summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    pub total_activities: usize,
    pub total_planned_minutes: u32,
    pub completed_activities: usize,
    /// Completed activities as a rounded percentage of all activities
    pub efficiency_score: u32,
}

impl SessionStats {
    pub fn compute(activities: &[Activity]) -> Self {
        let total_activities = activities.len();
        let completed_activities = activities.iter().filter(|a| a.completed).count();
        let efficiency_score = if total_activities == 0 {
            0
        } else {
            (completed_activities as f64 / total_activities as f64 * 100.0).round() as u32
        };

        Self {
            total_activities,
            total_planned_minutes: activities.iter().map(|a| a.duration).sum(),
            completed_activities,
            efficiency_score,
        }
    }

    /// "completed/total" progress label
    pub fn progress_label(&self) -> String {
        format!("{}/{}", self.completed_activities, self.total_activities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_stats() {
        let stats = SessionStats::compute(&[]);
        assert_eq!(stats.efficiency_score, 0);
        assert_eq!(stats.progress_label(), "0/0");
    }

    #[test]
    fn test_stats() {
        let mut list = vec![
            Activity::new("A", 10, "#6366f1"),
            Activity::new("B", 5, "#6366f1"),
            Activity::new("C", 20, "#6366f1"),
        ];
        list[0].complete();

        let stats = SessionStats::compute(&list);
        assert_eq!(
            stats,
            SessionStats {
                total_activities: 3,
                total_planned_minutes: 35,
                completed_activities: 1,
                efficiency_score: 33,
            }
        );
        assert_eq!(stats.progress_label(), "1/3");
    }
}
