//! Visual clock model: wedges of remaining work laid over an analog clock face.
//!
//! Pure function of session state and wall-clock time. One revolution is 60
//! minutes and the first wedge starts at the current minute hand position.

use super::activity::Activity;
use chrono::{NaiveTime, Timelike};
use uuid::Uuid;

/// Minutes represented by one full revolution of the dial
pub const MINUTES_PER_REVOLUTION: f64 = 60.0;

/// Angles of the three clock hands, in degrees clockwise from 12 o'clock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockHands {
    pub hour: f64,
    pub minute: f64,
    pub second: f64,
}

/// One activity's remaining time drawn as an arc segment
#[derive(Debug, Clone, PartialEq)]
pub struct Wedge {
    pub activity_id: Uuid,
    pub color: String,
    /// Dial offset where the wedge starts, in minutes (not wrapped at 60)
    pub start_minute: f64,
    pub length_minutes: f64,
}

impl Wedge {
    pub fn end_minute(&self) -> f64 {
        self.start_minute + self.length_minutes
    }

    pub fn start_fraction(&self) -> f64 {
        self.start_minute / MINUTES_PER_REVOLUTION
    }

    pub fn end_fraction(&self) -> f64 {
        self.end_minute() / MINUTES_PER_REVOLUTION
    }

    pub fn start_degrees(&self) -> f64 {
        self.start_fraction() * 360.0
    }

    pub fn end_degrees(&self) -> f64 {
        self.end_fraction() * 360.0
    }

    /// Whether the arc spans more than half the dial
    pub fn large_arc(&self) -> bool {
        self.length_minutes / MINUTES_PER_REVOLUTION > 0.5
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dial {
    pub hands: ClockHands,
    pub wedges: Vec<Wedge>,
}

impl Dial {
    /// Total minutes of remaining work shown on the dial
    pub fn total_minutes(&self) -> f64 {
        self.wedges.iter().map(|w| w.length_minutes).sum()
    }
}

/// Continuous minute-of-hour, e.g. 12:30:30 -> 30.5
pub fn minute_of_hour(now: NaiveTime) -> f64 {
    now.minute() as f64 + now.second() as f64 / 60.0
}

/// Clock hand angles from wall-clock time
pub fn clock_hands(now: NaiveTime) -> ClockHands {
    let seconds = now.second() as f64;
    let minutes = minute_of_hour(now);
    let hours = (now.hour() % 12) as f64 + minutes / 60.0;

    ClockHands {
        hour: hours * 30.0,
        minute: minutes * 6.0,
        second: seconds * 6.0,
    }
}

/// Minutes of remaining playback time an activity contributes to the dial
pub fn wedge_minutes(activity: &Activity, index: usize, current_index: usize, is_running: bool) -> f64 {
    if activity.completed {
        0.0
    } else if is_running && index == current_index {
        activity.remaining_seconds as f64 / 60.0
    } else if is_running && index < current_index {
        0.0
    } else {
        activity.duration as f64
    }
}

/// Lay out the dial for the given session state at wall-clock time `now`
pub fn compute_dial(activities: &[Activity], current_index: usize, is_running: bool, now: NaiveTime) -> Dial {
    let mut offset = minute_of_hour(now);
    let mut wedges = Vec::new();

    for (index, activity) in activities.iter().enumerate() {
        let length = wedge_minutes(activity, index, current_index, is_running);
        if length <= 0.0 {
            continue;
        }

        wedges.push(Wedge {
            activity_id: activity.id,
            color: activity.color.clone(),
            start_minute: offset,
            length_minutes: length,
        });
        offset += length;
    }

    Dial {
        hands: clock_hands(now),
        wedges,
    }
}
