//! Tempo anchors and lane toggles.

use serde::{Deserialize, Serialize};

use crate::{MapTime, Timed};

/// Bars closer than this to a whole number are treated as whole.
pub(crate) const MEASURE_EPSILON: f64 = 0.005;

/// A tempo change anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingPoint {
    pub time: MapTime,
    /// Length of one beat in milliseconds
    pub beat_duration: f64,
    /// Beats per bar
    pub numerator: u8,
    pub denominator: u8,
}

impl TimingPoint {
    pub fn new(time: MapTime, beat_duration: f64, numerator: u8, denominator: u8) -> Self {
        Self {
            time,
            beat_duration,
            numerator,
            denominator,
        }
    }

    /// Build from beats per minute.
    pub fn from_bpm(time: MapTime, bpm: f64, numerator: u8, denominator: u8) -> Self {
        Self::new(time, 60_000.0 / bpm, numerator, denominator)
    }

    pub fn bpm(&self) -> f64 {
        60_000.0 / self.beat_duration
    }

    /// Length of a whole note (four quarter beats).
    pub fn whole_note_length(&self) -> f64 {
        self.beat_duration * 4.0
    }

    pub fn bar_duration(&self) -> f64 {
        self.whole_note_length() / self.denominator.max(1) as f64 * self.numerator as f64
    }
}

impl Timed for TimingPoint {
    fn time(&self) -> MapTime {
        self.time
    }
}

/// Marks a change of which lanes are visible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaneTogglePoint {
    pub time: MapTime,
    /// Fade duration of the toggle
    pub duration: MapTime,
    /// Bit per lane, set when the lane is shown
    pub lanes: u8,
}

impl Timed for LaneTogglePoint {
    fn time(&self) -> MapTime {
        self.time
    }
}

/// Whole bars between `a` and the following timing point `b`.
pub(crate) fn bar_count(a: &TimingPoint, b: &TimingPoint) -> i32 {
    if !has_bar_length(a) {
        log::warn!(
            target: "chart::timing",
            "timing point at {} has no bar length, counting no bars",
            a.time
        );
        return 0;
    }
    let bars = (b.time as f64 - a.time as f64) / a.bar_duration();
    let mut whole = (bars + 0.5) as i32;

    if (bars - whole as f64).abs() >= MEASURE_EPSILON {
        log::debug!(
            target: "chart::timing",
            "timing point at {} spans a non-integer number of bars: {}",
            a.time,
            bars
        );
        if bars > whole as f64 {
            whole = whole.saturating_add(1);
        }
    }

    whole
}

/// Start time of bar `measure` (0-based).
pub(crate) fn time_from_measure(points: &[TimingPoint], measure: i32) -> MapTime {
    if measure < 0 || points.is_empty() {
        return 0;
    }

    let mut measure = measure;
    let mut current = 0;
    for (i, tp) in points.iter().enumerate() {
        let in_this_point = match points.get(i + 1) {
            None => true,
            Some(_) if measure <= current => true,
            Some(next) => {
                let bars = bar_count(tp, next);
                if measure < current.saturating_add(bars) {
                    true
                } else {
                    current = current.saturating_add(bars);
                    false
                }
            }
        };

        if in_this_point {
            measure -= current;
            return (tp.time as f64 + tp.bar_duration() * measure as f64) as MapTime;
        }
    }

    0
}

/// Bar index (0-based) containing `time`.
pub(crate) fn measure_from_time(points: &[TimingPoint], time: MapTime) -> i32 {
    if time <= 0 || points.is_empty() {
        return 0;
    }

    let mut count: i32 = 0;
    for (i, tp) in points.iter().enumerate() {
        if let Some(next) = points.get(i + 1) {
            if next.time <= time {
                count = count.saturating_add(bar_count(tp, next));
                continue;
            }
        }
        if !has_bar_length(tp) {
            return count;
        }
        let into = (time as f64 - tp.time as f64) / tp.bar_duration();
        return count.saturating_add((MEASURE_EPSILON + into) as i32);
    }

    0
}

fn has_bar_length(tp: &TimingPoint) -> bool {
    let length = tp.bar_duration();
    length.is_finite() && length > 0.0
}
