//! Conversions between time and tempo-relative scroll distance.
//!
//! View distance is measured in beats. Converting across tempo changes
//! splits the span at every timing point it crosses.

use chartplay_types::MapTime;

use super::ChartPlayback;

/// Milliseconds per unit of view distance when scrolling at a constant rate.
const CONSTANT_RATE_DIVISOR: f64 = 480_000.0;

/// Beat boundaries crossed over an interval.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BeatCount {
    pub beats: u32,
    /// Index inside the bar of the first beat after the interval start
    pub start_index: i32,
}

impl<'a> ChartPlayback<'a> {
    /// Count beat boundaries in `[start, start + range)` using the current
    /// timing point, with each beat split into `multiplier` parts.
    pub fn count_beats(&self, start: MapTime, range: MapTime, multiplier: u32) -> BeatCount {
        let Some(tp) = self.current_timing_point() else {
            return BeatCount::default();
        };

        let delta = start as i64 - tp.time as i64;
        let beat = tp.whole_note_length() / tp.denominator.max(1) as f64 / multiplier.max(1) as f64;
        if !(beat.is_finite() && beat > 0.0) {
            return BeatCount::default();
        }
        let beat_start = (delta as f64 / beat).floor() as i64;
        let beat_end = ((delta + range as i64) as f64 / beat).floor() as i64;

        BeatCount {
            beats: u32::try_from(beat_end.saturating_sub(beat_start).max(0)).unwrap_or(u32::MAX),
            start_index: beat_start
                .saturating_add(1)
                .rem_euclid(tp.numerator.max(1) as i64) as i32,
        }
    }

    /// Duration covered by scrolling `distance` from the current playback
    /// time. Negative distances look back in time.
    pub fn view_distance_to_duration(&self, distance: f32) -> MapTime {
        if let Some(calibration) = &self.calibration {
            return (distance as f64 * calibration.timing.beat_duration) as MapTime;
        }
        if self.config.constant_rate {
            return (distance as f64 * CONSTANT_RATE_DIVISOR) as MapTime;
        }

        let points = self.chart.timing_points();
        if points.is_empty() {
            return 0;
        }

        let mut index = self
            .timing
            .seek_point(points, self.playback_time, true)
            .index();
        let mut current = self.playback_time as f64;
        let mut remaining = (distance as f64).abs();
        let mut duration = 0.0;

        if distance >= 0.0 {
            loop {
                let tp = &points[index];
                if let Some(next) = points.get(index + 1) {
                    let max_distance = (next.time as f64 - current) / tp.beat_duration;
                    if max_distance < remaining {
                        duration += max_distance * tp.beat_duration;
                        remaining -= max_distance;
                        current = next.time as f64;
                        index += 1;
                        continue;
                    }
                }
                duration += remaining * tp.beat_duration;
                break;
            }
        } else {
            loop {
                let tp = &points[index];
                if index > 0 {
                    let max_distance = (current - tp.time as f64) / tp.beat_duration;
                    if max_distance < remaining {
                        duration -= max_distance * tp.beat_duration;
                        remaining -= max_distance;
                        current = tp.time as f64;
                        index -= 1;
                        continue;
                    }
                }
                duration -= remaining * tp.beat_duration;
                break;
            }
        }

        duration as MapTime
    }

    /// View distance of `duration` starting at the current playback time.
    pub fn duration_to_view_distance(&self, duration: MapTime) -> f32 {
        self.duration_to_view_distance_at_time(self.playback_time, duration)
    }

    /// View distance of `duration` starting at `time`. The result keeps the
    /// sign of `duration`.
    pub fn duration_to_view_distance_at_time(&self, time: MapTime, duration: MapTime) -> f32 {
        if self.config.constant_rate {
            return (duration as f64 / CONSTANT_RATE_DIVISOR) as f32;
        }

        let direction = if duration < 0 { -1.0 } else { 1.0 };
        let (mut start, end) = if duration < 0 {
            (time as i64 + duration as i64, time as i64)
        } else {
            (time as i64, time as i64 + duration as i64)
        };
        let mut remaining = end - start;

        if let Some(calibration) = &self.calibration {
            return (remaining as f64 / calibration.timing.beat_duration * direction) as f32;
        }

        let points = self.chart.timing_points();
        if points.is_empty() {
            return 0.0;
        }

        let mut index = self
            .timing
            .seek_point(points, clamp_time(start), true)
            .index();
        let mut distance = 0.0;
        loop {
            let tp = &points[index];
            if let Some(next) = points.get(index + 1) {
                if (next.time as i64) < end {
                    let part = next.time as i64 - start;
                    distance += part as f64 / tp.beat_duration;
                    remaining -= part;
                    start = next.time as i64;
                    index += 1;
                    continue;
                }
            }
            distance += remaining as f64 / tp.beat_duration;
            break;
        }

        (distance * direction) as f32
    }

    /// View distance from the current playback time to `time`.
    pub fn time_to_view_distance(&self, time: MapTime) -> f32 {
        let duration = time.saturating_sub(self.playback_time);
        self.duration_to_view_distance_at_time(self.playback_time, duration)
    }
}

fn clamp_time(time: i64) -> MapTime {
    time.clamp(MapTime::MIN as i64, MapTime::MAX as i64) as MapTime
}
