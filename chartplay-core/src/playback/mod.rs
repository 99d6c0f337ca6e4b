//! Chart playback: cursors, active object sets and latched parameters.
//!
//! [`ChartPlayback`] reads an immutable [`Chart`] and keeps five forward-only
//! cursors into it:
//!
//! - timing points and lane toggles, following the playback time
//! - buttons/holds/events, swept `hittable_object_enter` ahead
//! - lasers, swept `hittable_laser_enter` ahead
//! - laser alerts, swept `alert_laser_threshold` ahead
//!
//! Per-tick logic lives in `tick`, tempo conversions in `tempo` and
//! read-only queries in `query`.

mod query;
mod tempo;
mod tick;

use std::collections::HashMap;

use chartplay_types::{
    ButtonObject, Chart, ChartObject, EventData, EventKey, MapTime, TimingPoint,
    TrackRollBehaviour,
};

pub use tempo::BeatCount;

use crate::active_set::ObjectSet;
use crate::config::PlaybackConfig;
use crate::cursor::Cursor;
use crate::error::PlaybackError;
use crate::view_range::ViewRange;

/// Synthetic chart used while calibrating input and audio offsets.
#[derive(Debug, Clone)]
struct Calibration {
    timing: TimingPoint,
    objects: Vec<ChartObject>,
}

const CALIBRATION_OBJECTS: usize = 50;
const CALIBRATION_BEAT: MapTime = 500;

impl Calibration {
    fn new() -> Self {
        let objects = (0..CALIBRATION_OBJECTS)
            .map(|i| {
                ChartObject::Single(ButtonObject {
                    time: i as MapTime * CALIBRATION_BEAT,
                    index: (i % 4) as u8,
                })
            })
            .collect();
        Self {
            timing: TimingPoint::new(0, CALIBRATION_BEAT as f64, 4, 4),
            objects,
        }
    }
}

/// Drives playback of one chart.
///
/// Call [`reset`](Self::reset) once, then [`update`](Self::update) with a
/// non-decreasing time every frame.
#[derive(Debug, Clone)]
pub struct ChartPlayback<'a> {
    chart: &'a Chart,
    config: PlaybackConfig,

    playback_time: MapTime,
    view_range: ViewRange,

    timing: Cursor,
    lane_toggle: Cursor,
    object: Cursor,
    laser: Cursor,
    alert: Cursor,

    hittable: ObjectSet,
    holds: ObjectSet,
    effects: ObjectSet,

    event_values: HashMap<EventKey, EventData>,
    track_roll: TrackRollBehaviour,
    last_track_roll_change: MapTime,

    bar_time: f32,
    beat_time: f32,
    initial_state_sent: bool,

    aux_effects: Option<usize>,
    calibration: Option<Calibration>,
}

impl<'a> ChartPlayback<'a> {
    pub fn new(chart: &'a Chart, config: PlaybackConfig) -> Self {
        Self {
            chart,
            config,
            playback_time: 0,
            view_range: ViewRange::unbounded(),
            timing: Cursor::default(),
            lane_toggle: Cursor::default(),
            object: Cursor::default(),
            laser: Cursor::default(),
            alert: Cursor::default(),
            hittable: ObjectSet::new(),
            holds: ObjectSet::new(),
            effects: ObjectSet::new(),
            event_values: HashMap::new(),
            track_roll: TrackRollBehaviour::Normal,
            last_track_roll_change: 0,
            bar_time: 0.0,
            beat_time: 0.0,
            initial_state_sent: false,
            aux_effects: None,
            calibration: None,
        }
    }

    /// Rewind to `init_time`, only letting objects from `start` onward
    /// become active. A `start` of zero or less leaves the range unbounded.
    ///
    /// Fails when the chart has no objects.
    pub fn reset(&mut self, init_time: MapTime, start: MapTime) -> Result<(), PlaybackError> {
        self.effects.clear();
        if !self.chart.has_objects() {
            log::warn!(target: "playback", "reset rejected: chart has no objects");
            return Err(PlaybackError::NoObjects);
        }

        log::debug!(
            target: "playback",
            "resetting playback, init time = {}, start = {}",
            init_time,
            start
        );
        self.playback_time = init_time;

        let start = if start <= 0 { MapTime::MIN } else { start };
        self.view_range = ViewRange::starting_at(start);

        self.object = Cursor::default();
        self.laser = Cursor::default();
        self.alert = Cursor::default();
        self.timing = Cursor::default();
        self.lane_toggle = Cursor::default();

        self.track_roll = TrackRollBehaviour::Normal;
        self.last_track_roll_change = 0;

        self.hittable.clear();
        self.holds.clear();

        self.bar_time = 0.0;
        self.beat_time = 0.0;
        self.initial_state_sent = false;
        Ok(())
    }

    /// Switch to calibration: a fixed 4/4 beat at 120 BPM with evenly spaced
    /// buttons replaces the chart for queries and phase tracking.
    pub fn make_calibration_playback(&mut self) {
        log::debug!(target: "playback", "switching to calibration playback");
        self.calibration = Some(Calibration::new());
    }

    pub fn is_calibration(&self) -> bool {
        self.calibration.is_some()
    }

    pub fn chart(&self) -> &'a Chart {
        self.chart
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    pub fn playback_time(&self) -> MapTime {
        self.playback_time
    }

    pub fn view_range(&self) -> ViewRange {
        self.view_range
    }

    /// Restrict which objects may become active. Objects already swept are
    /// not revisited.
    pub fn set_view_range(&mut self, range: ViewRange) {
        self.view_range = range;
    }

    /// Position inside the current bar, in `[0, 1)`.
    pub fn bar_time(&self) -> f32 {
        self.bar_time
    }

    /// Position inside the current beat, in `[0, 1)`.
    pub fn beat_time(&self) -> f32 {
        self.beat_time
    }

    pub fn hittable_objects(&self) -> &ObjectSet {
        &self.hittable
    }

    pub fn hold_objects(&self) -> &ObjectSet {
        &self.holds
    }

    /// Holds whose effect is currently running.
    pub fn effect_objects(&self) -> &ObjectSet {
        &self.effects
    }

    /// Last value seen for `key`, either from the chart settings or from an
    /// event.
    pub fn event_value(&self, key: EventKey) -> Option<EventData> {
        self.event_values.get(&key).copied()
    }

    pub fn current_track_roll_behaviour(&self) -> TrackRollBehaviour {
        self.track_roll
    }

    pub fn constant_rate(&self) -> bool {
        self.config.constant_rate
    }

    pub fn set_constant_rate(&mut self, enabled: bool) {
        self.config.constant_rate = enabled;
    }

    /// Auxiliary effect timeline added to graph values, by index into
    /// [`Chart::aux_effects`].
    pub fn set_aux_effects(&mut self, index: Option<usize>) {
        self.aux_effects = index;
    }
}
