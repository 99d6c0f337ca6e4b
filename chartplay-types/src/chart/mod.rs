//! The chart: immutable, time-sorted playback data plus chart-level settings.

mod objects;
mod shuffle;
mod timing;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub use objects::{ButtonObject, ChartObject, EventObject, HoldObject, LaserObject, ObjectKind};
pub use shuffle::{shuffled_lanes, MIRROR_LANES};
pub use timing::{LaneTogglePoint, TimingPoint};

use crate::effects::{EffectTimeline, EffectType, GraphKind};
use crate::line_graph::LineGraph;
use crate::{MapTime, ObjectId, Timed};

/// Chart metadata and initial audio settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub title: String,
    pub artist: String,
    pub effector: String,
    /// Offset in ms before the chart starts
    pub offset: MapTime,
    pub preview_offset: MapTime,
    pub preview_duration: MapTime,
    pub level: u8,
    pub difficulty: u8,
    pub slam_volume: f32,
    pub laser_effect_mix: f32,
    pub music_volume: f32,
    pub laser_effect_type: EffectType,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            title: String::new(),
            artist: String::new(),
            effector: String::new(),
            offset: 0,
            preview_offset: 0,
            preview_duration: 0,
            level: 1,
            difficulty: 0,
            slam_volume: 1.0,
            laser_effect_mix: 1.0,
            music_volume: 1.0,
            laser_effect_type: EffectType::PeakingFilter,
        }
    }
}

/// Tempo summary of a chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BpmInfo {
    pub start: f64,
    pub min: f64,
    pub max: f64,
    /// BPM covering the longest stretch of the chart
    pub mode: f64,
}

/// Sorted chart data read by the playback engine.
///
/// The three sequences are kept sorted by time and never gain or lose entries
/// after construction. [`Chart::shuffle`] may move buttons to other lanes
/// and effect graphs may still be filled in through [`Chart::effects_mut`].
#[derive(Debug, Clone)]
pub struct Chart {
    settings: ChartSettings,
    timing_points: Vec<TimingPoint>,
    lane_toggle_points: Vec<LaneTogglePoint>,
    objects: Vec<ChartObject>,
    base_effects: EffectTimeline,
    aux_effects: Vec<EffectTimeline>,
    center_split: LineGraph,
}

impl Chart {
    pub fn new(
        settings: ChartSettings,
        mut timing_points: Vec<TimingPoint>,
        mut lane_toggle_points: Vec<LaneTogglePoint>,
        objects: Vec<ChartObject>,
    ) -> Self {
        if !is_sorted(&timing_points) {
            log::warn!(target: "chart", "timing points out of order, sorting");
            timing_points.sort_by_key(|p| p.time);
        }
        if !is_sorted(&lane_toggle_points) {
            log::warn!(target: "chart", "lane toggle points out of order, sorting");
            lane_toggle_points.sort_by_key(|p| p.time);
        }
        let objects = if is_sorted(&objects) {
            objects
        } else {
            log::warn!(target: "chart", "objects out of order, sorting");
            sort_objects(objects)
        };

        Self {
            settings,
            timing_points,
            lane_toggle_points,
            objects,
            base_effects: EffectTimeline::new(),
            aux_effects: Vec::new(),
            center_split: LineGraph::default(),
        }
    }

    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    pub fn timing_points(&self) -> &[TimingPoint] {
        &self.timing_points
    }

    pub fn lane_toggle_points(&self) -> &[LaneTogglePoint] {
        &self.lane_toggle_points
    }

    pub fn objects(&self) -> &[ChartObject] {
        &self.objects
    }

    pub fn object(&self, id: ObjectId) -> Option<&ChartObject> {
        self.objects.get(id.get())
    }

    pub fn has_objects(&self) -> bool {
        !self.objects.is_empty()
    }

    pub fn effects(&self) -> &EffectTimeline {
        &self.base_effects
    }

    pub fn effects_mut(&mut self) -> &mut EffectTimeline {
        &mut self.base_effects
    }

    pub fn aux_effects(&self) -> &[EffectTimeline] {
        &self.aux_effects
    }

    /// Add an auxiliary effect timeline, returning its index.
    pub fn add_aux_effects(&mut self, timeline: EffectTimeline) -> usize {
        self.aux_effects.push(timeline);
        self.aux_effects.len() - 1
    }

    pub fn center_split(&self) -> &LineGraph {
        &self.center_split
    }

    pub fn center_split_mut(&mut self) -> &mut LineGraph {
        &mut self.center_split
    }

    /// Timing point in effect at `time`; the first one when `time` precedes it.
    pub fn timing_point_at(&self, time: MapTime) -> Option<&TimingPoint> {
        let after = self.timing_points.partition_point(|p| p.time <= time);
        self.timing_points.get(after.saturating_sub(1))
    }

    /// Time of the first non-event object at or after `lower_bound`.
    pub fn first_object_time(&self, lower_bound: MapTime) -> MapTime {
        self.objects
            .iter()
            .filter(|o| o.kind() != ObjectKind::Event)
            .map(|o| o.time())
            .find(|&t| t >= lower_bound)
            .unwrap_or(lower_bound)
    }

    /// End time of the last non-event object.
    pub fn last_object_time(&self) -> MapTime {
        self.objects
            .iter()
            .rev()
            .find(|o| o.kind() != ObjectKind::Event)
            .map_or(0, |o| o.end_time())
    }

    pub fn last_object_time_including_events(&self) -> MapTime {
        self.objects.last().map_or(0, |o| o.time())
    }

    /// Start time of bar `measure` (0-based).
    pub fn time_from_measure(&self, measure: i32) -> MapTime {
        timing::time_from_measure(&self.timing_points, measure)
    }

    /// Bar index (0-based) containing `time`.
    pub fn measure_from_time(&self, time: MapTime) -> i32 {
        timing::measure_from_time(&self.timing_points, time)
    }

    /// Start, min, max and most common BPM. `None` without timing points.
    pub fn bpm_info(&self) -> Option<BpmInfo> {
        let first = self.timing_points.first()?;
        let mut info = BpmInfo {
            start: first.bpm(),
            min: f64::MAX,
            max: f64::MIN,
            mode: first.bpm(),
        };

        // Durations keyed by the bit pattern of the BPM so equal tempos merge
        let mut durations: HashMap<u64, i64> = HashMap::new();
        let mut last_time = self.settings.offset;
        let mut last_bpm: Option<f64> = None;
        let mut longest = -1_i64;

        for tp in &self.timing_points {
            let bpm = tp.bpm();
            info.min = info.min.min(bpm);
            info.max = info.max.max(bpm);

            if let Some(prev) = last_bpm {
                let span = durations.entry(prev.to_bits()).or_insert(0);
                *span += tp.time as i64 - last_time as i64;
                if *span > longest {
                    longest = *span;
                    info.mode = prev;
                }
            }
            last_time = tp.time;
            last_bpm = Some(bpm);
        }

        if let Some(prev) = last_bpm {
            let span = durations.entry(prev.to_bits()).or_insert(0);
            *span += self.last_object_time() as i64 - last_time as i64;
            if *span > longest {
                info.mode = prev;
            }
        }

        Some(info)
    }

    /// Graph value from the base timeline, plus the auxiliary timeline `aux`
    /// when given.
    pub fn graph_value_at(&self, kind: GraphKind, time: MapTime, aux: Option<usize>) -> f32 {
        let mut value = self.base_effects.graph(kind).value_at(time) as f32;
        if let Some(timeline) = aux.and_then(|i| self.aux_effects.get(i)) {
            value += timeline.graph(kind).value_at(time) as f32;
        }
        value
    }

    pub fn center_split_value_at(&self, time: MapTime) -> f32 {
        self.center_split.value_at(time) as f32
    }

    /// Whether a manual tilt slam placed after `bound` has been reached at `time`.
    pub fn check_if_manual_tilt_instant(
        &self,
        bound: MapTime,
        time: MapTime,
        aux: Option<usize>,
    ) -> bool {
        if self.base_effects.manual_tilt_instant(bound, time) {
            return true;
        }
        aux.and_then(|i| self.aux_effects.get(i))
            .is_some_and(|timeline| timeline.manual_tilt_instant(bound, time))
    }
}

fn is_sorted<T: Timed>(items: &[T]) -> bool {
    items.windows(2).all(|w| w[0].time() <= w[1].time())
}

/// Stable sort by time, remapping laser links to the new positions.
fn sort_objects(objects: Vec<ChartObject>) -> Vec<ChartObject> {
    let mut order: Vec<usize> = (0..objects.len()).collect();
    order.sort_by_key(|&i| objects[i].time());

    let mut new_position = vec![0; objects.len()];
    for (new, &old) in order.iter().enumerate() {
        new_position[old] = new;
    }
    let remap = |id: Option<ObjectId>| {
        id.and_then(|id| new_position.get(id.get()).map(|&p| ObjectId::new(p)))
    };

    let mut slots: Vec<Option<ChartObject>> = objects.into_iter().map(Some).collect();
    order
        .iter()
        .filter_map(|&old| slots[old].take())
        .map(|mut object| {
            if let ChartObject::Laser(laser) = &mut object {
                laser.prev = remap(laser.prev);
                laser.next = remap(laser.next);
            }
            object
        })
        .collect()
}
