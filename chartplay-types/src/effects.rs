//! Effect and event parameter types.

use serde::{Deserialize, Serialize};

use crate::line_graph::LineGraph;
use crate::MapTime;

/// Audio effect attached to hold objects and lasers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectType {
    None,
    Retrigger,
    Flanger,
    Phaser,
    Gate,
    TapeStop,
    BitCrush,
    Wobble,
    SideChain,
    Echo,
    Panning,
    PitchShift,
    LowPassFilter,
    HighPassFilter,
    PeakingFilter,
    SwitchAudio,
    /// Chart-defined effect, numbered in declaration order
    UserDefined(u16),
}

impl Default for EffectType {
    fn default() -> Self {
        Self::None
    }
}

impl EffectType {
    pub fn is_none(&self) -> bool {
        matches!(self, EffectType::None)
    }
}

/// How the track tilts in response to lasers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackRollBehaviour {
    Zero,
    Normal,
    Bigger,
    Biggest,
    /// Tilt follows the chart's rotation graph
    Manual,
    /// Keep the current tilt until the next change
    Keep,
}

impl Default for TrackRollBehaviour {
    fn default() -> Self {
        Self::Normal
    }
}

/// Keys of parameters that chart events can change during playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKey {
    SlamVolume,
    LaserEffectType,
    LaserEffectMix,
    TrackRollBehaviour,
    ChartEnd,
}

/// Value carried by a parameter event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EventData {
    Float(f32),
    Int(i32),
    Effect(EffectType),
    Roll(TrackRollBehaviour),
}

impl EventData {
    pub fn as_float(&self) -> Option<f32> {
        match self {
            EventData::Float(v) => Some(*v),
            EventData::Int(v) => Some(*v as f32),
            _ => None,
        }
    }

    pub fn as_roll(&self) -> Option<TrackRollBehaviour> {
        match self {
            EventData::Roll(r) => Some(*r),
            _ => None,
        }
    }
}

/// Which camera/lane graph of an [`EffectTimeline`] to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GraphKind {
    ZoomBottom,
    ZoomTop,
    /// Horizontal lane shift (formerly "zoom side")
    ShiftX,
    /// Lane rotation, also used as manual tilt
    RotationZ,
    ScrollSpeed,
}

/// Camera and lane effects of a chart, one [`LineGraph`] per [`GraphKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectTimeline {
    zoom_bottom: LineGraph,
    zoom_top: LineGraph,
    shift_x: LineGraph,
    rotation_z: LineGraph,
    scroll_speed: LineGraph,
}

impl Default for EffectTimeline {
    fn default() -> Self {
        Self::new()
    }
}

impl EffectTimeline {
    pub fn new() -> Self {
        Self {
            zoom_bottom: LineGraph::default(),
            zoom_top: LineGraph::default(),
            shift_x: LineGraph::default(),
            rotation_z: LineGraph::default(),
            scroll_speed: LineGraph::new(1.0),
        }
    }

    pub fn graph(&self, kind: GraphKind) -> &LineGraph {
        match kind {
            GraphKind::ZoomBottom => &self.zoom_bottom,
            GraphKind::ZoomTop => &self.zoom_top,
            GraphKind::ShiftX => &self.shift_x,
            GraphKind::RotationZ => &self.rotation_z,
            GraphKind::ScrollSpeed => &self.scroll_speed,
        }
    }

    pub fn graph_mut(&mut self, kind: GraphKind) -> &mut LineGraph {
        match kind {
            GraphKind::ZoomBottom => &mut self.zoom_bottom,
            GraphKind::ZoomTop => &mut self.zoom_top,
            GraphKind::ShiftX => &mut self.shift_x,
            GraphKind::RotationZ => &mut self.rotation_z,
            GraphKind::ScrollSpeed => &mut self.scroll_speed,
        }
    }

    pub fn insert_graph_value(&mut self, kind: GraphKind, time: MapTime, value: f64) {
        self.graph_mut(kind).insert(time, value);
    }

    /// Whether the first rotation point strictly after `bound` is a slam
    /// that has already been reached at `time`.
    pub fn manual_tilt_instant(&self, bound: MapTime, time: MapTime) -> bool {
        match self.rotation_z.upper_bound(bound) {
            Some((point_time, point)) => point.is_slam() && point_time <= time,
            None => false,
        }
    }
}
