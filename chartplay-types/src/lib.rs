//! # chartplay-types
//!
//! Shared chart data definitions for the chartplay playback core.
//! This crate holds the immutable chart model (timing points, lane toggles,
//! hittable objects, chart-level settings) and the piecewise-linear
//! [`LineGraph`] used for animated parameters.
//!
//! Loading charts from disk is not handled here; callers build a [`Chart`]
//! from already-parsed sequences.

pub mod chart;
mod effects;
pub mod line_graph;

pub use chart::{
    BpmInfo, ButtonObject, Chart, ChartObject, ChartSettings, EventObject, HoldObject,
    LaneTogglePoint, LaserObject, ObjectKind, TimingPoint, MIRROR_LANES, shuffled_lanes,
};
pub use effects::{EffectTimeline, EffectType, EventData, EventKey, GraphKind, TrackRollBehaviour};
pub use line_graph::{GraphPoint, GraphValueError, LineGraph};

/// Chart time in milliseconds.
pub type MapTime = i32;

/// Anything placed on the chart timeline.
///
/// All sequences handed to the playback core are sorted ascending by this
/// value.
pub trait Timed {
    fn time(&self) -> MapTime;
}

/// Stable identity of an object inside a [`Chart`].
///
/// Ids are positions in the chart's sorted object list, so two ids compare
/// equal exactly when they name the same object.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ObjectId(usize);

impl ObjectId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }
    pub fn get(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
