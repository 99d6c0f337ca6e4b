//! Hittable chart objects.

use serde::{Deserialize, Serialize};

use crate::effects::{EffectType, EventData, EventKey};
use crate::{MapTime, ObjectId, Timed};

/// A single button press.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonObject {
    pub time: MapTime,
    /// Button lane, 0-3 for BT and 4-5 for FX
    pub index: u8,
}

/// A held button, optionally carrying an audio effect while held.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldObject {
    pub time: MapTime,
    pub index: u8,
    pub duration: MapTime,
    #[serde(default)]
    pub effect_type: EffectType,
    /// Effect parameters as written in the chart
    #[serde(default)]
    pub effect_params: [i16; 2],
}

impl HoldObject {
    pub fn end_time(&self) -> MapTime {
        self.time.saturating_add(self.duration)
    }
}

/// One segment of a laser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaserObject {
    pub time: MapTime,
    pub duration: MapTime,
    /// Laser lane, 0 for left and 1 for right
    pub index: u8,
    /// Start and end positions across the track
    pub points: [f32; 2],
    /// Segment this one continues from, if any
    #[serde(default)]
    pub prev: Option<ObjectId>,
    /// Segment continuing this one, if any
    #[serde(default)]
    pub next: Option<ObjectId>,
}

impl LaserObject {
    pub fn end_time(&self) -> MapTime {
        self.time.saturating_add(self.duration)
    }

    /// Whether this segment starts a new laser rather than continuing one.
    pub fn is_head(&self) -> bool {
        self.prev.is_none()
    }
}

/// A chart-timed parameter change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventObject {
    pub time: MapTime,
    pub key: EventKey,
    pub data: EventData,
}

/// Kind tag of a [`ChartObject`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    Single,
    Hold,
    Laser,
    Event,
}

/// Any object in the chart's object stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChartObject {
    Single(ButtonObject),
    Hold(HoldObject),
    Laser(LaserObject),
    Event(EventObject),
}

impl ChartObject {
    pub fn kind(&self) -> ObjectKind {
        match self {
            ChartObject::Single(_) => ObjectKind::Single,
            ChartObject::Hold(_) => ObjectKind::Hold,
            ChartObject::Laser(_) => ObjectKind::Laser,
            ChartObject::Event(_) => ObjectKind::Event,
        }
    }

    /// Time the object stops mattering: start plus duration for holds and
    /// lasers, the start time for everything else.
    pub fn end_time(&self) -> MapTime {
        match self {
            ChartObject::Hold(hold) => hold.end_time(),
            ChartObject::Laser(laser) => laser.end_time(),
            ChartObject::Single(button) => button.time,
            ChartObject::Event(event) => event.time,
        }
    }

    pub fn is_laser(&self) -> bool {
        matches!(self, ChartObject::Laser(_))
    }

    pub fn as_hold(&self) -> Option<&HoldObject> {
        match self {
            ChartObject::Hold(hold) => Some(hold),
            _ => None,
        }
    }

    pub fn as_laser(&self) -> Option<&LaserObject> {
        match self {
            ChartObject::Laser(laser) => Some(laser),
            _ => None,
        }
    }

    pub fn as_event(&self) -> Option<&EventObject> {
        match self {
            ChartObject::Event(event) => Some(event),
            _ => None,
        }
    }
}

impl Timed for ChartObject {
    fn time(&self) -> MapTime {
        match self {
            ChartObject::Single(o) => o.time,
            ChartObject::Hold(o) => o.time,
            ChartObject::Laser(o) => o.time,
            ChartObject::Event(o) => o.time,
        }
    }
}
