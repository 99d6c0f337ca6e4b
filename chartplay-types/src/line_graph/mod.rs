//! Piecewise-linear value store for animated chart parameters.
//!
//! A [`LineGraph`] maps unique times to a `(pre, post)` value pair. Equal
//! values form a continuous point; unequal values form a slam, an instant
//! jump from `pre` to `post` at that time. Between points the graph is
//! linear, from the left point's `post` to the right point's `pre`. Before
//! the first point and after the last one it is flat.

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Included, Unbounded};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::MapTime;

/// Value pair stored at one graph time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphPoint {
    /// Value approaching the point from the left
    pub pre: f64,
    /// Value leaving the point to the right
    pub post: f64,
}

impl GraphPoint {
    pub fn new(value: f64) -> Self {
        Self {
            pre: value,
            post: value,
        }
    }

    pub fn slam(pre: f64, post: f64) -> Self {
        Self { pre, post }
    }

    pub fn is_slam(&self) -> bool {
        self.pre != self.post
    }
}

/// Error for graph point text that is neither `"v"` nor `"a;b"`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphValueError {
    #[error("invalid graph value {0:?}")]
    InvalidNumber(String),
}

impl FromStr for GraphPoint {
    type Err = GraphValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |part: &str| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| GraphValueError::InvalidNumber(part.to_string()))
        };
        match s.split_once(';') {
            None => Ok(GraphPoint::new(parse(s)?)),
            Some((pre, post)) => Ok(GraphPoint::slam(parse(pre)?, parse(post)?)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineGraph {
    points: BTreeMap<MapTime, GraphPoint>,
    /// Value of an empty graph
    default: f64,
}

impl Default for LineGraph {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl LineGraph {
    pub fn new(default: f64) -> Self {
        Self {
            points: BTreeMap::new(),
            default,
        }
    }

    pub fn default_value(&self) -> f64 {
        self.default
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points in ascending time order.
    pub fn points(&self) -> impl Iterator<Item = (MapTime, GraphPoint)> + '_ {
        self.points.iter().map(|(&t, &p)| (t, p))
    }

    pub fn point_at(&self, time: MapTime) -> Option<GraphPoint> {
        self.points.get(&time).copied()
    }

    /// First point strictly after `time`.
    pub fn upper_bound(&self, time: MapTime) -> Option<(MapTime, GraphPoint)> {
        self.points
            .range((Excluded(time), Unbounded))
            .next()
            .map(|(&t, &p)| (t, p))
    }

    /// Last point at or before `time`.
    fn floor(&self, time: MapTime) -> Option<(MapTime, GraphPoint)> {
        self.points
            .range((Unbounded, Included(time)))
            .next_back()
            .map(|(&t, &p)| (t, p))
    }

    /// Last point strictly before `time`.
    fn before(&self, time: MapTime) -> Option<(MapTime, GraphPoint)> {
        self.points
            .range((Unbounded, Excluded(time)))
            .next_back()
            .map(|(&t, &p)| (t, p))
    }

    /// Set a continuous value at `time`.
    ///
    /// An existing point keeps its `pre` value and only has `post` replaced,
    /// which turns it into a slam when the values differ.
    pub fn insert(&mut self, time: MapTime, value: f64) {
        self.insert_point(time, GraphPoint::new(value));
    }

    /// Set a value pair at `time`. An existing point only takes the new `post`.
    pub fn insert_point(&mut self, time: MapTime, point: GraphPoint) {
        self.points
            .entry(time)
            .and_modify(|existing| existing.post = point.post)
            .or_insert(point);
    }

    /// Insert from chart text: `"v"` for a continuous point or `"a;b"` for a
    /// slam. Text that does not parse is dropped and the graph is unchanged.
    pub fn insert_str(&mut self, time: MapTime, text: &str) {
        match text.parse::<GraphPoint>() {
            Ok(point) => self.insert_point(time, point),
            Err(e) => {
                log::debug!(target: "chart::graph", "ignoring graph value at {}: {}", time, e);
            }
        }
    }

    /// Make sure a point exists at `time` without changing the graph's shape.
    ///
    /// Returns the value at `time` as seen from the left.
    pub fn extend(&mut self, time: MapTime) -> f64 {
        if self.points.is_empty() {
            self.insert(time, self.default);
            return self.default;
        }

        let Some((prev_time, prev)) = self.floor(time) else {
            // At or before the first point: flat already
            return self.points.values().next().map_or(self.default, |p| p.pre);
        };

        if prev_time == time {
            return prev.pre;
        }

        self.insert(time, prev.post);
        prev.post
    }

    /// Value of the graph at `time`.
    ///
    /// Exactly on a point this is the point's `pre` value.
    pub fn value_at(&self, time: MapTime) -> f64 {
        if let Some(point) = self.points.get(&time) {
            return point.pre;
        }

        let Some((prev_time, prev)) = self.floor(time) else {
            return self.points.values().next().map_or(self.default, |p| p.pre);
        };

        let Some((next_time, next)) = self.upper_bound(time) else {
            return prev.post;
        };

        let x = (time as f64 - prev_time as f64) / (next_time as f64 - prev_time as f64);
        lerp(prev.post, next.pre, x)
    }

    /// Definite integral of the graph over `[min(begin, end), max(begin, end)]`.
    ///
    /// Slams are instantaneous and add no area.
    pub fn integrate(&self, begin: MapTime, end: MapTime) -> f64 {
        if begin == end {
            return 0.0;
        }
        let (begin, end) = if end < begin { (end, begin) } else { (begin, end) };
        let span = end as f64 - begin as f64;

        if self.points.is_empty() {
            return self.default * span;
        }

        // Whole range after the last point
        let Some((first_after, first_after_point)) = self.upper_bound(begin) else {
            return self.last_post() * span;
        };

        if end <= first_after {
            return match self.floor(begin) {
                // Whole range before the first point
                None => first_after_point.pre * span,
                Some((seg_start, _)) => self.integrate_segment(seg_start, begin, end),
            };
        }

        let mut result = match self.floor(begin) {
            None => first_after_point.pre * (first_after as f64 - begin as f64),
            Some((seg_start, _)) => self.integrate_segment(seg_start, begin, first_after),
        };

        // Last point at or before `end`; the tail past it is a partial segment
        let last_inside = match self.points.get(&end) {
            Some(_) => end,
            None => match self.before(end) {
                Some((t, _)) => {
                    result += self.integrate_segment(t, t, end);
                    t
                }
                None => return result,
            },
        };

        let mut segments = self.points.range(first_after..=last_inside).peekable();
        while let Some((&t0, p0)) = segments.next() {
            if let Some(&(&t1, p1)) = segments.peek() {
                result += trapezoid(t0, p0, t1, p1);
            }
        }

        result
    }

    /// Integral over `[begin, end]`, which must lie between the point at
    /// `seg_start` and the point after it.
    fn integrate_segment(&self, seg_start: MapTime, begin: MapTime, end: MapTime) -> f64 {
        if begin == end {
            return 0.0;
        }
        let Some(&curr) = self.points.get(&seg_start) else {
            return self.default * (end as f64 - begin as f64);
        };
        let Some((next_time, next)) = self.upper_bound(seg_start) else {
            return curr.post * (end as f64 - begin as f64);
        };

        let width = next_time as f64 - seg_start as f64;
        let mut value = trapezoid(seg_start, &curr, next_time, &next);

        if seg_start != begin {
            let cut = begin as f64 - seg_start as f64;
            value -= cut * lerp(curr.post, next.pre, cut / width * 0.5);
        }

        if end != next_time {
            let cut = next_time as f64 - end as f64;
            value -= cut * lerp(curr.post, next.pre, 1.0 - cut / width * 0.5);
        }

        value
    }

    fn last_post(&self) -> f64 {
        self.points.values().next_back().map_or(self.default, |p| p.post)
    }

    /// Text form of the point at exactly `time`: `"v"`, `"a;b"` for a slam,
    /// or an empty string when there is no point.
    pub fn string_value_at(&self, time: MapTime) -> String {
        match self.points.get(&time) {
            Some(point) if point.is_slam() => {
                format!("{};{}", format_value(point.pre), format_value(point.post))
            }
            Some(point) => format_value(point.pre),
            None => String::new(),
        }
    }
}

fn lerp(a: f64, b: f64, x: f64) -> f64 {
    a + (b - a) * x
}

fn trapezoid(t0: MapTime, p0: &GraphPoint, t1: MapTime, p1: &GraphPoint) -> f64 {
    (t1 as f64 - t0 as f64) * (p1.pre + p0.post) * 0.5
}

fn format_value(value: f64) -> String {
    let text = format!("{:.6}", value);
    let text = text.trim_end_matches('0');
    text.trim_end_matches('.').to_string()
}
