use chartplay_types::{ChartObject, GraphKind, MapTime, ObjectId, Timed, TimingPoint, TrackRollBehaviour};

use super::ChartPlayback;
use crate::active_set::ObjectSet;

impl<'a> ChartPlayback<'a> {
    /// Objects worth drawing from slightly behind the playback time up to
    /// `range` ahead of it.
    ///
    /// Held objects come first, followed by upcoming objects from the hit
    /// cursor onward. Each object appears once. In calibration mode the ids
    /// index the synthetic calibration objects instead of the chart.
    pub fn objects_in_range(&self, range: MapTime) -> Vec<(ObjectId, &ChartObject)> {
        let begin = self
            .playback_time
            .saturating_sub(self.config.early_visibility);
        let end = self.playback_time.saturating_add(range);

        if let Some(calibration) = &self.calibration {
            return calibration
                .objects
                .iter()
                .enumerate()
                .skip_while(|(_, object)| object.time() < begin)
                .take_while(|(_, object)| object.time() <= end)
                .map(|(index, object)| (ObjectId::new(index), object))
                .collect();
        }

        let (begin, end) = self.view_range.clamp(begin, end);
        let chart = self.chart;
        let mut seen = ObjectSet::new();
        let mut result = Vec::new();

        for id in self.holds.iter() {
            if let Some(object) = chart.object(id) {
                if seen.add_unique(id) {
                    result.push((id, object));
                }
            }
        }

        for (index, object) in chart.objects().iter().enumerate().skip(self.object.index()) {
            if object.time() < begin {
                continue;
            }
            if object.time() >= end {
                break;
            }
            let id = ObjectId::new(index);
            if seen.add_unique(id) {
                result.push((id, object));
            }
        }

        result
    }

    /// Timing point in effect at the playback time, or the first one before
    /// any has been reached.
    pub fn current_timing_point(&self) -> Option<&TimingPoint> {
        if let Some(calibration) = &self.calibration {
            return Some(&calibration.timing);
        }
        let points = self.chart.timing_points();
        points.get(self.timing.index()).or_else(|| points.first())
    }

    pub fn current_timing_index(&self) -> usize {
        self.timing.index()
    }

    /// Timing point in effect at an arbitrary `time`.
    pub fn timing_point_at(&self, time: MapTime) -> Option<&TimingPoint> {
        if let Some(calibration) = &self.calibration {
            return Some(&calibration.timing);
        }
        let points = self.chart.timing_points();
        points.get(self.timing.seek_point(points, time, true).index())
    }

    /// Lane toggle point in effect, if the chart has any.
    pub fn current_lane_toggle_index(&self) -> Option<usize> {
        let index = self.lane_toggle.index();
        (index < self.chart.lane_toggle_points().len()).then_some(index)
    }

    /// Camera value by index at the playback time: 0 bottom zoom, 1 top zoom,
    /// 2 horizontal shift, 3 rotation, 4 center split.
    pub fn zoom(&self, index: u8) -> Option<f32> {
        let kind = match index {
            0 => GraphKind::ZoomBottom,
            1 => GraphKind::ZoomTop,
            2 => GraphKind::ShiftX,
            3 => GraphKind::RotationZ,
            4 => return Some(self.chart.center_split_value_at(self.playback_time)),
            _ => return None,
        };
        Some(
            self.chart
                .graph_value_at(kind, self.playback_time, self.aux_effects),
        )
    }

    /// Whether manual tilt is active and a rotation slam placed after the
    /// last tilt-mode change has been reached, so the track should snap.
    pub fn check_if_manual_tilt_instant(&self) -> bool {
        if self.track_roll != TrackRollBehaviour::Manual {
            return false;
        }
        self.chart.check_if_manual_tilt_instant(
            self.last_track_roll_change,
            self.playback_time,
            self.aux_effects,
        )
    }
}
