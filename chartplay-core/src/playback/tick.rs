//! Per-frame advance of the playback state.

use chartplay_types::{ChartObject, EventData, EventKey, MapTime, ObjectId, Timed};

use super::ChartPlayback;
use crate::events::{PlaybackEvent, PlaybackListener};

/// Guard band around a hold's span in which its effect runs.
const FX_GUARD: MapTime = 100;

/// Events fire this far ahead of their time so they apply before they are
/// needed.
const EVENT_SLACK: MapTime = 2;

impl<'a> ChartPlayback<'a> {
    /// Advance playback to `new_time`, reporting every change to `sink`.
    ///
    /// Times earlier than the current playback time are ignored. In
    /// calibration mode only the bar and beat phase move.
    pub fn update(&mut self, new_time: MapTime, sink: &mut impl PlaybackListener) {
        if self.calibration.is_some() {
            self.update_phase(new_time);
            self.playback_time = new_time;
            return;
        }

        if new_time < self.playback_time {
            return;
        }

        if !self.initial_state_sent {
            self.emit_initial_state(sink);
        }

        self.update_phase(new_time);
        self.playback_time = new_time;

        self.advance_timing(sink);
        self.advance_lane_toggles(sink);
        self.enter_objects(sink);
        self.enter_lasers(sink);
        self.alert_lasers(sink);
        self.sweep_hittable(sink);
        self.sweep_holds(sink);
    }

    fn emit_initial_state(&mut self, sink: &mut impl PlaybackListener) {
        let settings = self.chart.settings();
        let initial = [
            (EventKey::LaserEffectMix, EventData::Float(settings.laser_effect_mix)),
            (
                EventKey::LaserEffectType,
                EventData::Effect(settings.laser_effect_type),
            ),
            (EventKey::SlamVolume, EventData::Float(settings.slam_volume)),
        ];
        for (key, value) in initial {
            self.event_values.insert(key, value);
            sink.on_event(&PlaybackEvent::EventChanged { key, value });
        }
        self.initial_state_sent = true;
    }

    /// Bar and beat phase, measured from the timing point in effect before
    /// this tick.
    fn update_phase(&mut self, new_time: MapTime) {
        let Some(tp) = self.current_timing_point().cloned() else {
            return;
        };
        let bar_duration = tp.beat_duration * tp.numerator as f64;
        if !(bar_duration.is_finite() && bar_duration > 0.0) {
            return;
        }
        let effective_time = new_time as f64 - tp.time as f64;
        self.bar_time = (effective_time / bar_duration % 1.0) as f32;
        self.beat_time = (effective_time / tp.beat_duration % 1.0) as f32;
    }

    fn advance_timing(&mut self, sink: &mut impl PlaybackListener) {
        let next = self
            .timing
            .seek_point(self.chart.timing_points(), self.playback_time, false);
        if next != self.timing {
            self.timing = next;
            log::trace!(
                target: "playback",
                "timing point {} in effect at {}",
                next.index(),
                self.playback_time
            );
            sink.on_event(&PlaybackEvent::TimingPointChanged(next.index()));
        }
    }

    fn advance_lane_toggles(&mut self, sink: &mut impl PlaybackListener) {
        let next =
            self.lane_toggle
                .seek_point(self.chart.lane_toggle_points(), self.playback_time, false);
        if next != self.lane_toggle {
            self.lane_toggle = next;
            sink.on_event(&PlaybackEvent::LaneToggleChanged(next.index()));
        }
    }

    /// Buttons, holds and events entering the hittable window.
    fn enter_objects(&mut self, sink: &mut impl PlaybackListener) {
        let chart = self.chart;
        let objects = chart.objects();
        let horizon = self
            .playback_time
            .saturating_add(self.config.hittable_object_enter);
        let end = self.object.seek_object(objects, horizon, false);

        for (index, object) in objects
            .iter()
            .enumerate()
            .take(end.index())
            .skip(self.object.index())
        {
            if object.is_laser() || !self.view_range.includes(object.time(), false) {
                continue;
            }
            if let ChartObject::Hold(hold) = object {
                if !self.view_range.includes(hold.end_time(), true) {
                    continue;
                }
            }

            let id = ObjectId::new(index);
            if matches!(object, ChartObject::Single(_) | ChartObject::Hold(_)) {
                self.holds.add_unique(id);
            }
            if self.hittable.add_unique(id) {
                sink.on_event(&PlaybackEvent::ObjectEntered(id));
            }
        }
        self.object = end;
    }

    fn enter_lasers(&mut self, sink: &mut impl PlaybackListener) {
        let chart = self.chart;
        let objects = chart.objects();
        let horizon = self
            .playback_time
            .saturating_add(self.config.hittable_laser_enter);
        let end = self.laser.seek_object(objects, horizon, false);

        for (index, object) in objects
            .iter()
            .enumerate()
            .take(end.index())
            .skip(self.laser.index())
        {
            let ChartObject::Laser(laser) = object else {
                continue;
            };
            if !self.view_range.includes(laser.time, false)
                || !self.view_range.includes(laser.end_time(), true)
            {
                continue;
            }

            let id = ObjectId::new(index);
            self.holds.add_unique(id);
            if self.hittable.add_unique(id) {
                sink.on_event(&PlaybackEvent::ObjectEntered(id));
            }
        }
        self.laser = end;
    }

    /// Heads of upcoming laser chains. Notification only.
    fn alert_lasers(&mut self, sink: &mut impl PlaybackListener) {
        let chart = self.chart;
        let objects = chart.objects();
        let horizon = self
            .playback_time
            .saturating_add(self.config.alert_laser_threshold);
        let end = self.alert.seek_object(objects, horizon, false);

        for (index, object) in objects
            .iter()
            .enumerate()
            .take(end.index())
            .skip(self.alert.index())
        {
            let ChartObject::Laser(laser) = object else {
                continue;
            };
            if self.view_range.includes(laser.time, false) && laser.is_head() {
                sink.on_event(&PlaybackEvent::LaserAlertEntered(ObjectId::new(index)));
            }
        }
        self.alert = end;
    }

    /// Drop passed objects, start hold effects and fire due events.
    fn sweep_hittable(&mut self, sink: &mut impl PlaybackListener) {
        let chart = self.chart;
        let now = self.playback_time;
        let pass_time = now.saturating_sub(self.config.hittable_object_leave);
        let audio_time = now.saturating_add(self.config.audio_offset);

        let effects = &mut self.effects;
        let event_values = &mut self.event_values;
        let track_roll = &mut self.track_roll;
        let last_track_roll_change = &mut self.last_track_roll_change;

        self.hittable.retain(|&id| {
            let Some(object) = chart.object(id) else {
                return false;
            };
            match object {
                ChartObject::Hold(hold) => {
                    let end = hold.end_time();
                    if end < pass_time {
                        sink.on_event(&PlaybackEvent::ObjectLeaved(id));
                        return false;
                    }
                    // FxEnd fires once the hold ends, so an ended hold never restarts
                    let in_span = hold.time.saturating_sub(FX_GUARD) <= audio_time
                        && end.saturating_sub(FX_GUARD) > audio_time
                        && end >= now;
                    if !hold.effect_type.is_none() && in_span && effects.add_unique(id) {
                        sink.on_event(&PlaybackEvent::FxBegin(id));
                    }
                    true
                }
                ChartObject::Laser(laser) => {
                    if laser.end_time() < pass_time {
                        sink.on_event(&PlaybackEvent::ObjectLeaved(id));
                        return false;
                    }
                    true
                }
                ChartObject::Single(button) => {
                    if button.time < pass_time {
                        sink.on_event(&PlaybackEvent::ObjectLeaved(id));
                        return false;
                    }
                    true
                }
                ChartObject::Event(event) => {
                    if event.time >= now.saturating_add(EVENT_SLACK) {
                        return true;
                    }
                    if event.key == EventKey::TrackRollBehaviour {
                        if let Some(roll) = event.data.as_roll() {
                            if *track_roll != roll {
                                *track_roll = roll;
                                *last_track_roll_change = event.time;
                            }
                        }
                    }
                    sink.on_event(&PlaybackEvent::EventChanged {
                        key: event.key,
                        value: event.data,
                    });
                    event_values.insert(event.key, event.data);
                    false
                }
            }
        });
    }

    /// Drop passed holds, lasers and buttons from the hold set. Effects end
    /// as soon as their hold ends, before the trailing window.
    fn sweep_holds(&mut self, sink: &mut impl PlaybackListener) {
        let chart = self.chart;
        let now = self.playback_time;
        let pass_time = now.saturating_sub(self.config.hittable_object_leave);
        let effects = &mut self.effects;

        self.holds.retain(|&id| match chart.object(id) {
            Some(ChartObject::Hold(hold)) => {
                let end = hold.end_time();
                if end < now && effects.remove(id) {
                    sink.on_event(&PlaybackEvent::FxEnd(id));
                }
                end >= pass_time
            }
            Some(ChartObject::Laser(laser)) => laser.end_time() >= pass_time,
            Some(ChartObject::Single(button)) => button.time >= pass_time,
            Some(ChartObject::Event(_)) | None => false,
        });
    }
}
