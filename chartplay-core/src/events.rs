//! Notifications emitted by [`ChartPlayback`](crate::ChartPlayback).

use chartplay_types::{EventData, EventKey, ObjectId};

/// A lifecycle or parameter change observed during a playback tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackEvent {
    /// Object entered its lookahead window and became hittable.
    ObjectEntered(ObjectId),
    /// Object passed its trailing window.
    ObjectLeaved(ObjectId),
    /// Index of the timing point now in effect.
    TimingPointChanged(usize),
    /// Index of the lane toggle point now in effect.
    LaneToggleChanged(usize),
    /// Upcoming laser that starts a new chain.
    LaserAlertEntered(ObjectId),
    EventChanged { key: EventKey, value: EventData },
    /// Hold with an effect became held.
    FxBegin(ObjectId),
    FxEnd(ObjectId),
}

/// Receiver of playback notifications.
///
/// Notifications are delivered synchronously, in emission order, from inside
/// [`ChartPlayback::update`](crate::ChartPlayback::update). The listener is
/// borrowed for the duration of the call only, so it cannot reach back into
/// the playback that is driving it.
pub trait PlaybackListener {
    fn on_event(&mut self, event: &PlaybackEvent);
}

impl PlaybackListener for Vec<PlaybackEvent> {
    fn on_event(&mut self, event: &PlaybackEvent) {
        self.push(*event);
    }
}

impl<F: FnMut(&PlaybackEvent)> PlaybackListener for F {
    fn on_event(&mut self, event: &PlaybackEvent) {
        self(event)
    }
}

/// Discards every notification.
impl PlaybackListener for () {
    fn on_event(&mut self, _event: &PlaybackEvent) {}
}
