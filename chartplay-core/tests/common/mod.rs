#![allow(dead_code)]
//! Test harness utilities for chartplay-core integration tests.

use std::path::PathBuf;

use serde::Deserialize;

use chartplay_core::{ChartPlayback, PlaybackEvent};
use chartplay_types::{
    Chart, ChartObject, ChartSettings, LaneTogglePoint, MapTime, ObjectId, TimingPoint,
};

/// On-disk layout of a test chart.
#[derive(Deserialize)]
struct ChartFixture {
    #[serde(default)]
    settings: ChartSettings,
    timing_points: Vec<TimingPoint>,
    #[serde(default)]
    lane_toggle_points: Vec<LaneTogglePoint>,
    objects: Vec<ChartObject>,
}

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Load `tests/fixtures/<name>` into a chart.
pub fn load_chart(name: &str) -> Chart {
    let text = std::fs::read_to_string(fixture_path(name)).expect("read chart fixture");
    let fixture: ChartFixture = serde_json::from_str(&text).expect("parse chart fixture");
    Chart::new(
        fixture.settings,
        fixture.timing_points,
        fixture.lane_toggle_points,
        fixture.objects,
    )
}

/// Feed every time in `times` to the playback, recording events with the
/// tick that produced them.
pub fn run(
    playback: &mut ChartPlayback<'_>,
    times: impl IntoIterator<Item = MapTime>,
) -> Vec<(MapTime, PlaybackEvent)> {
    let mut log = Vec::new();
    for time in times {
        playback.update(time, &mut |event: &PlaybackEvent| log.push((time, *event)));
    }
    log
}

/// Frame times from `start` to `end` inclusive, `step` apart.
pub fn frames(start: MapTime, end: MapTime, step: usize) -> Vec<MapTime> {
    (start..=end).step_by(step).collect()
}

/// Positions in `log` of events matching `pred`.
pub fn positions(
    log: &[(MapTime, PlaybackEvent)],
    pred: impl Fn(&PlaybackEvent) -> bool,
) -> Vec<usize> {
    log.iter()
        .enumerate()
        .filter(|(_, (_, event))| pred(event))
        .map(|(i, _)| i)
        .collect()
}

pub fn entered(log: &[(MapTime, PlaybackEvent)], id: ObjectId) -> Vec<usize> {
    positions(log, |e| *e == PlaybackEvent::ObjectEntered(id))
}

pub fn leaved(log: &[(MapTime, PlaybackEvent)], id: ObjectId) -> Vec<usize> {
    positions(log, |e| *e == PlaybackEvent::ObjectLeaved(id))
}
