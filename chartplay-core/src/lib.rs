//! # chartplay-core
//!
//! Playback engine for rhythm-game charts. Given a non-decreasing playback
//! clock, [`ChartPlayback`] works out which chart objects are currently
//! relevant, reports enter/leave/effect/parameter changes exactly once, and
//! converts between durations and tempo-relative scroll distance.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use chartplay_core::{ChartPlayback, PlaybackConfig, PlaybackEvent};
//!
//! let config = PlaybackConfig::load();
//! let mut playback = ChartPlayback::new(&chart, config);
//! playback.reset(0, 0)?;
//!
//! let mut events: Vec<PlaybackEvent> = Vec::new();
//! for frame_time in clock {
//!     playback.update(frame_time, &mut events);
//!     for event in events.drain(..) {
//!         // react to ObjectEntered, FxBegin, EventChanged, ...
//!     }
//! }
//! ```
//!
//! ## Module Overview
//!
//! - [`playback`]: `ChartPlayback`: cursors, active sets, tick logic, tempo
//!   conversions and range queries
//! - [`config`]: TOML configuration of horizons (embedded + user override)
//! - [`events`]: `PlaybackEvent` and the `PlaybackListener` sink
//! - [`cursor`]: forward-only cursors over sorted chart sequences

pub mod active_set;
pub mod config;
pub mod cursor;
mod error;
pub mod events;
pub mod playback;
mod view_range;

pub use active_set::ObjectSet;
pub use config::PlaybackConfig;
pub use error::{ConfigError, PlaybackError};
pub use events::{PlaybackEvent, PlaybackListener};
pub use playback::{BeatCount, ChartPlayback};
pub use view_range::ViewRange;
