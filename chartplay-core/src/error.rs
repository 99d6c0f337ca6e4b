//! Error types for playback and configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors reported by [`ChartPlayback`](crate::ChartPlayback).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaybackError {
    /// The chart carries no objects, so there is nothing to play back.
    #[error("chart has no objects to play back")]
    NoObjects,
}

/// Errors reported while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
