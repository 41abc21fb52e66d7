//! Tracker configuration.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const VIEW_DISTANCE_ENV: &str = "MC_ENTITY_VIEW_DISTANCE";
pub const PARALLEL_GATHER_THRESHOLD_ENV: &str = "MC_PARALLEL_GATHER_THRESHOLD";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Radius in chunks within which entities see each other.
    pub view_distance: u32,
    /// Chunk-range gathers covering at least this many cells are unioned in
    /// parallel.
    pub parallel_gather_threshold: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            view_distance: 5,
            parallel_gather_threshold: 256,
        }
    }
}

impl TrackerConfig {
    /// Defaults, overridden by `MC_ENTITY_VIEW_DISTANCE` and
    /// `MC_PARALLEL_GATHER_THRESHOLD` when they are set and parse.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            view_distance: env_or(VIEW_DISTANCE_ENV, defaults.view_distance),
            parallel_gather_threshold: env_or(
                PARALLEL_GATHER_THRESHOLD_ENV,
                defaults.parallel_gather_threshold,
            ),
        }
    }
}

/// Parse an environment variable, keeping `default` when it is unset or
/// malformed.
pub fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
