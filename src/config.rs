//! Session configuration read from the environment.
//!
//! Every value has a default; missing or unparsable variables fall back to it
//! silently so a bare environment always produces a usable session.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;
use std::time::Duration;

use scene::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

const DEFAULT_CAPTURE_DEBOUNCE_MS: u64 = 500;
const DEFAULT_GALLERY_PATH: &str = "museum-gallery-storage.json";

/// Tunables for one editing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Quiet period before a burst of scene edits becomes one history entry.
    pub capture_debounce: Duration,
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Seed for style jitter and palette picks. `None` draws from OS entropy.
    pub rng_seed: Option<u64>,
    pub gallery_path: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            capture_debounce: Duration::from_millis(DEFAULT_CAPTURE_DEBOUNCE_MS),
            canvas_width: DEFAULT_WIDTH,
            canvas_height: DEFAULT_HEIGHT,
            rng_seed: None,
            gallery_path: PathBuf::from(DEFAULT_GALLERY_PATH),
        }
    }
}

impl SessionConfig {
    /// Build config from `ATELIER_*` environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            capture_debounce: Duration::from_millis(env_parse(
                "ATELIER_CAPTURE_DEBOUNCE_MS",
                DEFAULT_CAPTURE_DEBOUNCE_MS,
            )),
            canvas_width: env_parse("ATELIER_CANVAS_WIDTH", defaults.canvas_width),
            canvas_height: env_parse("ATELIER_CANVAS_HEIGHT", defaults.canvas_height),
            rng_seed: std::env::var("ATELIER_RNG_SEED")
                .ok()
                .and_then(|v| v.parse().ok()),
            gallery_path: std::env::var("ATELIER_GALLERY_PATH")
                .map_or(defaults.gallery_path, PathBuf::from),
        }
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}
