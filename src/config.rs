use orbiter_core::EulerDegrees;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;

const DEFAULT_CONFIG_PATH: &str = "config/orbiter.toml";
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Maximum ticks before the session ends on its own.
    pub ticks: u64,
    /// Elapsed seconds reported to behaviours each tick.
    pub tick_seconds: f32,
    /// Trigger a swap once this many ticks have completed (0 = before the first).
    pub swap_at_tick: Option<u64>,
    /// Orientation the entity spawns with.
    pub start_orientation: EulerDegrees,
    /// JSONL file receiving every tick and diagnostic.
    pub event_log: Option<PathBuf>,
    /// JSON file receiving the run report.
    pub report: Option<PathBuf>,
    /// Tracing filter used when neither `RUST_LOG` nor `--log-filter` is set.
    pub log_filter: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ticks: 600,
            tick_seconds: 1.0 / 60.0,
            swap_at_tick: None,
            start_orientation: EulerDegrees::ZERO,
            event_log: None,
            report: None,
            log_filter: None,
        }
    }
}

impl SessionConfig {
    /// Tracing filter to install when `RUST_LOG` is unset.
    pub fn effective_log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    /// Load session configuration from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<SessionConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    SessionConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_CONFIG_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                } else {
                    warn!(
                        "Session config not found at {}. Using defaults",
                        path.display()
                    );
                }
                SessionConfig::default()
            }
        }
    }
}
