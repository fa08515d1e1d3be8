use clap::Parser;
use std::path::PathBuf;

use crate::config::SessionConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless host for the fixed-spin entity behaviour", long_about = None)]
pub struct Args {
    /// Session config (TOML); defaults to config/orbiter.toml
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Maximum number of ticks to run
    #[arg(long)]
    pub ticks: Option<u64>,

    /// Seconds reported to behaviours per tick
    #[arg(long)]
    pub tick_seconds: Option<f32>,

    /// Trigger a swap once this many ticks have completed
    #[arg(long)]
    pub swap_at_tick: Option<u64>,

    /// Write every tick and diagnostic to this JSONL file
    #[arg(long)]
    pub event_log: Option<PathBuf>,

    /// Write the run report to this JSON file
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset; beats the config's log_filter
    #[arg(long)]
    pub log_filter: Option<String>,
}

impl Args {
    /// Layer command-line values over `config`.
    pub fn apply_overrides(&self, mut config: SessionConfig) -> SessionConfig {
        if let Some(ticks) = self.ticks {
            config.ticks = ticks;
        }
        if let Some(seconds) = self.tick_seconds {
            config.tick_seconds = seconds;
        }
        if self.swap_at_tick.is_some() {
            config.swap_at_tick = self.swap_at_tick;
        }
        if let Some(path) = &self.event_log {
            config.event_log = Some(path.clone());
        }
        if let Some(path) = &self.report {
            config.report = Some(path.clone());
        }
        if let Some(filter) = &self.log_filter {
            config.log_filter = Some(filter.clone());
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_win_over_config() {
        let args = Args::try_parse_from([
            "orbiter",
            "--ticks",
            "12",
            "--swap-at-tick",
            "4",
            "--event-log",
            "out/events.jsonl",
        ])
        .expect("valid args");
        let config = args.apply_overrides(SessionConfig { ticks: 99, ..SessionConfig::default() });

        assert_eq!(config.ticks, 12);
        assert_eq!(config.swap_at_tick, Some(4));
        assert_eq!(config.event_log, Some(PathBuf::from("out/events.jsonl")));
        assert_eq!(config.tick_seconds, SessionConfig::default().tick_seconds);
    }

    #[test]
    fn absent_flags_keep_config() {
        let args = Args::try_parse_from(["orbiter"]).expect("valid args");
        let original = SessionConfig { swap_at_tick: Some(2), ..SessionConfig::default() };
        let config = args.apply_overrides(original.clone());

        assert_eq!(config, original);
        assert_eq!(config.effective_log_filter(), "warn");
    }

    #[test]
    fn log_filter_flag_beats_config() {
        let from_file = SessionConfig {
            log_filter: Some("orbiter=debug".to_string()),
            ..SessionConfig::default()
        };

        let args = Args::try_parse_from(["orbiter"]).expect("valid args");
        let config = args.apply_overrides(from_file.clone());
        assert_eq!(config.effective_log_filter(), "orbiter=debug");

        let args = Args::try_parse_from(["orbiter", "--log-filter", "info"]).expect("valid args");
        let config = args.apply_overrides(from_file);
        assert_eq!(config.effective_log_filter(), "info");
    }

    #[test]
    fn rejects_non_numeric_ticks() {
        assert!(Args::try_parse_from(["orbiter", "--ticks", "many"]).is_err());
    }
}
