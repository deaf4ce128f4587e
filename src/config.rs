//! Library configuration.
//!
//! Policy values for the scheduler, alert and exchange paths, grouped into
//! sections. The library does no file I/O of its own; the embedding
//! application deserializes a [`Config`] from its settings store (or takes
//! the defaults) and hands the sections to the components that need them.

use serde::{Deserialize, Serialize};

/// Scheduling loop configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// How often the armed scheduler samples the wall clock, in milliseconds.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// Width of the match window leading up to a scheduled time, in
    /// seconds. An entry matches while `0 <= entry - now < match_window_secs`.
    #[serde(default = "default_match_window_secs")]
    pub match_window_secs: u32,
}

/// Alert configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    /// How long an alert runs before it stops itself, in seconds.
    #[serde(default = "default_alert_duration_secs")]
    pub duration_secs: u64,
    /// Name of the sound resource handed to the playback backend.
    #[serde(default = "default_alert_sound")]
    pub sound: String,
}

/// Schedule exchange configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeConfig {
    /// Upper bound on the serialized payload, in bytes. The default is the
    /// binary capacity of the largest low-ECC QR symbol.
    #[serde(default = "default_max_payload_bytes")]
    pub max_payload_bytes: usize,
    /// Minimum number of schedule entries before a code may be rendered.
    #[serde(default = "default_min_share_entries")]
    pub min_share_entries: usize,
}

/// Library configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub alert: AlertConfig,
    #[serde(default)]
    pub exchange: ExchangeConfig,
}

// Default functions
fn default_tick_interval_ms() -> u64 {
    1000
}
fn default_match_window_secs() -> u32 {
    60
}
fn default_alert_duration_secs() -> u64 {
    10
}
fn default_alert_sound() -> String {
    "break_sound".into()
}
fn default_max_payload_bytes() -> usize {
    2953
}
fn default_min_share_entries() -> usize {
    3
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            match_window_secs: default_match_window_secs(),
        }
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            duration_secs: default_alert_duration_secs(),
            sound: default_alert_sound(),
        }
    }
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            max_payload_bytes: default_max_payload_bytes(),
            min_share_entries: default_min_share_entries(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scheduler: SchedulerConfig::default(),
            alert: AlertConfig::default(),
            exchange: ExchangeConfig::default(),
        }
    }
}
