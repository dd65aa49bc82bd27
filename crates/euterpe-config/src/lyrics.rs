use serde::{Deserialize, Serialize};

fn default_api_url() -> String {
    "https://api.lyrics.ovh".to_string()
}

fn default_timeout_seconds() -> u64 {
    15
}

fn default_sleep_ms() -> u64 {
    200
}

fn default_checkpoint_every() -> usize {
    100
}

fn default_max_retries() -> u32 {
    6
}

fn default_backoff_factor_secs() -> f64 {
    1.0
}

fn default_max_backoff_secs() -> u64 {
    120
}

fn default_retry_statuses() -> Vec<u16> {
    vec![429, 500, 502, 503, 504]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LyricsConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Per request timeout
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// Fixed pause after every lookup
    #[serde(default = "default_sleep_ms")]
    pub sleep_ms: u64,
    /// Rows attempted between checkpoint writes
    #[serde(default = "default_checkpoint_every")]
    pub checkpoint_every: usize,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Backoff before retry n is `factor * 2^n` seconds
    #[serde(default = "default_backoff_factor_secs")]
    pub backoff_factor_secs: f64,
    #[serde(default = "default_max_backoff_secs")]
    pub max_backoff_secs: u64,
    /// Statuses retried before being surfaced
    #[serde(default = "default_retry_statuses")]
    pub retry_statuses: Vec<u16>,
}

impl Default for LyricsConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_seconds: default_timeout_seconds(),
            sleep_ms: default_sleep_ms(),
            checkpoint_every: default_checkpoint_every(),
            max_retries: default_max_retries(),
            backoff_factor_secs: default_backoff_factor_secs(),
            max_backoff_secs: default_max_backoff_secs(),
            retry_statuses: default_retry_statuses(),
        }
    }
}
