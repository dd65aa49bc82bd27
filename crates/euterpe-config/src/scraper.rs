use serde::{Deserialize, Serialize};

fn default_start_year() -> i32 {
    1973
}

fn default_end_year() -> i32 {
    2024
}

fn default_base_url() -> String {
    "https://en.wikipedia.org/wiki/Billboard_Year-End_Hot_100_singles_of_".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64)".to_string()
}

fn default_timeout_seconds() -> u64 {
    20
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// First chart year, inclusive
    #[serde(default = "default_start_year")]
    pub start_year: i32,
    /// Last chart year, inclusive
    #[serde(default = "default_end_year")]
    pub end_year: i32,
    /// The year is appended to this URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            start_year: default_start_year(),
            end_year: default_end_year(),
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}
