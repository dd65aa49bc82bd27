use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_bind() -> String {
    "127.0.0.1:8050".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Tagged snapshot to serve; the universal tagger output when unset
    pub snapshot: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            snapshot: None,
        }
    }
}
