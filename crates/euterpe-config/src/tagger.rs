use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Backend used for the universal-tagset stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UniversalBackend {
    /// Closed-class and suffix rules, independent of the Penn lexicon
    #[default]
    Rules,
    /// Lexicon tagger output mapped from Penn to universal tags
    Mapped,
    /// External tagging service that emits universal tags natively
    Remote,
}

fn default_remote_url() -> String {
    "http://localhost:8080/tag".to_string()
}

fn default_remote_timeout() -> u64 {
    30
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TaggerConfig {
    /// Extra `word<TAB>TAG` entries layered over the built-in lexicon
    pub lexicon_path: Option<PathBuf>,
    pub universal_backend: UniversalBackend,
    #[serde(default = "default_remote_url")]
    pub remote_url: String,
    #[serde(default = "default_remote_timeout")]
    pub remote_timeout_seconds: u64,
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self {
            lexicon_path: None,
            universal_backend: UniversalBackend::default(),
            remote_url: default_remote_url(),
            remote_timeout_seconds: default_remote_timeout(),
        }
    }
}
