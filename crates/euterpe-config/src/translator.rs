use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_provider() -> String {
    "deepl".to_string()
}

fn default_api_url() -> String {
    "https://api-free.deepl.com/v2/translate".to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Machine translation of non-English lyrics. Rows are always translated
/// into English.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TranslatorConfig {
    /// When off, the translate step copies its input through unchanged
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// `deepl` or `libretranslate`
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Per-request limit; a request that runs over counts as a failed translation
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            provider: default_provider(),
            api_key: String::new(),
            api_url: default_api_url(),
            timeout_seconds: default_timeout(),
        }
    }
}
