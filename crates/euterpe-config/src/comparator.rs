use serde::{Deserialize, Serialize};

fn default_sample_rows() -> usize {
    3000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparatorConfig {
    /// Rows both taggers are timed over
    #[serde(default = "default_sample_rows")]
    pub sample_rows: usize,
}

impl Default for ComparatorConfig {
    fn default() -> Self {
        Self {
            sample_rows: default_sample_rows(),
        }
    }
}
