use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

/// Snapshot locations. Each stage owns exactly one output file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl PathsConfig {
    pub fn raw_dir(&self) -> PathBuf {
        self.data_dir.join("raw")
    }

    pub fn processed_dir(&self) -> PathBuf {
        self.data_dir.join("processed")
    }

    pub fn results_dir(&self) -> PathBuf {
        self.data_dir.join("results")
    }

    pub fn chart_raw_csv(&self) -> PathBuf {
        self.raw_dir().join("top100_songs_raw.csv")
    }

    pub fn chart_clean_csv(&self) -> PathBuf {
        self.raw_dir().join("top100_songs_clean.csv")
    }

    /// Also the lyrics fetcher's checkpoint
    pub fn lyrics_csv(&self) -> PathBuf {
        self.raw_dir().join("top100_songs_with_lyrics.csv")
    }

    pub fn lyrics_clean_csv(&self) -> PathBuf {
        self.processed_dir().join("songs_with_lyrics_clean.csv")
    }

    pub fn language_csv(&self) -> PathBuf {
        self.processed_dir().join("songs_with_language.csv")
    }

    pub fn translated_csv(&self) -> PathBuf {
        self.processed_dir().join("songs_with_lyrics_translated.csv")
    }

    pub fn tokenized_jsonl(&self) -> PathBuf {
        self.processed_dir().join("songs_with_lyrics_tokenized.jsonl")
    }

    pub fn pos_penn_jsonl(&self) -> PathBuf {
        self.results_dir().join("pos_penn.jsonl")
    }

    pub fn pos_universal_jsonl(&self) -> PathBuf {
        self.results_dir().join("pos_universal.jsonl")
    }

    pub fn comparison_summary_csv(&self) -> PathBuf {
        self.results_dir().join("comparison_summary.csv")
    }

    pub fn tag_counts_csv(&self) -> PathBuf {
        self.results_dir().join("tag_counts.csv")
    }

    pub fn pos_by_year_csv(&self) -> PathBuf {
        self.results_dir().join("pos_comparison_by_year.csv")
    }

    pub fn pos_speed_csv(&self) -> PathBuf {
        self.results_dir().join("pos_speed_comparison.csv")
    }
}
