use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use self::comparator::ComparatorConfig;
use self::dashboard::DashboardConfig;
use self::lyrics::LyricsConfig;
use self::paths::PathsConfig;
use self::scraper::ScraperConfig;
use self::tagger::{TaggerConfig, UniversalBackend};
use self::translator::TranslatorConfig;

pub mod comparator;
pub mod dashboard;
pub mod lyrics;
pub mod paths;
pub mod scraper;
pub mod tagger;
pub mod translator;

const DEFAULT_PROFILE: &str = "config.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub scraper: ScraperConfig,
    pub lyrics: LyricsConfig,
    pub translator: TranslatorConfig,
    pub tagger: TaggerConfig,
    pub comparator: ComparatorConfig,
    pub dashboard: DashboardConfig,
}

impl Config {
    /// `.env`, then the JSON profile (if any), then env overrides
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }

        let profile = env::var("EUTERPE_CONFIG").unwrap_or_else(|_| DEFAULT_PROFILE.to_string());
        let profile = Path::new(&profile);

        let mut config = if profile.exists() {
            Self::from_file(profile)?
        } else {
            tracing::debug!("No config profile at {}, using defaults", profile.display());
            Self::default()
        };

        config.apply_env();
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        tracing::info!("Loading config profile {}", path.display());
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Override the commonly tuned scalars from the environment
    pub fn apply_env(&mut self) {
        if let Ok(dir) = env::var("EUTERPE_DATA_DIR") {
            self.paths.data_dir = PathBuf::from(dir);
        }

        self.scraper.start_year = env_parse("EUTERPE_START_YEAR").unwrap_or(self.scraper.start_year);
        self.scraper.end_year = env_parse("EUTERPE_END_YEAR").unwrap_or(self.scraper.end_year);

        if let Ok(url) = env::var("LYRICS_API_URL") {
            self.lyrics.api_url = url;
        }
        self.lyrics.timeout_seconds =
            env_parse("LYRICS_TIMEOUT_SECONDS").unwrap_or(self.lyrics.timeout_seconds);
        self.lyrics.sleep_ms = env_parse("LYRICS_SLEEP_MS").unwrap_or(self.lyrics.sleep_ms);
        self.lyrics.checkpoint_every =
            env_parse("LYRICS_CHECKPOINT_EVERY").unwrap_or(self.lyrics.checkpoint_every);

        if let Ok(provider) = env::var("TRANSLATOR_PROVIDER") {
            self.translator.provider = provider;
        }
        if let Ok(key) = env::var("TRANSLATOR_API_KEY") {
            self.translator.api_key = key;
        }
        if let Ok(url) = env::var("TRANSLATOR_API_URL") {
            self.translator.api_url = url;
        }
        self.translator.timeout_seconds =
            env_parse("TRANSLATOR_TIMEOUT_SECONDS").unwrap_or(self.translator.timeout_seconds);

        if let Ok(path) = env::var("TAGGER_LEXICON_PATH") {
            self.tagger.lexicon_path = Some(PathBuf::from(path));
        }
        if let Ok(url) = env::var("TAGGER_REMOTE_URL") {
            self.tagger.remote_url = url;
            self.tagger.universal_backend = UniversalBackend::Remote;
        }

        if let Ok(bind) = env::var("DASHBOARD_BIND") {
            self.dashboard.bind = bind;
        }
        if let Ok(snapshot) = env::var("DASHBOARD_SNAPSHOT") {
            self.dashboard.snapshot = Some(PathBuf::from(snapshot));
        }
    }

    /// Snapshot the dashboard serves, defaulting to the universal tagger output
    pub fn dashboard_snapshot(&self) -> PathBuf {
        self.dashboard
            .snapshot
            .clone()
            .unwrap_or_else(|| self.paths.pos_universal_jsonl())
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_match_the_pipeline_constants() {
        let config = Config::default();

        assert_eq!(config.scraper.start_year, 1973);
        assert_eq!(config.scraper.end_year, 2024);
        assert_eq!(config.lyrics.max_retries, 6);
        assert_eq!(config.lyrics.checkpoint_every, 100);
        assert_eq!(config.lyrics.retry_statuses, vec![429, 500, 502, 503, 504]);
        assert_eq!(config.comparator.sample_rows, 3000);
        assert_eq!(config.tagger.universal_backend, UniversalBackend::Rules);
        assert_eq!(config.dashboard.bind, "127.0.0.1:8050");
    }

    #[test]
    fn partial_profile_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut file = File::create(&path).unwrap();
        write!(
            file,
            r#"{{ "paths": {{ "data_dir": "/tmp/euterpe" }}, "lyrics": {{ "sleep_ms": 0 }} }}"#
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();

        assert_eq!(config.paths.data_dir, PathBuf::from("/tmp/euterpe"));
        assert_eq!(config.lyrics.sleep_ms, 0);
        assert_eq!(config.lyrics.timeout_seconds, 15);
        assert_eq!(config.scraper.timeout_seconds, 20);
        assert_eq!(
            config.dashboard_snapshot(),
            PathBuf::from("/tmp/euterpe/results/pos_universal.jsonl")
        );
    }

    #[test]
    fn malformed_profile_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
