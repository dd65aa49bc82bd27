use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use euterpe_config::lyrics::LyricsConfig;
use euterpe_core::table;
use euterpe_types::{ChartEntry, LyricsRecord, SongKey};

use crate::error::LyricsError;
use crate::lyrics::LyricsClient;

pub const LYRICS_COLUMNS: [&str; 5] = ["year", "rank", "artist", "song", "lyrics"];

/// Fills in lyrics for a chart listing, resuming from and checkpointing to one file
pub struct LyricsFetcher<'a> {
    client: &'a LyricsClient,
    checkpoint: PathBuf,
    checkpoint_every: usize,
    pause: Duration,
}

impl<'a> LyricsFetcher<'a> {
    pub fn new(client: &'a LyricsClient, checkpoint: PathBuf, config: &LyricsConfig) -> Self {
        Self {
            client,
            checkpoint,
            checkpoint_every: config.checkpoint_every.max(1),
            pause: Duration::from_millis(config.sleep_ms),
        }
    }

    pub async fn run(&self, entries: Vec<ChartEntry>) -> Result<Vec<LyricsRecord>, LyricsError> {
        let mut records: Vec<LyricsRecord> = entries
            .into_iter()
            .map(LyricsRecord::from)
            .map(normalize_quotes)
            .collect();

        self.resume(&mut records)?;

        let mut attempted = 0;
        let mut found = 0;
        for idx in 0..records.len() {
            let record = &records[idx];
            if record.lyrics.is_some() || record.song.is_empty() {
                continue;
            }
            let Some(artist) = record.artist.as_deref() else {
                continue;
            };

            let lyrics = self.client.fetch(artist, &record.song).await?;
            if lyrics.is_some() {
                found += 1;
            }
            records[idx].lyrics = lyrics;
            attempted += 1;

            if attempted % self.checkpoint_every == 0 {
                table::write_csv(&self.checkpoint, &records)?;
                tracing::info!("Checkpoint after {attempted} lookups ({found} found)");
            }

            tokio::time::sleep(self.pause).await;
        }

        table::write_csv(&self.checkpoint, &records)?;
        let with_lyrics = records.iter().filter(|r| r.lyrics.is_some()).count();
        tracing::info!(
            "Lyrics done: {attempted} lookups, {with_lyrics}/{} rows have lyrics",
            records.len()
        );
        Ok(records)
    }

    /// Prefill rows from a previous partial run
    fn resume(&self, records: &mut [LyricsRecord]) -> Result<(), LyricsError> {
        if !self.checkpoint.exists() {
            return Ok(());
        }

        let previous: Vec<LyricsRecord> = table::read_csv(&self.checkpoint, &LYRICS_COLUMNS)?;
        let mut known: HashMap<SongKey, String> = HashMap::new();
        for record in previous {
            let key = record.key();
            if let Some(lyrics) = record.lyrics {
                known.entry(key).or_insert(lyrics);
            }
        }

        let mut prefilled = 0;
        for record in records.iter_mut().filter(|r| r.lyrics.is_none()) {
            if let Some(lyrics) = known.get(&record.key()) {
                record.lyrics = Some(lyrics.clone());
                prefilled += 1;
            }
        }
        tracing::info!(
            "Resumed {prefilled} rows from {}",
            self.checkpoint.display()
        );
        Ok(())
    }
}

/// Drop quote characters the lookup API chokes on. Empty artists become absent.
fn normalize_quotes(mut record: LyricsRecord) -> LyricsRecord {
    let strip = |s: &str| s.replace(['"', '\''], "").trim().to_string();
    record.song = strip(&record.song);
    record.artist = record
        .artist
        .as_deref()
        .map(strip)
        .filter(|a| !a.is_empty());
    record
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::{Path, State};
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use tokio::net::TcpListener;

    use super::*;

    type Seen = Arc<Mutex<Vec<String>>>;

    async fn lyrics_api(seen: Seen) -> String {
        let app = Router::new()
            .route(
                "/v1/{artist}/{title}",
                get(
                    |State(seen): State<Seen>, Path((artist, title)): Path<(String, String)>| async move {
                        seen.lock().unwrap().push(title.clone());
                        match title.as_str() {
                            "Missing" => Err(StatusCode::NOT_FOUND),
                            "Broken" => Err(StatusCode::FORBIDDEN),
                            _ => Ok(Json(json!({ "lyrics": format!("{title} by {artist}") }))),
                        }
                    },
                ),
            )
            .with_state(seen);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn config(api_url: String, checkpoint_every: usize) -> LyricsConfig {
        LyricsConfig {
            api_url,
            sleep_ms: 0,
            checkpoint_every,
            backoff_factor_secs: 0.0,
            ..LyricsConfig::default()
        }
    }

    fn entry(rank: u32, song: &str, artist: Option<&str>) -> ChartEntry {
        ChartEntry {
            year: 1984,
            rank,
            song: song.to_string(),
            artist: artist.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn fetches_and_checkpoints() {
        let dir = tempfile::tempdir().unwrap();
        let checkpoint = dir.path().join("raw").join("with_lyrics.csv");
        let seen = Seen::default();
        let config = config(lyrics_api(seen.clone()).await, 1);
        let client = LyricsClient::new(&config).unwrap();

        let records = LyricsFetcher::new(&client, checkpoint.clone(), &config)
            .run(vec![
                entry(1, "\"When Doves Cry\"", Some("Prince")),
                entry(2, "Missing", Some("Nobody")),
                entry(3, "Jump", None),
            ])
            .await
            .unwrap();

        assert_eq!(records[0].song, "When Doves Cry");
        assert_eq!(records[0].lyrics.as_deref(), Some("When Doves Cry by Prince"));
        assert_eq!(records[1].lyrics, None);
        assert_eq!(records[2].lyrics, None);
        assert_eq!(seen.lock().unwrap().len(), 2);

        let saved: Vec<LyricsRecord> = table::read_csv(&checkpoint, &LYRICS_COLUMNS).unwrap();
        assert_eq!(saved, records);
    }

    #[tokio::test]
    async fn resume_skips_known_rows() {
        let dir = tempfile::tempdir().unwrap();
        let checkpoint = dir.path().join("with_lyrics.csv");
        let mut previous = LyricsRecord::from(entry(1, "Thriller", Some("Michael Jackson")));
        previous.lyrics = Some("cached".to_string());
        table::write_csv(&checkpoint, &[previous]).unwrap();

        let seen = Seen::default();
        let config = config(lyrics_api(seen.clone()).await, 100);
        let client = LyricsClient::new(&config).unwrap();

        let records = LyricsFetcher::new(&client, checkpoint, &config)
            .run(vec![
                entry(1, "Thriller", Some("Michael Jackson")),
                entry(2, "Beat It", Some("Michael Jackson")),
            ])
            .await
            .unwrap();

        assert_eq!(records[0].lyrics.as_deref(), Some("cached"));
        assert_eq!(records[1].lyrics.as_deref(), Some("Beat It by Michael Jackson"));
        assert_eq!(*seen.lock().unwrap(), vec!["Beat It".to_string()]);
    }

    #[tokio::test]
    async fn http_error_aborts_and_keeps_last_checkpoint() {
        let dir = tempfile::tempdir().unwrap();
        let checkpoint = dir.path().join("with_lyrics.csv");
        let seen = Seen::default();
        let config = config(lyrics_api(seen.clone()).await, 1);
        let client = LyricsClient::new(&config).unwrap();

        let err = LyricsFetcher::new(&client, checkpoint.clone(), &config)
            .run(vec![
                entry(1, "Hello", Some("Lionel Richie")),
                entry(2, "Broken", Some("Someone")),
                entry(3, "Never Reached", Some("Someone")),
            ])
            .await
            .unwrap_err();
        assert!(matches!(err, LyricsError::Http { status: 403, .. }));

        let saved: Vec<LyricsRecord> = table::read_csv(&checkpoint, &LYRICS_COLUMNS).unwrap();
        assert_eq!(saved[0].lyrics.as_deref(), Some("Hello by Lionel Richie"));
        assert_eq!(saved[1].lyrics, None);
        assert!(!seen.lock().unwrap().contains(&"Never Reached".to_string()));
    }

    #[test]
    fn quotes_are_stripped_and_blank_artist_is_absent() {
        let record = normalize_quotes(LyricsRecord::from(entry(1, " 'Rock' \"n\" Roll ", Some("'\""))));
        assert_eq!(record.song, "Rock n Roll");
        assert_eq!(record.artist, None);
    }
}
