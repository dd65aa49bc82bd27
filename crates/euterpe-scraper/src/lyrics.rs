use std::time::Duration;

use euterpe_config::lyrics::LyricsConfig;
use serde_json::Value;

use crate::error::LyricsError;
use crate::retry::RetryPolicy;

/// REST lookup of lyrics keyed by artist and title
pub struct LyricsClient {
    client: reqwest::Client,
    api_url: String,
    policy: RetryPolicy,
}

impl LyricsClient {
    pub fn new(config: &LyricsConfig) -> Result<Self, LyricsError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(LyricsError::Client)?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            policy: RetryPolicy::new(config),
        })
    }

    pub fn lookup_url(&self, artist: &str, title: &str) -> String {
        format!(
            "{}/v1/{}/{}",
            self.api_url,
            urlencoding::encode(artist),
            urlencoding::encode(title)
        )
    }

    /// Lyrics for one song.
    ///
    /// Not found is `Ok(None)`, and so is a timeout or connection failure that
    /// outlived every retry. A status that is neither success nor not found is
    /// an error once retries (if any apply) are used up.
    pub async fn fetch(&self, artist: &str, title: &str) -> Result<Option<String>, LyricsError> {
        let url = self.lookup_url(artist, title);
        let mut retry = 0;

        loop {
            match self.client.get(&url).send().await {
                Ok(response) => {
                    let status = response.status().as_u16();
                    match status {
                        200 => return Ok(read_lyrics(response, &url).await),
                        404 => {
                            tracing::debug!("No lyrics for {artist} - {title}");
                            return Ok(None);
                        }
                        _ if self.policy.retries_status(status) && self.policy.can_retry(retry) => {
                            tracing::debug!("HTTP {status} from {url}, retry {}", retry + 1);
                        }
                        _ => return Err(LyricsError::Http { status, url }),
                    }
                }
                Err(e) if e.is_timeout() || e.is_connect() => {
                    if !self.policy.can_retry(retry) {
                        tracing::warn!("Giving up on {artist} - {title}: {e}");
                        return Ok(None);
                    }
                    tracing::debug!("Transport error for {url}, retry {}: {e}", retry + 1);
                }
                Err(e) => {
                    tracing::warn!("Request for {artist} - {title} failed: {e}");
                    return Ok(None);
                }
            }

            tokio::time::sleep(self.policy.backoff(retry)).await;
            retry += 1;
        }
    }
}

async fn read_lyrics(response: reqwest::Response, url: &str) -> Option<String> {
    match response.json::<Value>().await {
        Ok(body) => body["lyrics"]
            .as_str()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string),
        Err(e) => {
            tracing::warn!("Unreadable lyrics body from {url}: {e}");
            None
        }
    }
}
