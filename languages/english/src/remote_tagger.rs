use std::time::Duration;

use async_trait::async_trait;
use euterpe_core::tagger::{PosTagger, TaggerError};
use euterpe_types::{TaggedToken, Tagset};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct TagRequest<'a> {
    text: String,
    words: &'a [String],
}

#[derive(Deserialize)]
struct TagResponse {
    tokens: Vec<RemoteToken>,
}

#[derive(Deserialize)]
struct RemoteToken {
    text: String,
    pos: String,
}

/// Client for an external tagging service that emits universal tags natively.
///
/// The service receives the tokens both as a space-joined text and as a word
/// list, and must answer with exactly one token per input word.
pub struct RemoteTagger {
    client: reqwest::Client,
    url: String,
}

impl RemoteTagger {
    pub fn new(url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    pub fn with_timeout(url: String, timeout: Duration) -> Result<Self, TaggerError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TaggerError::Backend(e.to_string()))?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl PosTagger for RemoteTagger {
    fn name(&self) -> &str {
        "remote (universal)"
    }

    fn tagset(&self) -> Tagset {
        Tagset::Universal
    }

    async fn tag(&self, tokens: &[String]) -> Result<Vec<TaggedToken>, TaggerError> {
        let request = TagRequest {
            text: tokens.join(" "),
            words: tokens,
        };

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| TaggerError::Backend(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TaggerError::Http {
                status: response.status().as_u16(),
            });
        }

        let body: TagResponse = response
            .json()
            .await
            .map_err(|e| TaggerError::Backend(format!("Failed to parse response: {e}")))?;

        if body.tokens.len() != tokens.len() {
            return Err(TaggerError::Misaligned {
                expected: tokens.len(),
                got: body.tokens.len(),
            });
        }

        Ok(body
            .tokens
            .into_iter()
            .map(|t| TaggedToken::new(t.text, t.pos))
            .collect())
    }
}
