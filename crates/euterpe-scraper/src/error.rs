use euterpe_core::PipelineError;

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("Network error fetching {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("Failed to build HTTP client: {0}")]
    Client(reqwest::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum LyricsError {
    #[error("Lyrics lookup returned HTTP {status} for {url}")]
    Http { status: u16, url: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(reqwest::Error),

    #[error(transparent)]
    Snapshot(#[from] PipelineError),
}
