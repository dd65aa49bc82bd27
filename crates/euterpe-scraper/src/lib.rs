pub mod chart;
pub mod error;
pub mod fetcher;
pub mod lyrics;
pub mod retry;

pub use chart::{ChartPageParser, ChartScraper, WikitableParser};
pub use error::{LyricsError, ScrapeError};
pub use fetcher::LyricsFetcher;
pub use lyrics::LyricsClient;
pub use retry::RetryPolicy;
