use std::sync::LazyLock;
use std::time::Duration;

use euterpe_config::scraper::ScraperConfig;
use euterpe_types::ChartEntry;
use scraper::{ElementRef, Html, Selector};

use crate::error::ScrapeError;

static WIKITABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table.wikitable").expect("valid selector"));
static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").expect("valid selector"));
static CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").expect("valid selector"));
static LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").expect("valid selector"));

/// Turns one fetched chart page into entries.
///
/// Upstream markup changes without notice, so the heuristic lives behind this
/// trait and the scraper never looks at HTML itself.
pub trait ChartPageParser: Send + Sync {
    fn parse(&self, year: i32, html: &str) -> Vec<ChartEntry>;
}

/// Picks the wikitable whose text mentions both rank and artist, else the first one
#[derive(Debug, Default, Clone, Copy)]
pub struct WikitableParser;

impl ChartPageParser for WikitableParser {
    fn parse(&self, year: i32, html: &str) -> Vec<ChartEntry> {
        let document = Html::parse_document(html);
        let tables: Vec<ElementRef> = document.select(&WIKITABLE).collect();

        let Some(target) = tables
            .iter()
            .find(|table| {
                let text = joined_text(table).to_lowercase();
                text.contains("rank") && text.contains("artist")
            })
            .or_else(|| tables.first())
        else {
            tracing::warn!("{year}: no wikitable found");
            return Vec::new();
        };

        target
            .select(&ROW)
            .filter_map(|row| parse_row(year, row))
            .collect()
    }
}

fn parse_row(year: i32, row: ElementRef) -> Option<ChartEntry> {
    let cells: Vec<ElementRef> = row.select(&CELL).collect();
    let rank: u32 = joined_text(cells.first()?).parse().ok()?;

    let (song, artist) = if cells.len() >= 3 {
        let song = joined_text(&cells[1]);
        let song = song
            .trim_matches(|c| matches!(c, '"' | '“' | '”'))
            .trim()
            .to_string();
        (song, Some(joined_text(&cells[2])))
    } else {
        // Link text fallback: first link is the song, second the artist
        let links: Vec<String> = row.select(&LINK).map(|a| joined_text(&a)).collect();
        let song = links.first()?.clone();
        (song, links.get(1).cloned())
    };

    if song.is_empty() {
        return None;
    }

    Some(ChartEntry {
        year,
        rank,
        song,
        artist: artist.filter(|a| !a.is_empty()),
    })
}

/// Text nodes trimmed and joined with single spaces
fn joined_text(element: &ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

pub struct ChartScraper {
    client: reqwest::Client,
    base_url: String,
    parser: Box<dyn ChartPageParser>,
}

impl ChartScraper {
    pub fn new(config: &ScraperConfig) -> Result<Self, ScrapeError> {
        Self::with_parser(config, Box::new(WikitableParser))
    }

    pub fn with_parser(
        config: &ScraperConfig,
        parser: Box<dyn ChartPageParser>,
    ) -> Result<Self, ScrapeError> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(ScrapeError::Client)?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            parser,
        })
    }

    /// Entries for one year. A non-success status yields an empty listing.
    pub async fn fetch_year(&self, year: i32) -> Result<Vec<ChartEntry>, ScrapeError> {
        let url = format!("{}{}", self.base_url, year);
        let network = |source| ScrapeError::Network {
            url: url.clone(),
            source,
        };

        let response = self.client.get(&url).send().await.map_err(network)?;
        if !response.status().is_success() {
            tracing::warn!("{year}: status={} url={url}", response.status());
            return Ok(Vec::new());
        }

        let html = response.text().await.map_err(network)?;
        let entries = self.parser.parse(year, &html);
        tracing::debug!("{year}: {} entries", entries.len());
        Ok(entries)
    }

    /// Entries for every year in `start..=end`, in year order
    pub async fn scrape(&self, start: i32, end: i32) -> Result<Vec<ChartEntry>, ScrapeError> {
        let mut all = Vec::new();
        for year in start..=end {
            all.extend(self.fetch_year(year).await?);
        }
        tracing::info!("Scraped {} chart entries for {start}-{end}", all.len());
        Ok(all)
    }
}
