//! One runner per pipeline step. Each reads the previous step's snapshot and
//! overwrites its own.

use std::time::Duration;

use anyhow::Context;
use euterpe_config::Config;
use euterpe_config::tagger::UniversalBackend;
use euterpe_core::artist::normalize_entries;
use euterpe_core::compare::{self, ThroughputRow};
use euterpe_core::language::{LanguageProcessor, detect_language, tokenize_lyrics};
use euterpe_core::preprocess::clean_lyrics;
use euterpe_core::table;
use euterpe_core::tagger::{PosTagger, ensure_tagset, tag_records};
use euterpe_lang_english::{
    EnglishProcessor, LexiconTagger, RemoteTagger, RuleTagger, TrigramDetector, UniversalMapped,
    penn_to_universal, translator,
};
use euterpe_scraper::fetcher::LYRICS_COLUMNS;
use euterpe_scraper::{ChartScraper, LyricsClient, LyricsFetcher};
use euterpe_translator::translate_record;
use euterpe_types::{ChartEntry, LyricsRecord, TaggedRecord, Tagset, TokenizedRecord};

const CHART_COLUMNS: [&str; 4] = ["year", "rank", "song", "artist"];
const LANGUAGE_COLUMNS: [&str; 6] = ["year", "rank", "artist", "song", "lyrics", "language"];
const TOKEN_COLUMNS: [&str; 5] = ["year", "rank", "artist", "song", "tokens"];
const TAG_COLUMNS: [&str; 5] = ["year", "rank", "artist", "song", "tags"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Scrape,
    FetchLyrics,
    CleanLyrics,
    DetectLanguage,
    Translate,
    Tokenize,
    TagPenn,
    TagUniversal,
    Compare,
}

impl Step {
    pub const ALL: [Step; 9] = [
        Step::Scrape,
        Step::FetchLyrics,
        Step::CleanLyrics,
        Step::DetectLanguage,
        Step::Translate,
        Step::Tokenize,
        Step::TagPenn,
        Step::TagUniversal,
        Step::Compare,
    ];

    pub fn number(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).map_or(0, |i| i + 1)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Step::Scrape => "Scrape chart listings",
            Step::FetchLyrics => "Fetch lyrics",
            Step::CleanLyrics => "Clean lyrics",
            Step::DetectLanguage => "Detect language",
            Step::Translate => "Translate to English",
            Step::Tokenize => "Tokenize",
            Step::TagPenn => "POS tagging (Penn)",
            Step::TagUniversal => "POS tagging (universal)",
            Step::Compare => "Compare taggers",
        }
    }
}

/// What the menu answer asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    One(Step),
}

pub fn parse_selection(input: &str) -> Option<Selection> {
    match input.trim() {
        "0" => Some(Selection::All),
        other => {
            let n: usize = other.parse().ok()?;
            Step::ALL.get(n.checked_sub(1)?).copied().map(Selection::One)
        }
    }
}

pub async fn run_step(step: Step, config: &Config) -> anyhow::Result<()> {
    match step {
        Step::Scrape => scrape(config).await,
        Step::FetchLyrics => fetch_lyrics(config).await,
        Step::CleanLyrics => clean(config),
        Step::DetectLanguage => detect(config),
        Step::Translate => translate(config).await,
        Step::Tokenize => tokenize(config),
        Step::TagPenn => tag_penn(config).await,
        Step::TagUniversal => tag_universal(config).await,
        Step::Compare => compare(config).await,
    }
}

async fn scrape(config: &Config) -> anyhow::Result<()> {
    let paths = &config.paths;
    let scraper = ChartScraper::new(&config.scraper)?;
    let entries = scraper
        .scrape(config.scraper.start_year, config.scraper.end_year)
        .await
        .context("Chart scrape failed")?;
    table::write_csv(&paths.chart_raw_csv(), &entries)?;

    let normalized = normalize_entries(entries);
    table::write_csv(&paths.chart_clean_csv(), &normalized)?;
    tracing::info!("{} entries written to {}", normalized.len(), paths.chart_clean_csv().display());
    Ok(())
}

async fn fetch_lyrics(config: &Config) -> anyhow::Result<()> {
    let paths = &config.paths;
    let entries: Vec<ChartEntry> = table::read_csv(&paths.chart_clean_csv(), &CHART_COLUMNS)?;

    let client = LyricsClient::new(&config.lyrics)?;
    LyricsFetcher::new(&client, paths.lyrics_csv(), &config.lyrics)
        .run(entries)
        .await
        .context("Lyrics fetch aborted")?;
    Ok(())
}

fn clean(config: &Config) -> anyhow::Result<()> {
    let paths = &config.paths;
    let records: Vec<LyricsRecord> = table::read_csv(&paths.lyrics_csv(), &LYRICS_COLUMNS)?;

    let cleaned: Vec<LyricsRecord> = records
        .into_iter()
        .map(|mut r| {
            r.lyrics = clean_lyrics(r.lyrics.as_deref());
            r
        })
        .collect();

    table::write_csv(&paths.lyrics_clean_csv(), &cleaned)?;
    tracing::info!("Cleaned {} rows", cleaned.len());
    Ok(())
}

fn detect(config: &Config) -> anyhow::Result<()> {
    let paths = &config.paths;
    let records: Vec<LyricsRecord> = table::read_csv(&paths.lyrics_clean_csv(), &LYRICS_COLUMNS)?;
    let detector = TrigramDetector::new();

    let labelled: Vec<LyricsRecord> = records
        .into_iter()
        .map(|mut r| {
            r.language = detect_language(&detector, r.lyrics.as_deref());
            r
        })
        .collect();

    let unlabelled = labelled.iter().filter(|r| r.language.is_none()).count();
    table::write_csv(&paths.language_csv(), &labelled)?;
    tracing::info!("Labelled {} rows, {unlabelled} without a language", labelled.len());
    Ok(())
}

async fn translate(config: &Config) -> anyhow::Result<()> {
    let paths = &config.paths;
    let records: Vec<LyricsRecord> = table::read_csv(&paths.language_csv(), &LANGUAGE_COLUMNS)?;

    let translated = if config.translator.enabled {
        let translator = translator::from_config(&config.translator)?;
        tracing::info!("Translating with {}", translator.metadata().name);

        let mut out = Vec::with_capacity(records.len());
        for record in records {
            out.push(translate_record(translator.as_ref(), record).await);
        }
        out
    } else {
        tracing::warn!("Translator disabled, copying rows unchanged");
        records
    };

    table::write_csv(&paths.translated_csv(), &translated)?;
    Ok(())
}

fn tokenize(config: &Config) -> anyhow::Result<()> {
    let paths = &config.paths;
    let records: Vec<LyricsRecord> = table::read_csv(&paths.translated_csv(), &LYRICS_COLUMNS)?;
    let processor = EnglishProcessor::new();
    tracing::info!("Tokenizing with the {} processor", processor.language_code());

    let tokenized: Vec<TokenizedRecord> = records
        .into_iter()
        .map(|r| TokenizedRecord {
            tokens: tokenize_lyrics(&processor, r.lyrics.as_deref()),
            year: r.year,
            rank: r.rank,
            artist: r.artist,
            song: r.song,
            language: r.language,
            translation: r.translation,
        })
        .collect();

    let with_tokens = tokenized.iter().filter(|r| r.tokens.is_some()).count();
    table::write_jsonl(&paths.tokenized_jsonl(), &tokenized)?;
    tracing::info!("Rows with tokens: {with_tokens}/{}", tokenized.len());
    Ok(())
}

fn penn_tagger(config: &Config) -> anyhow::Result<LexiconTagger> {
    Ok(LexiconTagger::with_lexicon_file(config.tagger.lexicon_path.as_deref())?)
}

fn universal_tagger(config: &Config) -> anyhow::Result<Box<dyn PosTagger>> {
    Ok(match config.tagger.universal_backend {
        UniversalBackend::Rules => Box::new(RuleTagger::new()),
        UniversalBackend::Mapped => Box::new(UniversalMapped::new(penn_tagger(config)?)),
        UniversalBackend::Remote => Box::new(RemoteTagger::with_timeout(
            config.tagger.remote_url.clone(),
            Duration::from_secs(config.tagger.remote_timeout_seconds),
        )?),
    })
}

async fn tag_penn(config: &Config) -> anyhow::Result<()> {
    let paths = &config.paths;
    let records: Vec<TokenizedRecord> = table::read_jsonl(&paths.tokenized_jsonl(), &TOKEN_COLUMNS)?;
    let tagger = penn_tagger(config)?;
    ensure_tagset(&tagger, Tagset::Penn)?;
    let tagged = tag_records(&tagger, records).await;
    table::write_jsonl(&paths.pos_penn_jsonl(), &tagged)?;
    Ok(())
}

async fn tag_universal(config: &Config) -> anyhow::Result<()> {
    let paths = &config.paths;
    let records: Vec<TokenizedRecord> = table::read_jsonl(&paths.tokenized_jsonl(), &TOKEN_COLUMNS)?;
    let tagger = universal_tagger(config)?;
    ensure_tagset(tagger.as_ref(), Tagset::Universal)?;
    let tagged = tag_records(tagger.as_ref(), records).await;
    table::write_jsonl(&paths.pos_universal_jsonl(), &tagged)?;
    Ok(())
}

async fn compare(config: &Config) -> anyhow::Result<()> {
    let paths = &config.paths;
    let penn: Vec<TaggedRecord> = table::read_jsonl(&paths.pos_penn_jsonl(), &TAG_COLUMNS)?;
    let universal: Vec<TaggedRecord> = table::read_jsonl(&paths.pos_universal_jsonl(), &TAG_COLUMNS)?;

    if config.tagger.universal_backend == UniversalBackend::Mapped {
        tracing::warn!("Universal tags come from the mapped Penn lexicon, agreement is not independent");
    }

    let report = compare::compare_agreement(&penn, &universal);
    table::write_csv(&paths.comparison_summary_csv(), &report.summary_rows())?;
    table::write_csv(&paths.tag_counts_csv(), &report.tag_count_rows())?;
    tracing::info!(
        "Agreement {:.4} over {} pairs in {} rows",
        report.agreement(),
        report.pairs_compared,
        report.rows_compared
    );

    let by_year = compare::distribution_by_year(&penn, &universal, penn_to_universal);
    table::write_csv(&paths.pos_by_year_csv(), &by_year)?;

    let tokenized: Vec<TokenizedRecord> = table::read_jsonl(&paths.tokenized_jsonl(), &TOKEN_COLUMNS)?;
    let sample: Vec<TokenizedRecord> = tokenized
        .into_iter()
        .filter(|r| r.tokens.is_some())
        .take(config.comparator.sample_rows)
        .collect();

    let penn_mapped = UniversalMapped::new(penn_tagger(config)?);
    let universal_backend = universal_tagger(config)?;
    let speed: Vec<ThroughputRow> = vec![
        compare::measure_throughput(&penn_mapped, &sample).await,
        compare::measure_throughput(universal_backend.as_ref(), &sample).await,
    ];
    for row in &speed {
        tracing::info!("{}: {:.0} tokens/s", row.model, row.tokens_per_second);
    }
    table::write_csv(&paths.pos_speed_csv(), &speed)?;
    Ok(())
}
