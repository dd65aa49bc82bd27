//! Penn vs universal tagger comparison.
//!
//! Two reports come out of the same stage. The agreement report joins both
//! snapshots by song and scores token level agreement with the label spaces
//! left as they are. The distribution report maps Penn tags to the universal
//! scheme first and compares per-year tag frequencies, alongside a throughput
//! measurement over a shared sample.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::time::Instant;

use euterpe_types::{SongKey, TaggedRecord, Tagset, TokenizedRecord};
use serde::Serialize;

use crate::tagger::{PosTagger, tag_sequence};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgreementReport {
    pub rows_penn: usize,
    pub rows_universal: usize,
    pub rows_joined: usize,
    /// Joined rows whose sequences have equal length
    pub rows_compared: usize,
    /// Positions whose token text matches in both sequences
    pub pairs_compared: usize,
    pub pairs_agreeing: usize,
    pub penn_counts: BTreeMap<String, usize>,
    pub universal_counts: BTreeMap<String, usize>,
}

impl AgreementReport {
    /// Always within [0, 1]; 0 when nothing could be compared
    pub fn agreement(&self) -> f64 {
        if self.pairs_compared == 0 {
            0.0
        } else {
            self.pairs_agreeing as f64 / self.pairs_compared as f64
        }
    }

    pub fn summary_rows(&self) -> Vec<SummaryRow> {
        let metric = |name: &str, value: f64| SummaryRow {
            metric: name.to_string(),
            value,
        };

        vec![
            metric("rows_penn", self.rows_penn as f64),
            metric("rows_universal", self.rows_universal as f64),
            metric("rows_joined", self.rows_joined as f64),
            metric("rows_compared", self.rows_compared as f64),
            metric("pairs_compared", self.pairs_compared as f64),
            metric("pairs_agreeing", self.pairs_agreeing as f64),
            metric("agreement", self.agreement()),
            metric("unique_tags_penn", self.penn_counts.len() as f64),
            metric("unique_tags_universal", self.universal_counts.len() as f64),
        ]
    }

    pub fn tag_count_rows(&self) -> Vec<TagCountRow> {
        let rows = |tagger: &str, counts: &BTreeMap<String, usize>| {
            counts
                .iter()
                .map(|(tag, count)| TagCountRow {
                    tagger: tagger.to_string(),
                    tag: tag.clone(),
                    count: *count,
                })
                .collect::<Vec<_>>()
        };

        let mut out = rows(Tagset::Penn.as_str(), &self.penn_counts);
        out.extend(rows(Tagset::Universal.as_str(), &self.universal_counts));
        out
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub metric: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCountRow {
    pub tagger: String,
    pub tag: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearPosRow {
    pub year: i32,
    pub pos: String,
    pub penn_freq: f64,
    pub universal_freq: f64,
    pub abs_diff: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThroughputRow {
    pub model: String,
    pub time_seconds: f64,
    pub tokens: usize,
    pub tokens_per_second: f64,
}

/// Count how often each tag occurs across all rows
pub fn tag_counts(records: &[TaggedRecord]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for tagged in records.iter().filter_map(|r| r.tags.as_ref()).flatten() {
        *counts.entry(tagged.tag.clone()).or_insert(0) += 1;
    }
    counts
}

/// Inner join by song key, then strict position-wise agreement.
///
/// A joined row is compared only when both tag sequences have the same
/// length; inside it a position counts only when the token text matches.
/// When a key repeats in the universal snapshot its first row wins.
pub fn compare_agreement(penn: &[TaggedRecord], universal: &[TaggedRecord]) -> AgreementReport {
    let mut by_key: HashMap<SongKey, &TaggedRecord> = HashMap::with_capacity(universal.len());
    for record in universal {
        by_key.entry(record.key()).or_insert(record);
    }

    let mut report = AgreementReport {
        rows_penn: penn.len(),
        rows_universal: universal.len(),
        penn_counts: tag_counts(penn),
        universal_counts: tag_counts(universal),
        ..Default::default()
    };

    for left in penn {
        let Some(right) = by_key.get(&left.key()) else {
            continue;
        };
        report.rows_joined += 1;

        let (Some(left_tags), Some(right_tags)) = (&left.tags, &right.tags) else {
            continue;
        };
        if left_tags.len() != right_tags.len() {
            continue;
        }
        report.rows_compared += 1;

        for (a, b) in left_tags.iter().zip(right_tags) {
            if a.token != b.token {
                continue;
            }
            report.pairs_compared += 1;
            if a.tag == b.tag {
                report.pairs_agreeing += 1;
            }
        }
    }

    report
}

/// Per-year normalized tag frequencies for both backends.
///
/// `to_universal` maps each Penn tag before counting. Rows are ordered by
/// year, then tag.
pub fn distribution_by_year<F>(
    penn: &[TaggedRecord],
    universal: &[TaggedRecord],
    to_universal: F,
) -> Vec<YearPosRow>
where
    F: Fn(&str) -> &'static str,
{
    let penn_freq = year_frequencies(penn, |tag| to_universal(tag).to_string());
    let universal_freq = year_frequencies(universal, str::to_string);

    let years: BTreeSet<i32> = penn_freq.keys().chain(universal_freq.keys()).copied().collect();
    let tags: BTreeSet<&String> = penn_freq
        .values()
        .chain(universal_freq.values())
        .flat_map(|freq| freq.keys())
        .collect();

    let mut rows = Vec::with_capacity(years.len() * tags.len());
    for year in years {
        for tag in &tags {
            let lookup = |table: &BTreeMap<i32, BTreeMap<String, f64>>| {
                table
                    .get(&year)
                    .and_then(|freq| freq.get(*tag))
                    .copied()
                    .unwrap_or(0.0)
            };
            let penn_value = lookup(&penn_freq);
            let universal_value = lookup(&universal_freq);

            rows.push(YearPosRow {
                year,
                pos: (*tag).clone(),
                penn_freq: penn_value,
                universal_freq: universal_value,
                abs_diff: (penn_value - universal_value).abs(),
            });
        }
    }
    rows
}

fn year_frequencies<F>(records: &[TaggedRecord], label: F) -> BTreeMap<i32, BTreeMap<String, f64>>
where
    F: Fn(&str) -> String,
{
    let mut counts: BTreeMap<i32, BTreeMap<String, usize>> = BTreeMap::new();
    for record in records {
        let Some(tags) = &record.tags else { continue };
        let year = counts.entry(record.year).or_default();
        for tagged in tags {
            *year.entry(label(&tagged.tag)).or_insert(0) += 1;
        }
    }

    counts
        .into_iter()
        .filter_map(|(year, tags)| {
            let total: usize = tags.values().sum();
            (total > 0).then(|| {
                let freq = tags
                    .into_iter()
                    .map(|(tag, n)| (tag, n as f64 / total as f64))
                    .collect();
                (year, freq)
            })
        })
        .collect()
}

/// Time one backend over `sample`. Rows that fail to tag are skipped.
pub async fn measure_throughput(tagger: &dyn PosTagger, sample: &[TokenizedRecord]) -> ThroughputRow {
    let started = Instant::now();
    let mut tokens = 0;

    for record in sample {
        match tag_sequence(tagger, record.tokens.as_deref()).await {
            Ok(Some(tagged)) => tokens += tagged.len(),
            Ok(None) => {}
            Err(e) => tracing::debug!("{} failed on {} ({}): {e}", tagger.name(), record.song, record.year),
        }
    }

    let time_seconds = started.elapsed().as_secs_f64();
    ThroughputRow {
        model: tagger.name().to_string(),
        time_seconds,
        tokens,
        tokens_per_second: if time_seconds > 0.0 {
            tokens as f64 / time_seconds
        } else {
            0.0
        },
    }
}
