//! Aggregations behind the dashboard views. Pure functions over a loaded
//! dataset; nothing here mutates it.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use euterpe_lang_english::Person;
use euterpe_types::{TaggedRecord, TaggedToken};
use serde::{Deserialize, Serialize};

const TOP_N: usize = 10;
const DEFAULT_TEMPORAL_TAGS: [&str; 4] = ["NOUN", "VERB", "ADJ", "PRON"];

/// One tagged song
#[derive(Debug, Clone)]
pub struct Song {
    pub decade: i32,
    pub tags: Vec<TaggedToken>,
}

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub songs: Vec<Song>,
}

impl Dataset {
    /// Rows without tags are dropped
    pub fn from_records(records: Vec<TaggedRecord>) -> Self {
        let songs = records
            .into_iter()
            .filter_map(|r| {
                let tags = r.tags?;
                Some(Song {
                    decade: decade_of(r.year),
                    tags,
                })
            })
            .collect();
        Self { songs }
    }

    fn in_decade(&self, decade: Option<i32>) -> impl Iterator<Item = &Song> {
        self.songs
            .iter()
            .filter(move |s| decade.is_none_or(|d| s.decade == d))
    }
}

pub fn decade_of(year: i32) -> i32 {
    year.div_euclid(10) * 10
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagShare {
    pub pos: String,
    pub count: usize,
    pub pct: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenCount {
    pub token: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemporalPoint {
    pub decade: i32,
    pub pos: String,
    pub count: usize,
    pub pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SongMetric {
    #[default]
    TokensCount,
    UniqueWords,
    UniquePos,
    Ttr,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecadeMean {
    pub decade: i32,
    pub value: f64,
}

pub fn decades(data: &Dataset) -> Vec<i32> {
    let set: BTreeSet<i32> = data.songs.iter().map(|s| s.decade).collect();
    set.into_iter().collect()
}

pub fn tags(data: &Dataset) -> Vec<String> {
    let set: BTreeSet<&str> = data
        .songs
        .iter()
        .flat_map(|s| s.tags.iter().map(|t| t.tag.as_str()))
        .collect();
    set.into_iter().map(str::to_string).collect()
}

/// Share of each tag within a decade (or overall), most frequent first
pub fn pos_distribution(data: &Dataset, decade: Option<i32>) -> Vec<TagShare> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for tagged in data.in_decade(decade).flat_map(|s| &s.tags) {
        *counts.entry(tagged.tag.as_str()).or_insert(0) += 1;
    }

    let total: usize = counts.values().sum();
    let mut shares: Vec<TagShare> = counts
        .into_iter()
        .map(|(pos, count)| TagShare {
            pos: pos.to_string(),
            count,
            pct: if total == 0 { 0.0 } else { count as f64 / total as f64 },
        })
        .collect();
    shares.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.pos.cmp(&b.pos)));
    shares
}

/// Ten most frequent lowercase tokens carrying `tag` that pass `keep`
fn top_tokens<F>(data: &Dataset, decade: Option<i32>, tag: &str, keep: F) -> Vec<TokenCount>
where
    F: Fn(&str) -> bool,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    for tagged in data.in_decade(decade).flat_map(|s| &s.tags) {
        if tagged.tag != tag {
            continue;
        }
        let token = tagged.token.to_lowercase();
        if keep(&token) {
            *counts.entry(token).or_insert(0) += 1;
        }
    }

    let mut top: Vec<TokenCount> = counts
        .into_iter()
        .map(|(token, count)| TokenCount { token, count })
        .collect();
    top.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.token.cmp(&b.token)));
    top.truncate(TOP_N);
    top
}

pub fn top_verbs(data: &Dataset, decade: Option<i32>) -> Vec<TokenCount> {
    top_tokens(data, decade, "VERB", |_| true)
}

/// Pronoun ranking, restricted to the fixed English sets for `person`
pub fn top_pronouns(data: &Dataset, decade: Option<i32>, person: Person) -> Vec<TokenCount> {
    top_tokens(data, decade, "PRON", |token| person.matches(token))
}

/// `selected` tags empty means the defaults
pub fn resolve_temporal_tags(data: &Dataset, selected: &[String]) -> Vec<String> {
    if !selected.is_empty() {
        return selected.to_vec();
    }

    let available = tags(data);
    let defaults: Vec<String> = DEFAULT_TEMPORAL_TAGS
        .iter()
        .filter(|t| available.iter().any(|a| a == *t))
        .map(|t| t.to_string())
        .collect();
    if defaults.is_empty() {
        available.into_iter().take(4).collect()
    } else {
        defaults
    }
}

/// Per decade proportion of each selected tag, relative to the selected tags
pub fn temporal(data: &Dataset, selected: &[String]) -> Vec<TemporalPoint> {
    let wanted: HashSet<&str> = selected.iter().map(String::as_str).collect();
    let mut counts: BTreeMap<(i32, &str), usize> = BTreeMap::new();

    for song in &data.songs {
        for tagged in &song.tags {
            if wanted.contains(tagged.tag.as_str()) {
                *counts.entry((song.decade, tagged.tag.as_str())).or_insert(0) += 1;
            }
        }
    }

    let mut totals: HashMap<i32, usize> = HashMap::new();
    for ((decade, _), count) in &counts {
        *totals.entry(*decade).or_insert(0) += count;
    }

    counts
        .into_iter()
        .map(|((decade, pos), count)| TemporalPoint {
            decade,
            pos: pos.to_string(),
            count,
            pct: count as f64 / totals[&decade] as f64,
        })
        .collect()
}

/// Mean of a per-song lexical metric, by decade
pub fn song_stats(data: &Dataset, metric: SongMetric) -> Vec<DecadeMean> {
    let mut sums: BTreeMap<i32, (f64, usize)> = BTreeMap::new();

    for song in &data.songs {
        if song.tags.is_empty() {
            continue;
        }
        let tokens = song.tags.len();
        let unique_words: HashSet<String> = song.tags.iter().map(|t| t.token.to_lowercase()).collect();
        let unique_pos: HashSet<&str> = song.tags.iter().map(|t| t.tag.as_str()).collect();

        let value = match metric {
            SongMetric::TokensCount => tokens as f64,
            SongMetric::UniqueWords => unique_words.len() as f64,
            SongMetric::UniquePos => unique_pos.len() as f64,
            SongMetric::Ttr => unique_words.len() as f64 / tokens as f64,
        };

        let entry = sums.entry(song.decade).or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }

    sums.into_iter()
        .map(|(decade, (sum, n))| DecadeMean {
            decade,
            value: sum / n as f64,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: i32, pairs: &[(&str, &str)]) -> TaggedRecord {
        TaggedRecord {
            year,
            rank: 1,
            artist: None,
            song: "song".to_string(),
            language: Some("en".to_string()),
            translation: None,
            tokens: Some(pairs.iter().map(|(t, _)| t.to_string()).collect()),
            tags: Some(pairs.iter().map(|(t, g)| TaggedToken::new(*t, *g)).collect()),
        }
    }

    fn dataset() -> Dataset {
        let mut untagged = record(1999, &[]);
        untagged.tags = None;

        Dataset::from_records(vec![
            record(1984, &[("i", "PRON"), ("love", "VERB"), ("you", "PRON"), ("love", "NOUN")]),
            record(1989, &[("we", "PRON"), ("run", "VERB"), ("run", "VERB")]),
            record(2003, &[("she", "PRON"), ("dances", "VERB"), ("tonight", "ADV")]),
            untagged,
        ])
    }

    #[test]
    fn untagged_rows_are_dropped_and_decades_bucketed() {
        let data = dataset();
        assert_eq!(data.songs.len(), 3);
        assert_eq!(decades(&data), vec![1980, 2000]);
        assert_eq!(decade_of(1999), 1990);
    }

    #[test]
    fn distribution_sums_to_one() {
        let shares = pos_distribution(&dataset(), Some(1980));
        assert_eq!(shares[0].pos, "PRON");
        assert_eq!(shares[0].count, 3);
        let total: f64 = shares.iter().map(|s| s.pct).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn top_verbs_break_ties_by_token() {
        let top = top_verbs(&dataset(), Some(1980));
        assert_eq!(
            top,
            vec![
                TokenCount { token: "run".to_string(), count: 2 },
                TokenCount { token: "love".to_string(), count: 1 },
            ]
        );
    }

    #[test]
    fn pronouns_filter_by_person() {
        let data = dataset();
        let first: Vec<String> = top_pronouns(&data, Some(1980), Person::First)
            .into_iter()
            .map(|t| t.token)
            .collect();
        assert_eq!(first, vec!["i", "we"]);

        let third = top_pronouns(&data, None, Person::Third);
        assert_eq!(third, vec![TokenCount { token: "she".to_string(), count: 1 }]);
    }

    #[test]
    fn temporal_defaults_and_proportions() {
        let data = dataset();
        let selected = resolve_temporal_tags(&data, &[]);
        assert_eq!(selected, vec!["NOUN", "VERB", "PRON"]);

        let points = temporal(&data, &["VERB".to_string(), "PRON".to_string()]);
        let eighties: Vec<&TemporalPoint> = points.iter().filter(|p| p.decade == 1980).collect();
        assert_eq!(eighties.len(), 2);
        assert!((eighties.iter().map(|p| p.pct).sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn song_stats_average_per_decade() {
        let data = dataset();

        let tokens = song_stats(&data, SongMetric::TokensCount);
        assert_eq!(tokens, vec![
            DecadeMean { decade: 1980, value: 3.5 },
            DecadeMean { decade: 2000, value: 3.0 },
        ]);

        let ttr = song_stats(&data, SongMetric::Ttr);
        // 1984: 3 unique / 4, 1989: 2 unique / 3
        assert!((ttr[0].value - (0.75 + 2.0 / 3.0) / 2.0).abs() < 1e-9);
    }
}
