use serde::{Deserialize, Serialize};

/// (year, rank, artist, song): the key every stage joins on
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SongKey {
    pub year: i32,
    pub rank: u32,
    pub artist: Option<String>,
    pub song: String,
}

/// One row of a yearly chart listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartEntry {
    pub year: i32,
    pub rank: u32,
    pub song: String,
    #[serde(default)]
    pub artist: Option<String>,
}

/// Outcome of the translation stage for a row that needed one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationStatus {
    Translated,
    Failed,
}

/// Row shared by the fetch, clean, detect and translate stages.
///
/// `language` and `translation` stay empty until the stage that owns them runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LyricsRecord {
    pub year: i32,
    pub rank: u32,
    #[serde(default)]
    pub artist: Option<String>,
    pub song: String,
    #[serde(default)]
    pub lyrics: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub translation: Option<TranslationStatus>,
}

impl LyricsRecord {
    pub fn key(&self) -> SongKey {
        SongKey {
            year: self.year,
            rank: self.rank,
            artist: self.artist.clone(),
            song: self.song.clone(),
        }
    }
}

impl From<ChartEntry> for LyricsRecord {
    fn from(entry: ChartEntry) -> Self {
        Self {
            year: entry.year,
            rank: entry.rank,
            artist: entry.artist,
            song: entry.song,
            lyrics: None,
            language: None,
            translation: None,
        }
    }
}

/// Lyrics replaced by their lowercase token sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizedRecord {
    pub year: i32,
    pub rank: u32,
    #[serde(default)]
    pub artist: Option<String>,
    pub song: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub translation: Option<TranslationStatus>,
    #[serde(default)]
    pub tokens: Option<Vec<String>>,
}

impl TokenizedRecord {
    pub fn key(&self) -> SongKey {
        SongKey {
            year: self.year,
            rank: self.rank,
            artist: self.artist.clone(),
            song: self.song.clone(),
        }
    }
}

/// A (token, tag) pair, persisted as a two element array
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct TaggedToken {
    pub token: String,
    pub tag: String,
}

impl TaggedToken {
    pub fn new(token: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            tag: tag.into(),
        }
    }
}

impl From<(String, String)> for TaggedToken {
    fn from((token, tag): (String, String)) -> Self {
        Self { token, tag }
    }
}

impl From<TaggedToken> for (String, String) {
    fn from(tagged: TaggedToken) -> Self {
        (tagged.token, tagged.tag)
    }
}

/// Label space a tagger emits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tagset {
    /// Penn Treebank (NN, VBZ, PRP$, ...)
    Penn,
    /// Coarse universal scheme (NOUN, VERB, PRON, ...)
    Universal,
}

impl Tagset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tagset::Penn => "penn",
            Tagset::Universal => "universal",
        }
    }
}

/// Output row of one tagger backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedRecord {
    pub year: i32,
    pub rank: u32,
    #[serde(default)]
    pub artist: Option<String>,
    pub song: String,
    #[serde(default)]
    pub language: Option<String>,
    /// Carried from the translate stage so a failed translation stays visible
    #[serde(default)]
    pub translation: Option<TranslationStatus>,
    #[serde(default)]
    pub tokens: Option<Vec<String>>,
    #[serde(default)]
    pub tags: Option<Vec<TaggedToken>>,
}

impl TaggedRecord {
    pub fn key(&self) -> SongKey {
        SongKey {
            year: self.year,
            rank: self.rank,
            artist: self.artist.clone(),
            song: self.song.clone(),
        }
    }

    pub fn from_tokenized(record: TokenizedRecord, tags: Option<Vec<TaggedToken>>) -> Self {
        Self {
            year: record.year,
            rank: record.rank,
            artist: record.artist,
            song: record.song,
            language: record.language,
            translation: record.translation,
            tokens: record.tokens,
            tags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagged_token_is_a_pair_on_disk() {
        let tagged = TaggedToken::new("run", "VERB");
        let json = serde_json::to_string(&tagged).unwrap();
        assert_eq!(json, r#"["run","VERB"]"#);

        let back: TaggedToken = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tagged);
    }

    #[test]
    fn chart_entry_converts_to_empty_lyrics_record() {
        let entry = ChartEntry {
            year: 1985,
            rank: 3,
            song: "Careless Whisper".to_string(),
            artist: Some("Wham!".to_string()),
        };

        let record = LyricsRecord::from(entry);
        assert_eq!(record.lyrics, None);
        assert_eq!(record.language, None);
        assert_eq!(record.key().rank, 3);
    }

    #[test]
    fn tagging_keeps_the_translation_outcome() {
        let record = TokenizedRecord {
            year: 2017,
            rank: 1,
            artist: Some("Luis Fonsi".to_string()),
            song: "Despacito".to_string(),
            language: Some("en".to_string()),
            translation: Some(TranslationStatus::Failed),
            tokens: None,
        };

        let tagged = TaggedRecord::from_tokenized(record, None);
        assert_eq!(tagged.translation, Some(TranslationStatus::Failed));

        let json = serde_json::to_string(&tagged).unwrap();
        assert!(json.contains(r#""translation":"failed""#));
    }
}
