use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static PROMO_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*Paroles de la chanson[^\n]*\n?").expect("header pattern is valid")
});
static SQUARE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[.*?\]").expect("valid"));
static ROUND: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(.*?\)").expect("valid"));
static CURLY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{.*?\}").expect("valid"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid"));
static NOT_WORDLIKE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-ZÀ-ÿ0-9\s]").expect("valid"));

pub trait Preprocessor {
    fn process(&self, text: &str) -> String;
}

/// Strips headers, asides and punctuation from fetched lyrics
pub struct LyricsCleaner;

impl Preprocessor for LyricsCleaner {
    fn process(&self, text: &str) -> String {
        // Composed form so accented letters survive the character filter
        let text: String = text.nfkc().collect();

        let text = SQUARE.replace_all(&text, " ");
        let text = ROUND.replace_all(&text, " ");
        let text = CURLY.replace_all(&text, " ");
        let mut text = NOT_WORDLIKE.replace_all(&text, "").into_owned();

        // Line breaks are still intact here, so each header goes as a whole line.
        // Repeat so a stacked header cannot surface at the start of the output.
        while let Some(range) = PROMO_HEADER.find(&text).map(|m| m.range()) {
            text.replace_range(range, "");
        }

        WHITESPACE.replace_all(&text, " ").trim().to_string()
    }
}

/// Clean one lyrics cell. Absent stays absent, and so does text with nothing left.
pub fn clean_lyrics(text: Option<&str>) -> Option<String> {
    let cleaned = LyricsCleaner.process(text?);
    (!cleaned.is_empty()).then_some(cleaned)
}
