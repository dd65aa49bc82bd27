use std::sync::LazyLock;

use euterpe_core::language::{LanguageProcessor, Token};
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Letters (accented included), digits and underscore
static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-zÀ-ÿ0-9_]+").expect("word pattern is valid"));

/// English language processor
#[derive(Debug, Default, Clone, Copy)]
pub struct EnglishProcessor;

impl EnglishProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageProcessor for EnglishProcessor {
    fn language_code(&self) -> &str {
        "en"
    }

    fn normalize(&self, text: &str) -> String {
        text.nfkc().collect::<String>().trim().to_lowercase()
    }

    fn tokenize(&self, text: &str) -> Vec<Token> {
        let normalized = self.normalize(text);

        WORD.find_iter(&normalized)
            .enumerate()
            .map(|(position, m)| Token {
                surface: m.as_str().to_string(),
                normalized: m.as_str().to_string(),
                position,
            })
            .collect()
    }
}
