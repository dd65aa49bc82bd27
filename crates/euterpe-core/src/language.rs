/// Text processing interface for language implementations
pub trait LanguageProcessor: Send + Sync {
    /// Language identifier (ISO 639-1 code: "en", "es", ...)
    fn language_code(&self) -> &str;

    /// Normalize text (Unicode normalization, case folding, etc.)
    fn normalize(&self, text: &str) -> String;

    /// Break text into processable tokens
    fn tokenize(&self, text: &str) -> Vec<Token>;
}

/// Labels text with a language code
pub trait LanguageDetector: Send + Sync {
    /// Best guess for `text`, None when the detector is not confident
    fn detect(&self, text: &str) -> Option<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub surface: String,
    pub normalized: String,
    pub position: usize,
}

/// Detection is unreliable below this many characters
pub const MIN_DETECTION_CHARS: usize = 50;

/// Language label for one lyrics cell
pub fn detect_language(detector: &dyn LanguageDetector, text: Option<&str>) -> Option<String> {
    let text = text?.trim();
    if text.chars().count() < MIN_DETECTION_CHARS {
        return None;
    }
    detector.detect(text)
}

/// Token sequence for one lyrics cell.
///
/// None means there was nothing to tokenize, which is kept apart from an
/// unprocessed row by the caller.
pub fn tokenize_lyrics(processor: &dyn LanguageProcessor, text: Option<&str>) -> Option<Vec<String>> {
    let tokens: Vec<String> = processor
        .tokenize(text?)
        .into_iter()
        .map(|token| token.normalized)
        .collect();
    (!tokens.is_empty()).then_some(tokens)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct Always(&'static str, AtomicUsize);

    impl LanguageDetector for Always {
        fn detect(&self, _text: &str) -> Option<String> {
            self.1.fetch_add(1, Ordering::SeqCst);
            Some(self.0.to_string())
        }
    }

    struct Whitespace;

    impl LanguageProcessor for Whitespace {
        fn language_code(&self) -> &str {
            "xx"
        }

        fn normalize(&self, text: &str) -> String {
            text.to_lowercase()
        }

        fn tokenize(&self, text: &str) -> Vec<Token> {
            text.split_whitespace()
                .enumerate()
                .map(|(position, word)| Token {
                    surface: word.to_string(),
                    normalized: self.normalize(word),
                    position,
                })
                .collect()
        }
    }

    #[test]
    fn short_text_is_never_labelled() {
        let detector = Always("es", AtomicUsize::new(0));

        assert_eq!(detect_language(&detector, Some("hola mundo")), None);
        assert_eq!(detect_language(&detector, None), None);
        assert_eq!(detector.1.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn long_text_goes_to_the_detector() {
        let detector = Always("es", AtomicUsize::new(0));
        let text = "a".repeat(MIN_DETECTION_CHARS);

        assert_eq!(detect_language(&detector, Some(&text)).as_deref(), Some("es"));
    }

    #[test]
    fn nothing_to_tokenize_is_none() {
        assert_eq!(tokenize_lyrics(&Whitespace, Some("   ")), None);
        assert_eq!(tokenize_lyrics(&Whitespace, None), None);
        assert_eq!(
            tokenize_lyrics(&Whitespace, Some("Hey Jude")),
            Some(vec!["hey".to_string(), "jude".to_string()])
        );
    }
}
