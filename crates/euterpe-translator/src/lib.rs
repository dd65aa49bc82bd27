use euterpe_types::{LyricsRecord, TranslationStatus};

pub type LanguageCode = String;

/// Language every translated row ends up labelled with
pub const TARGET_LANGUAGE: &str = "en";

/// Translation provider interface
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate text from source to target language
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct Translation {
    pub text: String,
    pub from: LanguageCode,
    pub to: LanguageCode,
    pub provider: String,
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub requires_api_key: bool,
    pub free_tier_available: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Unknown translation provider: {0}")]
    UnknownProvider(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,
}

/// Translate one row into English when it is labelled with another language.
///
/// Rows that are unlabelled or already English come back untouched. Any
/// other row ends up labelled English; `translation` records whether its text
/// was replaced or dropped.
pub async fn translate_record(translator: &dyn Translator, mut record: LyricsRecord) -> LyricsRecord {
    let Some(language) = record.language.clone() else {
        return record;
    };
    if language == TARGET_LANGUAGE {
        return record;
    }

    let outcome = match record.lyrics.as_deref() {
        Some(text) => translator
            .translate(text, language.clone(), TARGET_LANGUAGE.to_string())
            .await
            .map(|t| t.text),
        None => Err(TranslateError::ApiError("no text to translate".to_string())),
    };

    match outcome {
        Ok(text) => {
            record.lyrics = Some(text);
            record.translation = Some(TranslationStatus::Translated);
        }
        Err(e) => {
            tracing::warn!(
                "Translation {} -> {} failed for {} ({}): {e}",
                language,
                TARGET_LANGUAGE,
                record.song,
                record.year
            );
            record.lyrics = None;
            record.translation = Some(TranslationStatus::Failed);
        }
    }
    record.language = Some(TARGET_LANGUAGE.to_string());
    record
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct Upper {
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl Translator for Upper {
        async fn translate(
            &self,
            text: &str,
            from: LanguageCode,
            to: LanguageCode,
        ) -> Result<Translation, TranslateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if text.contains("boom") {
                return Err(TranslateError::RateLimitExceeded);
            }
            Ok(Translation {
                text: text.to_uppercase(),
                from,
                to,
                provider: "upper".to_string(),
            })
        }

        fn metadata(&self) -> ProviderMetadata {
            ProviderMetadata {
                name: "Upper".to_string(),
                requires_api_key: false,
                free_tier_available: true,
            }
        }
    }

    fn record(lyrics: Option<&str>, language: Option<&str>) -> LyricsRecord {
        LyricsRecord {
            year: 2017,
            rank: 1,
            artist: Some("Luis Fonsi".to_string()),
            song: "Despacito".to_string(),
            lyrics: lyrics.map(str::to_string),
            language: language.map(str::to_string),
            translation: None,
        }
    }

    fn upper() -> Upper {
        Upper {
            calls: AtomicUsize::new(0),
        }
    }

    #[tokio::test]
    async fn foreign_text_is_translated() {
        let translator = upper();
        let out = translate_record(&translator, record(Some("despacito"), Some("es"))).await;

        assert_eq!(out.lyrics.as_deref(), Some("DESPACITO"));
        assert_eq!(out.language.as_deref(), Some("en"));
        assert_eq!(out.translation, Some(TranslationStatus::Translated));
    }

    #[tokio::test]
    async fn failure_drops_text_but_marks_the_attempt() {
        let translator = upper();
        let out = translate_record(&translator, record(Some("boom"), Some("es"))).await;

        assert_eq!(out.lyrics, None);
        assert_eq!(out.language.as_deref(), Some("en"));
        assert_eq!(out.translation, Some(TranslationStatus::Failed));
    }

    #[tokio::test]
    async fn english_and_unlabelled_rows_are_untouched() {
        let translator = upper();

        let english = record(Some("hello"), Some("en"));
        assert_eq!(translate_record(&translator, english.clone()).await, english);

        let unlabelled = record(Some("hola"), None);
        assert_eq!(translate_record(&translator, unlabelled.clone()).await, unlabelled);

        assert_eq!(translator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn missing_text_fails_without_calling_the_provider() {
        let translator = upper();
        let out = translate_record(&translator, record(None, Some("fr"))).await;

        assert_eq!(out.translation, Some(TranslationStatus::Failed));
        assert_eq!(translator.calls.load(Ordering::SeqCst), 0);
    }
}
