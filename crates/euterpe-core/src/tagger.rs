use std::path::PathBuf;

use async_trait::async_trait;
use euterpe_types::{TaggedRecord, TaggedToken, Tagset, TokenizedRecord};

#[derive(Debug, thiserror::Error)]
pub enum TaggerError {
    #[error("Tagger backend error: {0}")]
    Backend(String),

    #[error("Tagger returned HTTP {status}")]
    Http { status: u16 },

    #[error("Tagger returned {got} tags for {expected} tokens")]
    Misaligned { expected: usize, got: usize },

    #[error("{tagger} emits {} tags, this stage needs {}", got.as_str(), expected.as_str())]
    WrongTagset {
        tagger: String,
        expected: Tagset,
        got: Tagset,
    },

    #[error("Failed to load lexicon {}: {source}", path.display())]
    Lexicon {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Part-of-speech tagging backend
#[async_trait]
pub trait PosTagger: Send + Sync {
    /// Name recorded in comparison reports
    fn name(&self) -> &str;

    /// Label space of the emitted tags
    fn tagset(&self) -> Tagset;

    /// One tag per input token, in input order
    async fn tag(&self, tokens: &[String]) -> Result<Vec<TaggedToken>, TaggerError>;
}

/// Reject a backend whose label space is not the one a stage writes
pub fn ensure_tagset(tagger: &dyn PosTagger, expected: Tagset) -> Result<(), TaggerError> {
    let got = tagger.tagset();
    if got != expected {
        return Err(TaggerError::WrongTagset {
            tagger: tagger.name().to_string(),
            expected,
            got,
        });
    }
    Ok(())
}

/// Tag one token column cell. Absent or empty input yields None.
pub async fn tag_sequence(
    tagger: &dyn PosTagger,
    tokens: Option<&[String]>,
) -> Result<Option<Vec<TaggedToken>>, TaggerError> {
    let Some(tokens) = tokens.filter(|t| !t.is_empty()) else {
        return Ok(None);
    };

    let tagged = tagger.tag(tokens).await?;
    if tagged.len() != tokens.len() {
        return Err(TaggerError::Misaligned {
            expected: tokens.len(),
            got: tagged.len(),
        });
    }
    Ok(Some(tagged))
}

/// Tag every row. A row the backend fails on keeps absent tags.
pub async fn tag_records(tagger: &dyn PosTagger, records: Vec<TokenizedRecord>) -> Vec<TaggedRecord> {
    let total = records.len();
    let mut out = Vec::with_capacity(total);
    let mut failed = 0;

    for record in records {
        let tags = match tag_sequence(tagger, record.tokens.as_deref()).await {
            Ok(tags) => tags,
            Err(e) => {
                tracing::warn!("{} failed on {} ({}): {e}", tagger.name(), record.song, record.year);
                failed += 1;
                None
            }
        };
        out.push(TaggedRecord::from_tokenized(record, tags));
    }

    let tagged = out.iter().filter(|r| r.tags.is_some()).count();
    tracing::info!(
        tagset = tagger.tagset().as_str(),
        "{}: {tagged}/{total} rows tagged, {failed} failed",
        tagger.name()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Nouns;

    #[async_trait]
    impl PosTagger for Nouns {
        fn name(&self) -> &str {
            "nouns"
        }

        fn tagset(&self) -> Tagset {
            Tagset::Universal
        }

        async fn tag(&self, tokens: &[String]) -> Result<Vec<TaggedToken>, TaggerError> {
            Ok(tokens.iter().map(|t| TaggedToken::new(t.clone(), "NOUN")).collect())
        }
    }

    struct Truncating;

    #[async_trait]
    impl PosTagger for Truncating {
        fn name(&self) -> &str {
            "truncating"
        }

        fn tagset(&self) -> Tagset {
            Tagset::Penn
        }

        async fn tag(&self, tokens: &[String]) -> Result<Vec<TaggedToken>, TaggerError> {
            Ok(tokens.iter().skip(1).map(|t| TaggedToken::new(t.clone(), "NN")).collect())
        }
    }

    fn words(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|w| w.to_string()).collect()
    }

    #[tokio::test]
    async fn output_matches_input_length() {
        let tokens = words(&["love", "me", "do"]);
        let tagged = tag_sequence(&Nouns, Some(tokens.as_slice())).await.unwrap().unwrap();

        assert_eq!(tagged.len(), tokens.len());
        assert_eq!(tagged[2], TaggedToken::new("do", "NOUN"));
    }

    #[tokio::test]
    async fn empty_or_absent_input_is_none() {
        assert_eq!(tag_sequence(&Nouns, None).await.unwrap(), None);
        assert_eq!(tag_sequence(&Nouns, Some(&[][..])).await.unwrap(), None);
    }

    #[tokio::test]
    async fn failing_rows_keep_absent_tags() {
        let record = |rank: u32, tokens: Option<Vec<String>>| TokenizedRecord {
            year: 1995,
            rank,
            artist: Some("Coolio".to_string()),
            song: "Gangsta's Paradise".to_string(),
            language: Some("en".to_string()),
            translation: None,
            tokens,
        };

        let out = tag_records(
            &Truncating,
            vec![record(1, Some(words(&["as", "i", "walk"]))), record(2, None)],
        )
        .await;

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].tags, None);
        assert_eq!(out[0].tokens.as_ref().map(Vec::len), Some(3));
        assert_eq!(out[1].tags, None);

        let out = tag_records(&Nouns, vec![record(1, Some(words(&["walk"])))]).await;
        assert_eq!(out[0].tags, Some(vec![TaggedToken::new("walk", "NOUN")]));
    }

    #[tokio::test]
    async fn short_output_is_rejected() {
        let tokens = words(&["a", "b"]);
        let err = tag_sequence(&Truncating, Some(tokens.as_slice())).await.unwrap_err();

        assert!(matches!(err, TaggerError::Misaligned { expected: 2, got: 1 }));
    }

    #[test]
    fn stage_checks_the_label_space() {
        assert!(ensure_tagset(&Nouns, Tagset::Universal).is_ok());

        let err = ensure_tagset(&Truncating, Tagset::Universal).unwrap_err();
        assert!(matches!(
            err,
            TaggerError::WrongTagset {
                expected: Tagset::Universal,
                got: Tagset::Penn,
                ..
            }
        ));
        assert_eq!(err.to_string(), "truncating emits penn tags, this stage needs universal");
    }
}
