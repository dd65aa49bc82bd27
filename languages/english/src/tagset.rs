use async_trait::async_trait;
use euterpe_core::tagger::{PosTagger, TaggerError};
use euterpe_types::{TaggedToken, Tagset};

/// Penn Treebank tag to its universal tagset category. Unknown tags are `X`.
pub fn penn_to_universal(tag: &str) -> &'static str {
    match tag {
        "!" | "#" | "$" | "''" | "(" | ")" | "," | "-LRB-" | "-RRB-" | "." | ":" | "?" | "``" => ".",
        "CC" => "CONJ",
        "CD" => "NUM",
        "DT" | "EX" | "PDT" | "WDT" => "DET",
        "FW" | "LS" | "RN" | "SYM" | "UH" | "WH" => "X",
        "IN" => "ADP",
        "JJ" | "JJR" | "JJRJR" | "JJS" => "ADJ",
        "MD" | "VB" | "VBD" | "VBG" | "VBN" | "VBP" | "VBZ" | "VP" => "VERB",
        "NN" | "NNP" | "NNPS" | "NNS" | "NP" => "NOUN",
        "POS" | "PRT" | "RP" | "TO" => "PRT",
        "PRP" | "PRP$" | "WP" | "WP$" => "PRON",
        "RB" | "RBR" | "RBS" | "WRB" => "ADV",
        _ => "X",
    }
}

/// Wraps a Penn tagger so it emits universal tags
pub struct UniversalMapped<T> {
    inner: T,
    name: String,
}

impl<T: PosTagger> UniversalMapped<T> {
    pub fn new(inner: T) -> Self {
        let name = format!("{} -> universal", inner.name());
        Self { inner, name }
    }
}

#[async_trait]
impl<T: PosTagger> PosTagger for UniversalMapped<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn tagset(&self) -> Tagset {
        Tagset::Universal
    }

    async fn tag(&self, tokens: &[String]) -> Result<Vec<TaggedToken>, TaggerError> {
        let tagged = self.inner.tag(tokens).await?;
        Ok(tagged
            .into_iter()
            .map(|t| {
                let tag = penn_to_universal(&t.tag);
                TaggedToken::new(t.token, tag)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::LexiconTagger;

    #[test]
    fn maps_the_penn_families() {
        assert_eq!(penn_to_universal("VBZ"), "VERB");
        assert_eq!(penn_to_universal("MD"), "VERB");
        assert_eq!(penn_to_universal("PRP$"), "PRON");
        assert_eq!(penn_to_universal("TO"), "PRT");
        assert_eq!(penn_to_universal("WRB"), "ADV");
        assert_eq!(penn_to_universal("UH"), "X");
        assert_eq!(penn_to_universal("NOT-A-TAG"), "X");
    }

    #[tokio::test]
    async fn mapped_lexicon_emits_universal_tags() {
        let tagger = UniversalMapped::new(LexiconTagger::with_defaults());
        let tokens: Vec<String> = ["i", "want", "to", "love", "you"]
            .iter()
            .map(|w| w.to_string())
            .collect();

        let tags: Vec<String> = tagger.tag(&tokens).await.unwrap().into_iter().map(|t| t.tag).collect();

        assert_eq!(tagger.tagset(), Tagset::Universal);
        assert_eq!(tags, vec!["PRON", "VERB", "PRT", "VERB", "PRON"]);
    }
}
