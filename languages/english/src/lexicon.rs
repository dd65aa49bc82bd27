use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use euterpe_core::tagger::{PosTagger, TaggerError};
use euterpe_types::{TaggedToken, Tagset};

const EMBEDDED_LEXICON: &str = include_str!("../data/lexicon.tsv");

const SUBJECT_PLURAL: [&str; 5] = ["i", "you", "we", "they", "ya"];
const SUBJECT_SINGULAR: [&str; 3] = ["he", "she", "it"];

/// Penn Treebank tagger driven by a word lexicon.
///
/// Known words take their first listed reading, unknown words are guessed
/// from their shape, and a left-to-right pass repairs the readings that depend
/// on the previous word.
pub struct LexiconTagger {
    lexicon: HashMap<String, Vec<String>>,
}

impl LexiconTagger {
    /// Built-in lexicon only
    pub fn with_defaults() -> Self {
        let mut tagger = Self {
            lexicon: HashMap::new(),
        };
        tagger.merge(EMBEDDED_LEXICON);
        tagger
    }

    /// Built-in lexicon with `path` layered on top, when given
    pub fn with_lexicon_file(path: Option<&Path>) -> Result<Self, TaggerError> {
        let mut tagger = Self::with_defaults();
        if let Some(path) = path {
            let content = std::fs::read_to_string(path).map_err(|source| TaggerError::Lexicon {
                path: path.to_path_buf(),
                source,
            })?;
            let added = tagger.merge(&content);
            tracing::info!("Merged {} lexicon entries from {}", added, path.display());
        }
        Ok(tagger)
    }

    /// Load `word<TAB>TAG[|ALT...]` lines, replacing existing entries.
    /// Returns the number of entries read.
    fn merge(&mut self, content: &str) -> usize {
        let mut added = 0;
        for line in content.lines() {
            let line = line.trim_end();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((word, tags)) = line.split_once('\t') else {
                continue;
            };
            let tags: Vec<String> = tags
                .split('|')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect();
            if word.is_empty() || tags.is_empty() {
                continue;
            }
            self.lexicon.insert(word.to_lowercase(), tags);
            added += 1;
        }
        added
    }

    fn readings(&self, word: &str) -> Option<&[String]> {
        self.lexicon.get(word).map(Vec::as_slice)
    }

    fn can_be(&self, word: &str, tag: &str) -> bool {
        self.readings(word)
            .is_some_and(|tags| tags.iter().any(|t| t == tag))
    }

    /// One Penn tag per token
    pub fn tag_words(&self, tokens: &[String]) -> Vec<TaggedToken> {
        let mut tags: Vec<String> = tokens
            .iter()
            .map(|word| {
                let word = word.to_lowercase();
                match self.readings(&word) {
                    Some(tags) => tags[0].clone(),
                    None => guess_unknown(&word).to_string(),
                }
            })
            .collect();

        for i in 1..tokens.len() {
            let prev_word = tokens[i - 1].to_lowercase();
            let word = tokens[i].to_lowercase();
            if let Some(repaired) = self.repair(&prev_word, &tags[i - 1], &word, &tags[i]) {
                tags[i] = repaired.to_string();
            }
        }

        tokens
            .iter()
            .zip(tags)
            .map(|(token, tag)| TaggedToken::new(token.clone(), tag))
            .collect()
    }

    fn repair(&self, prev_word: &str, prev_tag: &str, word: &str, tag: &str) -> Option<&'static str> {
        let unknown = self.readings(word).is_none();

        match prev_tag {
            // to love, can dance
            "TO" | "MD" => {
                if tag == "VBP" || (tag != "VB" && self.can_be(word, "VB")) {
                    return Some("VB");
                }
                if unknown && tag == "NN" {
                    return Some("VB");
                }
            }
            // my love, the dance
            "DT" | "PRP$" | "JJ" => {
                if matches!(tag, "VB" | "VBP") && self.can_be(word, "NN") {
                    return Some("NN");
                }
            }
            "NN" | "NNS" | "NNP" if word == "s" => return Some("POS"),
            _ => {}
        }

        if SUBJECT_PLURAL.contains(&prev_word) {
            if matches!(tag, "NN" | "VB") && (self.can_be(word, "VBP") || unknown) {
                return Some("VBP");
            }
        } else if SUBJECT_SINGULAR.contains(&prev_word) && tag == "NNS" {
            // she loves
            return Some("VBZ");
        }

        None
    }
}

/// Tag from word shape alone
fn guess_unknown(word: &str) -> &'static str {
    let len = word.chars().count();

    if word.chars().all(|c| c.is_ascii_digit()) {
        return "CD";
    }
    // groovin, runnin
    if (len > 4 && word.ends_with("ing")) || (len > 5 && word.ends_with("in")) {
        return "VBG";
    }
    if len > 3 && word.ends_with("ed") {
        return "VBD";
    }
    if len > 3 && word.ends_with("ly") {
        return "RB";
    }
    if ["tion", "sion", "ness", "ment", "ity", "ship", "hood", "ism"]
        .iter()
        .any(|s| word.ends_with(s))
    {
        return "NN";
    }
    if len > 4 && word.ends_with("est") {
        return "JJS";
    }
    if len > 4
        && ["ous", "ful", "less", "able", "ible", "ive", "ish", "ic", "al"]
            .iter()
            .any(|s| word.ends_with(s))
    {
        return "JJ";
    }
    if len > 3 && word.ends_with('s') && !word.ends_with("ss") {
        return "NNS";
    }
    "NN"
}

#[async_trait]
impl PosTagger for LexiconTagger {
    fn name(&self) -> &str {
        "lexicon (Penn)"
    }

    fn tagset(&self) -> Tagset {
        Tagset::Penn
    }

    async fn tag(&self, tokens: &[String]) -> Result<Vec<TaggedToken>, TaggerError> {
        Ok(self.tag_words(tokens))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn words(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    fn tags_of(tagger: &LexiconTagger, text: &str) -> Vec<String> {
        tagger
            .tag_words(&words(text))
            .into_iter()
            .map(|t| t.tag)
            .collect()
    }

    #[test]
    fn one_tag_per_token() {
        let tagger = LexiconTagger::with_defaults();
        let tokens = words("never gonna give you up never gonna let you down zzzq");

        assert_eq!(tagger.tag_words(&tokens).len(), tokens.len());
        assert!(tagger.tag_words(&[]).is_empty());
    }

    #[test]
    fn closed_class_words_come_from_the_lexicon() {
        let tagger = LexiconTagger::with_defaults();
        assert_eq!(tags_of(&tagger, "i and the of"), vec!["PRP", "CC", "DT", "IN"]);
    }

    #[test]
    fn context_picks_verb_or_noun_reading() {
        let tagger = LexiconTagger::with_defaults();

        assert_eq!(tags_of(&tagger, "i want to love"), vec!["PRP", "VBP", "TO", "VB"]);
        assert_eq!(tags_of(&tagger, "my love"), vec!["PRP$", "NN"]);
        assert_eq!(tags_of(&tagger, "we dream"), vec!["PRP", "VBP"]);
    }

    #[test]
    fn unknown_words_use_their_shape() {
        let tagger = LexiconTagger::with_defaults();

        assert_eq!(
            tags_of(&tagger, "1999 groovin quickly shattered emotion"),
            vec!["CD", "VBG", "RB", "VBD", "NN"]
        );
        assert_eq!(tags_of(&tagger, "she blooms"), vec!["PRP", "VBZ"]);
    }

    #[test]
    fn lexicon_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("extra.tsv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "# extra words").unwrap();
        writeln!(file, "baby\tUH").unwrap();
        writeln!(file, "malformed line").unwrap();
        writeln!(file, "despacito\tRB").unwrap();

        let tagger = LexiconTagger::with_lexicon_file(Some(&path)).unwrap();
        assert_eq!(tags_of(&tagger, "baby despacito"), vec!["UH", "RB"]);
    }

    #[test]
    fn missing_lexicon_file_is_an_error() {
        let err = LexiconTagger::with_lexicon_file(Some(Path::new("/nonexistent/lexicon.tsv")));
        assert!(matches!(err, Err(TaggerError::Lexicon { .. })));
    }
}
