use async_trait::async_trait;
use euterpe_core::tagger::{PosTagger, TaggerError};
use euterpe_types::{TaggedToken, Tagset};

// Apostrophes split words, so contraction halves ("don", "t", "m") are listed too.
const PRONOUNS: &[&str] = &[
    "i", "me", "my", "mine", "myself", "you", "your", "yours", "yourself", "ya", "u", "he", "him",
    "his", "himself", "she", "her", "hers", "herself", "it", "its", "itself", "we", "us", "our",
    "ours", "ourselves", "they", "them", "their", "theirs", "themselves", "who", "whom", "what",
    "somebody", "someone", "nobody", "everybody", "everyone", "anyone",
];
const SUBJECTS: &[&str] = &["i", "you", "ya", "u", "he", "she", "it", "we", "they"];
const POSSESSIVES: &[&str] = &["my", "your", "his", "her", "its", "our", "their"];
const DETERMINERS: &[&str] = &[
    "the", "a", "an", "this", "these", "those", "every", "each", "some", "any", "no", "all",
    "another", "both", "which",
];
const ADPOSITIONS: &[&str] = &[
    "in", "on", "at", "by", "for", "with", "from", "of", "into", "onto", "over", "under",
    "through", "about", "without", "across", "around", "between", "behind", "before", "after",
    "until", "till", "than", "against", "within", "near", "upon", "beneath", "beyond", "inside",
    "outside", "since", "along", "towards",
];
const CONJUNCTIONS: &[&str] = &[
    "and", "or", "but", "nor", "so", "because", "cause", "if", "while", "although", "though",
    "unless", "whether",
];
const NUMBERS: &[&str] = &[
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
    "twelve", "twenty", "hundred", "thousand", "million",
];
const MODALS: &[&str] = &[
    "will", "would", "shall", "should", "can", "could", "may", "might", "must", "gonna", "wanna",
    "gotta", "ll", "won", "don", "doesn", "didn", "do", "does", "did", "let",
];
const AUXILIARIES: &[&str] = &[
    "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "m", "re", "s",
    "ve", "d", "ain", "isn", "aren", "wasn", "weren", "couldn", "wouldn", "shouldn", "haven",
];
const ADVERBS: &[&str] = &[
    "not", "t", "never", "always", "now", "here", "there", "just", "too", "very", "again", "ever",
    "still", "only", "really", "away", "back", "then", "tonight", "today", "forever", "together",
    "maybe", "more", "much", "even", "when", "where", "why", "how", "once", "anymore", "yet",
    "also", "soon", "alone",
];
const PARTICLES: &[&str] = &["up", "out", "off", "down"];
const INTERJECTIONS: &[&str] = &[
    "oh", "ooh", "ah", "uh", "yeah", "yea", "la", "na", "hey", "whoa", "woah", "mmm", "hmm",
    "ha", "da", "doo", "yo", "ay",
];
const VERBS: &[&str] = &[
    "love", "want", "know", "need", "feel", "see", "go", "come", "get", "make", "take", "give",
    "say", "think", "tell", "hold", "keep", "stay", "dance", "cry", "leave", "call", "try",
    "believe", "remember", "find", "break", "fall", "run", "look", "hear", "touch", "kiss",
    "wait", "live", "die", "sing", "got", "said", "made", "went", "came", "knew", "felt", "saw",
];
const ADJECTIVES: &[&str] = &[
    "good", "bad", "new", "old", "little", "big", "happy", "sad", "sweet", "cold", "hot", "young",
    "free", "real", "right", "wrong", "true", "lonely", "crazy", "high", "low", "long", "own",
    "last", "other", "same", "blue", "red", "whole", "wild", "strong", "alright", "first",
];
const NOUNS: &[&str] = &[
    "thing", "something", "nothing", "everything", "anything", "morning", "evening", "king",
    "ring", "spring", "string", "wing", "heart", "night", "day", "time", "baby", "girl", "boy",
    "world", "life", "way", "man", "woman", "eyes", "home", "mind", "soul",
];
const NOUN_SUFFIXES: &[&str] = &["tion", "sion", "ness", "ment", "ity", "ship", "hood", "ism"];
const ADJECTIVE_SUFFIXES: &[&str] = &["ous", "ful", "less", "able", "ible", "ive", "ish", "ic", "al"];

/// Universal tagger built from closed word classes, suffix shapes and
/// neighbouring tags. Shares nothing with the Penn lexicon, so the two
/// stages can disagree.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleTagger;

impl RuleTagger {
    pub fn new() -> Self {
        Self
    }

    /// One universal tag per token
    pub fn tag_words(&self, tokens: &[String]) -> Vec<TaggedToken> {
        let words: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();
        let mut tags: Vec<&'static str> = Vec::with_capacity(words.len());

        for (i, word) in words.iter().enumerate() {
            let prev = i.checked_sub(1).map(|p| (words[p].as_str(), tags[p]));
            let before_prev = i.checked_sub(2).map(|p| tags[p]);
            let next = words.get(i + 1).map(String::as_str);

            let tag = closed_class(word, prev, before_prev, next)
                .or_else(|| open_list(word))
                .or_else(|| by_shape(word, prev))
                .unwrap_or_else(|| by_context(prev, before_prev, next));
            tags.push(tag);
        }

        tokens
            .iter()
            .zip(tags)
            .map(|(token, tag)| TaggedToken::new(token.clone(), tag))
            .collect()
    }
}

fn closed_class(
    word: &str,
    prev: Option<(&str, &'static str)>,
    before_prev: Option<&'static str>,
    next: Option<&str>,
) -> Option<&'static str> {
    let prev_tag = prev.map(|(_, tag)| tag);

    match word {
        // to the river / to love
        "to" => {
            let next_is_nominal = next.is_some_and(|n| {
                DETERMINERS.contains(&n) || POSSESSIVES.contains(&n) || NUMBERS.contains(&n)
            });
            return Some(if next_is_nominal { "ADP" } else { "PRT" });
        }
        // picked it up / up the hill
        w if PARTICLES.contains(&w) => {
            let after_verb = prev_tag == Some("VERB") || before_prev == Some("VERB");
            return Some(if after_verb { "PRT" } else { "ADP" });
        }
        "that" => return Some(if prev_tag == Some("VERB") { "ADP" } else { "DET" }),
        "like" => {
            let after_subject = prev.is_some_and(|(w, _)| SUBJECTS.contains(&w));
            return Some(if after_subject { "VERB" } else { "ADP" });
        }
        _ => {}
    }

    let tables: [(&[&str], &'static str); 9] = [
        (PRONOUNS, "PRON"),
        (DETERMINERS, "DET"),
        (ADPOSITIONS, "ADP"),
        (CONJUNCTIONS, "CONJ"),
        (NUMBERS, "NUM"),
        (MODALS, "VERB"),
        (AUXILIARIES, "VERB"),
        (ADVERBS, "ADV"),
        (INTERJECTIONS, "X"),
    ];
    tables
        .iter()
        .find(|(words, _)| words.contains(&word))
        .map(|(_, tag)| *tag)
}

fn open_list(word: &str) -> Option<&'static str> {
    if VERBS.contains(&word) {
        Some("VERB")
    } else if ADJECTIVES.contains(&word) {
        Some("ADJ")
    } else if NOUNS.contains(&word) {
        Some("NOUN")
    } else {
        None
    }
}

fn by_shape(word: &str, prev: Option<(&str, &'static str)>) -> Option<&'static str> {
    let len = word.chars().count();

    if word.chars().all(|c| c.is_ascii_digit()) {
        return Some("NUM");
    }
    if len > 3 && word.ends_with("ly") {
        return Some("ADV");
    }
    // groovin, runnin; a determiner in front makes it a noun
    if (len > 4 && word.ends_with("ing")) || (len > 5 && word.ends_with("in")) {
        let nominal = prev.is_some_and(|(w, tag)| tag == "DET" || POSSESSIVES.contains(&w));
        return Some(if nominal { "NOUN" } else { "VERB" });
    }
    if len > 3 && word.ends_with("ed") {
        return Some("VERB");
    }
    if NOUN_SUFFIXES.iter().any(|s| word.ends_with(s)) {
        return Some("NOUN");
    }
    if len > 4 && (word.ends_with("est") || ADJECTIVE_SUFFIXES.iter().any(|s| word.ends_with(s))) {
        return Some("ADJ");
    }
    None
}

fn by_context(
    prev: Option<(&str, &'static str)>,
    before_prev: Option<&'static str>,
    next: Option<&str>,
) -> &'static str {
    if let Some((prev_word, prev_tag)) = prev {
        // i walk, but not "give it walks"
        if SUBJECTS.contains(&prev_word) && !matches!(before_prev, Some("VERB" | "ADP" | "PRT")) {
            return "VERB";
        }
        if prev_tag == "PRT" || MODALS.contains(&prev_word) {
            return "VERB";
        }
        // don t stop
        if matches!(prev_word, "t" | "not" | "never") && before_prev == Some("VERB") {
            return "VERB";
        }
        if matches!(prev_tag, "DET" | "ADJ" | "NUM") || POSSESSIVES.contains(&prev_word) {
            return "NOUN";
        }
    }
    if next.is_some_and(|n| DETERMINERS.contains(&n) || PRONOUNS.contains(&n)) {
        return "VERB";
    }
    "NOUN"
}

#[async_trait]
impl PosTagger for RuleTagger {
    fn name(&self) -> &str {
        "rules (universal)"
    }

    fn tagset(&self) -> Tagset {
        Tagset::Universal
    }

    async fn tag(&self, tokens: &[String]) -> Result<Vec<TaggedToken>, TaggerError> {
        Ok(self.tag_words(tokens))
    }
}
