use serde::{Deserialize, Serialize};

const FIRST_PERSON: [&str; 8] = ["i", "me", "my", "mine", "we", "us", "our", "ours"];
const SECOND_PERSON: [&str; 4] = ["you", "your", "yours", "u"];
const THIRD_PERSON: [&str; 12] = [
    "he", "him", "his", "she", "her", "hers", "they", "them", "their", "theirs", "it", "its",
];

/// Grammatical person filter for English pronouns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Person {
    #[default]
    All,
    First,
    Second,
    Third,
}

impl Person {
    /// Whether a lowercase pronoun belongs to this person
    pub fn matches(&self, pronoun: &str) -> bool {
        match self {
            Person::All => true,
            Person::First => FIRST_PERSON.contains(&pronoun),
            Person::Second => SECOND_PERSON.contains(&pronoun),
            Person::Third => THIRD_PERSON.contains(&pronoun),
        }
    }
}
