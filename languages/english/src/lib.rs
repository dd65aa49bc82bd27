pub mod detector;
pub mod lexicon;
pub mod processor;
pub mod pronouns;
pub mod remote_tagger;
pub mod rules;
pub mod tagset;
pub mod translator;

pub use detector::TrigramDetector;
pub use lexicon::LexiconTagger;
pub use processor::EnglishProcessor;
pub use pronouns::Person;
pub use remote_tagger::RemoteTagger;
pub use rules::RuleTagger;
pub use tagset::{UniversalMapped, penn_to_universal};
pub use translator::{DeepLTranslator, LibreTranslator};
