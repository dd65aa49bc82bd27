pub mod artist;
pub mod compare;
pub mod error;
pub mod language;
pub mod preprocess;
pub mod table;
pub mod tagger;

pub use error::PipelineError;
