pub mod fillers;
pub mod index;
pub mod ngram;
pub mod options;
pub mod rank;
pub mod similarity;
pub mod stemmer;
pub mod tokenizer;

pub use fillers::FillerWords;
pub use index::{idf, tf, CoOccurrenceMatrix, CorpusIndex, CorpusStats, SentenceId};
pub use ngram::TokenCount;
pub use options::{CoOccurrenceMethod, NgramOptions, RankOptions};
pub use rank::RankedSentence;
pub use similarity::character_similarity;
pub use stemmer::stem;
