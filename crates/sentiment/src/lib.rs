//! Sentiment scoring for journal entries.
//!
//! An entry's text, emoji selection and self-reported mood are blended into a
//! single composite score in `[-1.0, 1.0]` plus a non-negative magnitude.
//! The text signal comes from a remote document-sentiment service when one is
//! configured and answers in time, and from fixed Japanese word lists
//! otherwise.  [`suggest`] turns the last few composite scores into advice.

pub mod analyzer;
pub mod combine;
pub mod emoji;
pub mod lexicon;
pub mod mood;
pub mod remote;
pub mod source;
pub mod trend;
pub mod types;

pub use analyzer::{DEFAULT_REMOTE_TIMEOUT, SentimentAnalyzer};
pub use combine::combine;
pub use emoji::{emoji_valence, parse_emojis};
pub use lexicon::lexical_valence;
pub use mood::normalize_mood;
pub use remote::RemoteSentimentClient;
pub use source::{LexicalSource, SentimentSource, SourceError};
pub use trend::{Suggestion, classify, suggest};
pub use types::{Analysis, ScorePoint, ScoreSeries, ScoreSource, SentimentInput, SentimentResult};
