use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::lexicon::lexical_valence;
use crate::types::SentimentResult;

/// Why a sentiment source could not produce a reading.  The analyzer treats
/// every variant the same way: score locally instead.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("sentiment source is not configured")]
    NotConfigured,
    #[error("sentiment source timed out after {0:?}")]
    Timeout(Duration),
    #[error("sentiment request failed: {0}")]
    Transport(reqwest::Error),
    #[error("sentiment service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed sentiment response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for SourceError {
    /// The request URL is stripped so an endpoint carrying credentials never
    /// reaches logs.
    fn from(error: reqwest::Error) -> Self {
        SourceError::Transport(error.without_url())
    }
}

/// Anything that can turn free text into a document-level score and
/// magnitude.
#[async_trait]
pub trait SentimentSource: Send + Sync {
    fn name(&self) -> &str;

    async fn analyze(&self, text: &str) -> Result<SentimentResult, SourceError>;
}

/// Word-list scorer used when the remote analyzer is unavailable.  Never
/// fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalSource;

impl LexicalSource {
    /// Score is the lexical valence; magnitude is its absolute value.
    pub fn reading(&self, text: &str) -> SentimentResult {
        let valence = lexical_valence(text);
        SentimentResult::new(valence, valence.abs())
    }
}

#[async_trait]
impl SentimentSource for LexicalSource {
    fn name(&self) -> &str {
        "lexical"
    }

    async fn analyze(&self, text: &str) -> Result<SentimentResult, SourceError> {
        Ok(self.reading(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lexical_source_never_fails() {
        let source = LexicalSource;
        let result = source.analyze("疲れたし、最悪の一日だった").await.unwrap();
        assert!((result.score + 0.4).abs() < 1e-9);
        assert!((result.magnitude - 0.4).abs() < 1e-9);

        let empty = source.analyze("").await.unwrap();
        assert_eq!(empty, SentimentResult::new(0.0, 0.0));
    }

    #[test]
    fn error_messages_are_readable() {
        let err = SourceError::Status {
            status: 403,
            body: "forbidden".to_string(),
        };
        assert_eq!(err.to_string(), "sentiment service returned 403: forbidden");
        assert_eq!(
            SourceError::NotConfigured.to_string(),
            "sentiment source is not configured"
        );
    }
}
