//! Client for the remote document-sentiment service (Google Natural Language
//! `documents:analyzeSentiment` wire format).

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use moodjournal_config::RemoteConfig;

use crate::source::{SentimentSource, SourceError};
use crate::types::SentimentResult;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Document<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    content: &'a str,
    language_code: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeRequest<'a> {
    document: Document<'a>,
    encoding_type: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeResponse {
    document_sentiment: Option<DocumentSentiment>,
}

#[derive(Debug, Deserialize)]
struct DocumentSentiment {
    score: Option<f64>,
    magnitude: Option<f64>,
}

fn build_request<'a>(text: &'a str, language: &'a str) -> AnalyzeRequest<'a> {
    AnalyzeRequest {
        document: Document {
            kind: "PLAIN_TEXT",
            content: text,
            language_code: language,
        },
        encoding_type: "UTF8",
    }
}

/// Validate a response body into a [`SentimentResult`].
///
/// Missing fields, non-finite numbers, a score outside `[-1, 1]` and a
/// negative magnitude are all rejected rather than clamped.
fn parse_response(body: &str) -> Result<SentimentResult, SourceError> {
    let parsed: AnalyzeResponse =
        serde_json::from_str(body).map_err(|e| SourceError::Malformed(e.to_string()))?;
    let sentiment = parsed
        .document_sentiment
        .ok_or_else(|| SourceError::Malformed("missing documentSentiment".to_string()))?;

    // The service omits zero-valued fields.
    let score = sentiment.score.unwrap_or(0.0);
    let magnitude = sentiment.magnitude.unwrap_or(0.0);

    if !score.is_finite() || !(-1.0..=1.0).contains(&score) {
        return Err(SourceError::Malformed(format!("score out of range: {score}")));
    }
    if !magnitude.is_finite() || magnitude < 0.0 {
        return Err(SourceError::Malformed(format!("invalid magnitude: {magnitude}")));
    }

    Ok(SentimentResult::new(score, magnitude))
}

/// Longest error body kept in a [`SourceError::Status`].
const MAX_ERROR_BODY: usize = 512;

/// Cut `body` to at most [`MAX_ERROR_BODY`] bytes on a char boundary.
fn truncate_body(mut body: String) -> String {
    if body.len() > MAX_ERROR_BODY {
        let mut end = MAX_ERROR_BODY;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        body.truncate(end);
        body.push('…');
    }
    body
}

#[derive(Clone)]
pub struct RemoteSentimentClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    language: String,
}

impl std::fmt::Debug for RemoteSentimentClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteSentimentClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("language", &self.language)
            .finish()
    }
}

impl RemoteSentimentClient {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        language: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent("moodjournal/0.1")
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            language: language.into(),
        })
    }

    /// Build a client from configuration.  Fails with
    /// [`SourceError::NotConfigured`] when the switch is off or the endpoint
    /// or key is missing.
    pub fn from_config(config: &RemoteConfig, language: &str) -> Result<Self, SourceError> {
        if !config.is_configured() {
            return Err(SourceError::NotConfigured);
        }
        Self::new(
            config.endpoint.trim(),
            config.api_key.trim(),
            language,
            config.timeout(),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SentimentSource for RemoteSentimentClient {
    fn name(&self) -> &str {
        "remote"
    }

    async fn analyze(&self, text: &str) -> Result<SentimentResult, SourceError> {
        let payload = build_request(text, &self.language);
        debug!(endpoint = %self.endpoint, language = %self.language, "remote sentiment request");

        let response = self
            .client
            .post(&self.endpoint)
            .header("X-Goog-Api-Key", &self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                body: truncate_body(body),
            });
        }

        parse_response(&body)
    }
}
