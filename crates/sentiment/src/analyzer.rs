//! Sentiment orchestration: remote first, word lists as the fallback.
//!
//! [`SentimentAnalyzer::analyze`] is total.  Whatever happens on the remote
//! path, the caller gets a bounded [`SentimentResult`].

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use moodjournal_config::{AppConfig, DEFAULT_TIMEOUT_SECS};

use crate::combine::combine;
use crate::emoji::emoji_valence;
use crate::mood::normalize_mood;
use crate::remote::RemoteSentimentClient;
use crate::source::{LexicalSource, SentimentSource, SourceError};
use crate::types::{Analysis, ScoreSource, SentimentInput, SentimentResult};

/// Applied when no timeout is configured.
pub const DEFAULT_REMOTE_TIMEOUT: Duration = Duration::from_secs(DEFAULT_TIMEOUT_SECS);

#[derive(Clone)]
pub struct SentimentAnalyzer {
    remote: Option<Arc<dyn SentimentSource>>,
    local: LexicalSource,
    timeout: Duration,
}

impl std::fmt::Debug for SentimentAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentimentAnalyzer")
            .field("remote", &self.remote.as_ref().map(|r| r.name().to_string()))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::local()
    }
}

impl SentimentAnalyzer {
    /// Analyzer that only ever scores locally.
    pub fn local() -> Self {
        Self {
            remote: None,
            local: LexicalSource,
            timeout: DEFAULT_REMOTE_TIMEOUT,
        }
    }

    pub fn with_remote(remote: Arc<dyn SentimentSource>, timeout: Duration) -> Self {
        Self {
            remote: Some(remote),
            local: LexicalSource,
            timeout,
        }
    }

    /// Wire up the remote client when the configuration allows it; otherwise
    /// fall back to [`SentimentAnalyzer::local`].
    pub fn from_config(config: &AppConfig) -> Self {
        let timeout = config.remote.timeout();
        match RemoteSentimentClient::from_config(&config.remote, &config.journal.language) {
            Ok(client) => Self::with_remote(Arc::new(client), timeout),
            Err(SourceError::NotConfigured) => {
                debug!("remote sentiment not configured; scoring locally");
                Self::local()
            }
            Err(error) => {
                warn!(%error, "remote sentiment client could not be built; scoring locally");
                Self::local()
            }
        }
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    pub async fn analyze(&self, input: &SentimentInput) -> SentimentResult {
        self.analyze_detailed(input).await.result
    }

    /// Like [`analyze`](Self::analyze) but also reports which path produced
    /// the score.
    pub async fn analyze_detailed(&self, input: &SentimentInput) -> Analysis {
        let emoji = emoji_valence(&input.emojis);
        let mood = normalize_mood(input.mood);

        match self.try_remote(&input.text).await {
            Ok(remote) => {
                let score = combine(remote.score, emoji, mood);
                debug!(remote = remote.score, emoji, mood, score, "scored via remote");
                Analysis {
                    result: SentimentResult::new(score, remote.magnitude),
                    source: ScoreSource::Remote,
                }
            }
            Err(SourceError::NotConfigured) => self.fallback(&input.text, emoji, mood),
            Err(error) => {
                warn!(%error, "remote sentiment failed; falling back to local scoring");
                self.fallback(&input.text, emoji, mood)
            }
        }
    }

    /// One attempt, bounded by the timeout.  No retries.
    async fn try_remote(&self, text: &str) -> Result<SentimentResult, SourceError> {
        let remote = self.remote.as_ref().ok_or(SourceError::NotConfigured)?;
        match tokio::time::timeout(self.timeout, remote.analyze(text)).await {
            Ok(result) => result,
            Err(_) => Err(SourceError::Timeout(self.timeout)),
        }
    }

    /// Magnitude here is text plus emoji intensity; the self-reported mood is
    /// deliberately left out.
    fn fallback(&self, text: &str, emoji: f64, mood: f64) -> Analysis {
        let reading = self.local.reading(text);
        let score = combine(reading.score, emoji, mood);
        debug!(text = reading.score, emoji, mood, score, "scored locally");
        Analysis {
            result: SentimentResult::new(score, reading.magnitude + emoji.abs()),
            source: ScoreSource::Local,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Remote stand-in with scripted behaviour.
    enum Script {
        Succeed(SentimentResult),
        Fail,
        Hang,
    }

    struct StubSource {
        script: Script,
        calls: AtomicUsize,
    }

    impl StubSource {
        fn new(script: Script) -> Arc<Self> {
            Arc::new(Self {
                script,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl SentimentSource for StubSource {
        fn name(&self) -> &str {
            "stub"
        }

        async fn analyze(&self, _text: &str) -> Result<SentimentResult, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.script {
                Script::Succeed(result) => Ok(*result),
                Script::Fail => Err(SourceError::Status {
                    status: 500,
                    body: "boom".to_string(),
                }),
                Script::Hang => {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    Ok(SentimentResult::new(1.0, 1.0))
                }
            }
        }
    }

    fn positive() -> SentimentInput {
        SentimentInput::new("今日は最高の一日でした！", "😊,😄", 5)
    }

    fn negative() -> SentimentInput {
        SentimentInput::new("疲れたし、最悪の一日だった", "😢,😞", 1)
    }

    #[tokio::test]
    async fn local_positive_entry_scores_positive() {
        let analysis = SentimentAnalyzer::local().analyze_detailed(&positive()).await;
        assert_eq!(analysis.source, ScoreSource::Local);
        // 0.5·0.2 + 0.3·0.75 + 0.2·1.0
        assert!((analysis.result.score - 0.525).abs() < 1e-9, "{analysis:?}");
        assert!((analysis.result.magnitude - 0.95).abs() < 1e-9, "{analysis:?}");
    }

    #[tokio::test]
    async fn local_negative_entry_scores_negative() {
        let result = SentimentAnalyzer::local().analyze(&negative()).await;
        // 0.5·-0.4 + 0.3·-0.65 + 0.2·-1.0
        assert!((result.score + 0.595).abs() < 1e-9, "{result:?}");
        assert!((result.magnitude - 1.05).abs() < 1e-9, "{result:?}");
    }

    #[tokio::test]
    async fn neutral_entry_is_zero() {
        let input = SentimentInput::new("普通の一日でした", "😐", 3);
        let result = SentimentAnalyzer::local().analyze(&input).await;
        assert_eq!(result, SentimentResult::new(0.0, 0.0));
    }

    #[tokio::test]
    async fn mood_is_excluded_from_local_magnitude() {
        let input = SentimentInput::new("", "", 5);
        let result = SentimentAnalyzer::local().analyze(&input).await;
        assert!((result.score - 0.2).abs() < 1e-9);
        assert_eq!(result.magnitude, 0.0);
    }

    #[tokio::test]
    async fn remote_score_is_blended_and_magnitude_passed_through() {
        let stub = StubSource::new(Script::Succeed(SentimentResult::new(-0.8, 3.4)));
        let analyzer = SentimentAnalyzer::with_remote(stub.clone(), Duration::from_secs(1));
        let analysis = analyzer.analyze_detailed(&positive()).await;

        assert_eq!(analysis.source, ScoreSource::Remote);
        // 0.5·-0.8 + 0.3·0.75 + 0.2·1.0
        assert!((analysis.result.score - 0.025).abs() < 1e-9, "{analysis:?}");
        assert_eq!(analysis.result.magnitude, 3.4);
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failing_remote_falls_back_after_one_attempt() {
        let stub = StubSource::new(Script::Fail);
        let analyzer = SentimentAnalyzer::with_remote(stub.clone(), Duration::from_secs(1));
        let remote_failed = analyzer.analyze_detailed(&positive()).await;
        let local_only = SentimentAnalyzer::local().analyze_detailed(&positive()).await;

        assert_eq!(remote_failed, local_only);
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn hanging_remote_times_out_to_fallback() {
        let stub = StubSource::new(Script::Hang);
        let analyzer = SentimentAnalyzer::with_remote(stub, Duration::from_millis(50));
        let analysis = analyzer.analyze_detailed(&negative()).await;
        assert_eq!(analysis.source, ScoreSource::Local);
        assert!(analysis.result.score < 0.0);
    }

    #[tokio::test]
    async fn always_failing_remote_keeps_results_bounded() {
        let analyzer =
            SentimentAnalyzer::with_remote(StubSource::new(Script::Fail), Duration::from_secs(1));
        let texts = ["", "楽しい嬉しい最高ワクワクよかった快適", "疲れたしんどい最悪むかつくだるい不安"];
        let emojis = ["", "😁,😁,😁", "😡,😢", "🦀, ,😐"];
        for text in texts {
            for glyphs in emojis {
                for mood in [-3, 1, 3, 5, 42] {
                    let result = analyzer.analyze(&SentimentInput::new(text, glyphs, mood)).await;
                    assert!((-1.0..=1.0).contains(&result.score), "{result:?}");
                    assert!(result.magnitude >= 0.0, "{result:?}");
                }
            }
        }
    }

    #[tokio::test]
    async fn unconfigured_config_yields_local_analyzer() {
        let analyzer = SentimentAnalyzer::from_config(&AppConfig::default());
        assert!(!analyzer.has_remote());
        let analysis = analyzer.analyze_detailed(&positive()).await;
        assert_eq!(analysis.source, ScoreSource::Local);
    }

    #[tokio::test]
    async fn unreachable_remote_endpoint_falls_back() {
        let mut config = AppConfig::default();
        config.remote.endpoint = "http://127.0.0.1:9/analyze".to_string();
        config.remote.api_key = "key".to_string();
        config.remote.timeout_secs = 2;

        let analyzer = SentimentAnalyzer::from_config(&config);
        assert!(analyzer.has_remote());
        let analysis = analyzer.analyze_detailed(&positive()).await;
        assert_eq!(analysis.source, ScoreSource::Local);
        assert!(analysis.result.score > 0.0);
    }
}
