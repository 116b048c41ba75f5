use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::emoji::parse_emojis;

/// One journal entry as seen by the analyzer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentimentInput {
    pub text: String,
    pub emojis: Vec<String>,
    /// Self-reported mood.  Clamped to `1..=5` when normalised, so any value
    /// is accepted here.
    pub mood: i32,
}

impl SentimentInput {
    /// Build an input from the form-style representation where emojis arrive
    /// as a single comma-delimited string (`"😊, 😄"`).
    pub fn new(text: impl Into<String>, emojis: &str, mood: i32) -> Self {
        Self {
            text: text.into(),
            emojis: parse_emojis(emojis),
            mood,
        }
    }
}

/// Final sentiment for one entry.  `score` is always in `[-1.0, 1.0]` and
/// `magnitude` is never negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub score: f64,
    pub magnitude: f64,
}

impl SentimentResult {
    pub fn new(score: f64, magnitude: f64) -> Self {
        Self {
            score: score.clamp(-1.0, 1.0),
            magnitude: magnitude.max(0.0),
        }
    }
}

/// Which path produced a [`SentimentResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreSource {
    Remote,
    Local,
}

impl ScoreSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreSource::Remote => "remote",
            ScoreSource::Local => "local",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    #[serde(flatten)]
    pub result: SentimentResult,
    pub source: ScoreSource,
}

// ── Score history ─────────────────────────────────────────────────────────────

/// A stored entry's contribution to the trend view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorePoint {
    pub date: NaiveDate,
    pub mood: i32,
    pub score: f64,
}

/// Read-only, date-ascending view over the most recent entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreSeries {
    points: Vec<ScorePoint>,
}

impl ScoreSeries {
    /// Default number of entries handed to the trend advisor.
    pub const DEFAULT_WINDOW: usize = 30;

    /// Keep the `window` most recent points of `history`, ordered oldest
    /// first.  Input order does not matter.
    pub fn from_history(mut history: Vec<ScorePoint>, window: usize) -> Self {
        history.sort_by(|a, b| a.date.cmp(&b.date));
        let skip = history.len().saturating_sub(window);
        history.drain(..skip);
        Self { points: history }
    }

    pub fn points(&self) -> &[ScorePoint] {
        &self.points
    }

    pub fn scores(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.score).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(day: u32, score: f64) -> ScorePoint {
        ScorePoint {
            date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            mood: 3,
            score,
        }
    }

    #[test]
    fn input_parses_comma_delimited_emojis() {
        let input = SentimentInput::new("text", " 😊 ,,😄 ", 4);
        assert_eq!(input.emojis, vec!["😊".to_string(), "😄".to_string()]);
        assert_eq!(input.mood, 4);
    }

    #[test]
    fn result_is_bounded() {
        let r = SentimentResult::new(1.7, -0.3);
        assert_eq!(r.score, 1.0);
        assert_eq!(r.magnitude, 0.0);
        assert_eq!(SentimentResult::new(-4.0, 2.5).score, -1.0);
    }

    #[test]
    fn series_sorts_ascending_and_keeps_most_recent() {
        let history = vec![point(3, 0.3), point(1, 0.1), point(4, 0.4), point(2, 0.2)];
        let series = ScoreSeries::from_history(history, 3);
        assert_eq!(series.len(), 3);
        assert_eq!(series.scores(), vec![0.2, 0.3, 0.4]);
        assert_eq!(series.points()[0].date, NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
    }

    #[test]
    fn series_shorter_than_window_is_kept_whole() {
        let series = ScoreSeries::from_history(vec![point(2, -0.1), point(1, 0.5)], 30);
        assert_eq!(series.scores(), vec![0.5, -0.1]);
        assert!(ScoreSeries::from_history(Vec::new(), 30).is_empty());
    }

    #[test]
    fn score_point_deserializes_from_json() {
        let raw = r#"[{"date":"2024-05-01","mood":2,"score":-0.4}]"#;
        let points: Vec<ScorePoint> = serde_json::from_str(raw).unwrap();
        assert_eq!(points[0].mood, 2);
        assert_eq!(points[0].score, -0.4);
    }

    #[test]
    fn analysis_serializes_flat() {
        let analysis = Analysis {
            result: SentimentResult::new(0.5, 1.0),
            source: ScoreSource::Local,
        };
        let json = serde_json::to_value(analysis).unwrap();
        assert_eq!(json["score"], 0.5);
        assert_eq!(json["magnitude"], 1.0);
        assert_eq!(json["source"], "local");
    }
}
