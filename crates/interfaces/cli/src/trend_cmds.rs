use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use moodjournal_sentiment::{ScorePoint, ScoreSeries, suggest};

/// Read a JSON array of `{date, mood, score}` entries and keep the most
/// recent `window` of them.
pub(crate) fn load_series(path: &Path, window: usize) -> Result<ScoreSeries> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading history from {}", path.display()))?;
    let points: Vec<ScorePoint> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing history in {}", path.display()))?;
    Ok(ScoreSeries::from_history(points, window))
}

pub(crate) fn render_suggestion(scores: &[f64]) -> String {
    match suggest(scores) {
        Some(suggestion) => format!("[{}] {}", suggestion.as_str(), suggestion.message()),
        None => "no suggestion".to_string(),
    }
}
