//! Trend advice over the most recent composite scores.

use serde::{Deserialize, Serialize};

/// Number of trailing scores averaged for a suggestion.
pub const TREND_WINDOW: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Suggestion {
    /// Average below -0.5.
    GoOutside,
    /// Average in `[-0.5, -0.2)`.
    ShortWalk,
    /// Average above 0.3.
    StrongAffirmation,
    /// Average in `(0, 0.3]`.
    MildAffirmation,
}

impl Suggestion {
    /// User-facing text shown on the journal home page.
    pub fn message(&self) -> &'static str {
        match self {
            Suggestion::GoOutside => {
                "💡ここ数日かなり低調です。思い切って外に出て、日の光を浴びてみませんか？☀️"
            }
            Suggestion::ShortWalk => "💡最近少し低調です。近所を5分散歩してみませんか？🌿",
            Suggestion::StrongAffirmation => "🎉とても良い調子が続いています！この流れを大切に✨",
            Suggestion::MildAffirmation => "🙂穏やかに過ごせていますね。その調子です",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Suggestion::GoOutside => "go_outside",
            Suggestion::ShortWalk => "short_walk",
            Suggestion::StrongAffirmation => "strong_affirmation",
            Suggestion::MildAffirmation => "mild_affirmation",
        }
    }
}

/// Map a trailing average onto a suggestion.  First match wins; averages in
/// `[-0.2, 0]` get none.
pub fn classify(avg: f64) -> Option<Suggestion> {
    if avg < -0.5 {
        Some(Suggestion::GoOutside)
    } else if avg < -0.2 {
        Some(Suggestion::ShortWalk)
    } else if avg > 0.3 {
        Some(Suggestion::StrongAffirmation)
    } else if avg > 0.0 {
        Some(Suggestion::MildAffirmation)
    } else {
        None
    }
}

/// Suggest something from a date-ascending score series.  Needs at least
/// [`TREND_WINDOW`] scores.
pub fn suggest(scores: &[f64]) -> Option<Suggestion> {
    if scores.len() < TREND_WINDOW {
        return None;
    }
    let tail = &scores[scores.len() - TREND_WINDOW..];
    let avg = tail.iter().sum::<f64>() / TREND_WINDOW as f64;
    classify(avg)
}
