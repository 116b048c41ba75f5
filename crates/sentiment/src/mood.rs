//! Self-reported mood on a continuous scale.

/// Lowest and highest self-reported mood.
pub const MOOD_MIN: i32 = 1;
pub const MOOD_MAX: i32 = 5;

/// Map a 1–5 mood onto `[-1.0, 1.0]`: 1 → -1, 3 → 0, 5 → +1.
/// Out-of-range input is clamped first.
pub fn normalize_mood(mood: i32) -> f64 {
    let mood = mood.clamp(MOOD_MIN, MOOD_MAX);
    f64::from(mood - 3) / 2.0
}
