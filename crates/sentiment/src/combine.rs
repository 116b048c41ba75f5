//! Fixed-weight blend of the three valence signals.
//!
//! The same weights apply whether `primary` came from the remote analyzer or
//! the local word lists.

pub const PRIMARY_WEIGHT: f64 = 0.5;
pub const EMOJI_WEIGHT: f64 = 0.3;
pub const MOOD_WEIGHT: f64 = 0.2;

/// `0.5·primary + 0.3·emoji + 0.2·mood`, clamped to `[-1.0, 1.0]`.
pub fn combine(primary: f64, emoji: f64, mood: f64) -> f64 {
    (PRIMARY_WEIGHT * primary + EMOJI_WEIGHT * emoji + MOOD_WEIGHT * mood).clamp(-1.0, 1.0)
}
