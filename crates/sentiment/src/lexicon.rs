//! Keyword valence for Japanese journal text.
//!
//! Matching is plain substring containment, so a word also matches inside a
//! longer word.  Each list entry counts at most once however often it occurs.

const POSITIVE_WORDS: &[&str] = &["楽しい", "嬉しい", "最高", "ワクワク", "よかった", "快適"];

const NEGATIVE_WORDS: &[&str] = &["疲れた", "しんどい", "最悪", "むかつく", "だるい", "不安"];

/// Net hits needed to saturate the scale.
const NORMALISER: f64 = 5.0;

fn hits(text: &str, words: &[&str]) -> usize {
    words.iter().filter(|w| text.contains(*w)).count()
}

/// Lexical valence of `text` in `[-1.0, 1.0]`: (positive hits − negative
/// hits) / 5, clamped.  Empty text is `0.0`.
pub fn lexical_valence(text: &str) -> f64 {
    let net = hits(text, POSITIVE_WORDS) as f64 - hits(text, NEGATIVE_WORDS) as f64;
    (net / NORMALISER).clamp(-1.0, 1.0)
}
