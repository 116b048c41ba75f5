//! Emoji valence lookup.

/// Approximate emotional polarity of the emojis offered by the entry form.
const EMOJI_VALENCE: &[(&str, f64)] = &[
    ("😊", 0.7),
    ("😄", 0.8),
    ("😁", 0.9),
    ("😆", 0.8),
    ("🙂", 0.4),
    ("😢", -0.7),
    ("😞", -0.6),
    ("😡", -0.8),
    ("😐", 0.0),
    ("😴", -0.2),
];

/// Split a comma-delimited emoji field into trimmed, non-empty glyphs.
pub fn parse_emojis(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|glyph| !glyph.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Valence of a single glyph; unknown glyphs are neutral.
pub fn glyph_valence(glyph: &str) -> f64 {
    let glyph = glyph.trim();
    EMOJI_VALENCE
        .iter()
        .find(|(g, _)| *g == glyph)
        .map(|(_, v)| *v)
        .unwrap_or(0.0)
}

/// Mean valence of `glyphs`, in `[-1.0, 1.0]`.
///
/// Blank entries are dropped before averaging; unknown glyphs still count
/// (as 0).  An empty selection is exactly `0.0`.
pub fn emoji_valence<S: AsRef<str>>(glyphs: &[S]) -> f64 {
    let values: Vec<f64> = glyphs
        .iter()
        .filter_map(|g| {
            let g: &str = g.as_ref();
            (!g.trim().is_empty()).then(|| glyph_valence(g))
        })
        .collect();

    if values.is_empty() {
        return 0.0;
    }
    (values.iter().sum::<f64>() / values.len() as f64).clamp(-1.0, 1.0)
}
