//! Text normalization and tokenization shared by every matcher in the crate.
//!
//! Normalization lower-cases the input and keeps only ASCII lowercase letters,
//! ASCII digits, `#` and `@`, so order numbers (`#12345`) and e-mail addresses
//! survive as single tokens while punctuation does not affect matching.

/// Returns `true` for characters that survive normalization unchanged.
fn is_kept(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '#' || c == '@'
}

/// Normalizes raw text for matching.
///
/// Lower-cases, replaces every character that is not `[a-z0-9#@]` or whitespace
/// with a space, collapses whitespace runs to a single space and trims both ends.
/// Never fails; the result may be empty.
///
/// # Example
///
/// ```
/// use textmatch_core::text::normalize;
///
/// assert_eq!(normalize("  Where's order #12345?! "), "where s order #12345");
/// ```
pub fn normalize(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut pending_space = false;

    for c in lowered.chars() {
        if is_kept(c) {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(c);
        } else {
            // Whitespace and stripped characters both act as separators.
            pending_space = true;
        }
    }

    out
}

/// Splits an already normalized string into tokens.
///
/// An empty string yields no tokens.
pub fn tokenize(normalized: &str) -> Vec<&str> {
    if normalized.is_empty() {
        return Vec::new();
    }
    normalized.split(' ').collect()
}

/// Normalizes and tokenizes raw text, returning owned tokens.
pub fn tokens(raw: &str) -> Vec<String> {
    tokenize(&normalize(raw))
        .into_iter()
        .map(str::to_owned)
        .collect()
}
