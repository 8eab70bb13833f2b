//! Detection of conversational turns that carry no usable signal

use std::sync::LazyLock;

use regex::Regex;

/// Phrases that mean "I have no preference", matched as whole words.
/// Apostrophes are optional so "dont" and "doesnt" count too.
static VAGUE_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:something good|i don'?t know|idk|maybe|whatever|not sure|dunno|anything|up to you|doesn'?t matter|i guess)\b",
    )
    .expect("vague phrase pattern is valid")
});

/// "any" alone or leading ("any is fine", "any, really")
static LEADING_ANY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[^\w']*any(?:[^\w']|$)").expect("leading any pattern is valid"));

/// Returns true when the input is empty, a single character, or a
/// no-preference answer like "idk" or "whatever".
pub fn is_vague_input(input: &str) -> bool {
    let trimmed = input.trim();
    if trimmed.chars().count() <= 1 {
        return true;
    }

    let normalized = trimmed.replace('\u{2019}', "'");
    VAGUE_PHRASE.is_match(&normalized) || LEADING_ANY.is_match(&normalized)
}
