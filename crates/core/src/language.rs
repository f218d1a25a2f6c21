//! Picks the register a canned reply is written in.

use serde::{Deserialize, Serialize};

/// The language register of a reply.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Register {
    /// Plain English.
    #[default]
    English,
    /// Romanized Tamil mixed with English.
    Tanglish,
}

const TAMIL_BLOCK: std::ops::RangeInclusive<char> = '\u{0B80}'..='\u{0BFF}';

// Matched as whole words, so "enna" does not fire on "antenna".
const TANGLISH_WORDS: &[&str] = &[
    "enaku", "enakku", "ennaku", "irukku", "iruku", "irukkuthu", "romba",
    "konjam", "enna", "epdi", "eppadi", "sollunga", "pannunga", "panna",
    "vali", "illa", "illai", "naan", "thalai", "vayiru", "kaichal",
    "saapadu", "thookam", "aagum", "aagudhu", "ippo", "nalla",
];

/// Splits already lowercased text into words.
pub(crate) fn words(lowered: &str) -> impl Iterator<Item = &str> {
    lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
}

/// Returns `true` if `c` is in the Tamil script block.
#[inline]
pub(crate) fn is_tamil(c: char) -> bool {
    TAMIL_BLOCK.contains(&c)
}

/// Detects the register of `text`.
///
/// Any Tamil-script character, or any common Romanized Tamil word,
/// selects [`Register::Tanglish`].
pub fn detect_register(text: &str) -> Register {
    if text.chars().any(is_tamil) {
        return Register::Tanglish;
    }
    let lowered = text.to_lowercase();
    let has_tanglish_word =
        words(&lowered).any(|word| TANGLISH_WORDS.contains(&word));
    if has_tanglish_word {
        Register::Tanglish
    } else {
        Register::English
    }
}
