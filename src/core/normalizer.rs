// src/core/normalizer.rs

/// First letter of the alphabet. Vowel points, cantillation marks and
/// punctuation all sit below it in the Hebrew block; letters sit at or above.
pub const ALEF: char = '\u{05d0}';

/// Removes every character below `ALEF`, leaving the consonantal form.
/// Input with no letters at all strips to "".
pub fn strip(raw: &str) -> String {
    raw.chars().filter(|&c| c >= ALEF).collect()
}
