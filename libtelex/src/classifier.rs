//! Code point classification for Telex composition.
//!
//! Pure lookups: which scalars are Vietnamese vowels, which keys carry tone
//! or quality marks, and how a vowel cluster places its mark.

use crate::accents;

/// Vietnamese vowel in any case, with or without tone and quality marks
/// (12 vowels × 6 tone forms × 2 cases).
pub fn is_vowel(c: char) -> bool {
    accents::decompose(c).is_some()
}

/// `s f x r j`, case-insensitive.
pub fn is_tone_key(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 's' | 'f' | 'x' | 'r' | 'j')
}

/// `a e o w`, case-insensitive.
pub fn is_quality_key(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'o' | 'w')
}

/// Which vowel of a cluster receives a mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementClass {
    /// `iê uâ uô ươ uơ yê`: the mark goes on the second vowel
    Type1,
    /// `ă oă oo uă` and the `uyê` family: the mark goes next to the modifier
    Type2,
    /// No special placement
    Plain,
}

/// Classify a cluster of 1–3 vowels.
///
/// Case and tone are ignored; quality marks are significant.
pub fn placement_class(vowels: &[char]) -> PlacementClass {
    let mut folded = [' '; 3];
    if vowels.is_empty() || vowels.len() > folded.len() {
        return PlacementClass::Plain;
    }
    for (slot, &v) in folded.iter_mut().zip(vowels) {
        *slot = fold(v);
    }

    match &folded[..vowels.len()] {
        ['ă'] => PlacementClass::Type2,
        ['i', 'ê'] | ['u', 'â'] | ['u', 'ô'] | ['ư', 'ơ'] | ['u', 'ơ'] | ['y', 'ê'] => {
            PlacementClass::Type1
        }
        ['o', 'ă'] | ['o', 'o'] | ['u', 'ă'] => PlacementClass::Type2,
        ['ă' | 'o' | 'u', 'ă' | 'o' | 'i' | 'y', 'ê'] => PlacementClass::Type2,
        _ => PlacementClass::Plain,
    }
}

fn fold(c: char) -> char {
    let base = accents::strip_tone(c);
    base.to_lowercase().next().unwrap_or(base)
}
