// libtelex/src/accents.rs
//
// Accent tables for Vietnamese vowels.
//
// Two forward tables are compiled into the binary with `phf`:
// - tone forms: base vowel → its five toned forms, in Telex key order s f x r j
// - quality marks: plain vowel → (modifier key, marked vowel)
//
// The reverse index (toned vowel → base + tone) is derived from the tone table
// on first use so the two directions can never disagree.

use ahash::AHashMap;
use once_cell::sync::Lazy;
use phf::phf_map;

/// One of the five Vietnamese tone marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    /// sắc, key `s`
    Acute,
    /// huyền, key `f`
    Grave,
    /// ngã, key `x`
    Tilde,
    /// hỏi, key `r`
    Hook,
    /// nặng, key `j`
    Dot,
}

impl Tone {
    pub const ALL: [Tone; 5] = [Tone::Acute, Tone::Grave, Tone::Tilde, Tone::Hook, Tone::Dot];

    /// Tone selected by a Telex key, case-insensitive.
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            's' => Some(Tone::Acute),
            'f' => Some(Tone::Grave),
            'x' => Some(Tone::Tilde),
            'r' => Some(Tone::Hook),
            'j' => Some(Tone::Dot),
            _ => None,
        }
    }

    pub fn key(self) -> char {
        match self {
            Tone::Acute => 's',
            Tone::Grave => 'f',
            Tone::Tilde => 'x',
            Tone::Hook => 'r',
            Tone::Dot => 'j',
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

static TONE_FORMS: phf::Map<char, [char; 5]> = phf_map! {
    'a' => ['á', 'à', 'ã', 'ả', 'ạ'],
    'ă' => ['ắ', 'ằ', 'ẵ', 'ẳ', 'ặ'],
    'â' => ['ấ', 'ầ', 'ẫ', 'ẩ', 'ậ'],
    'e' => ['é', 'è', 'ẽ', 'ẻ', 'ẹ'],
    'ê' => ['ế', 'ề', 'ễ', 'ể', 'ệ'],
    'i' => ['í', 'ì', 'ĩ', 'ỉ', 'ị'],
    'o' => ['ó', 'ò', 'õ', 'ỏ', 'ọ'],
    'ô' => ['ố', 'ồ', 'ỗ', 'ổ', 'ộ'],
    'ơ' => ['ớ', 'ờ', 'ỡ', 'ở', 'ợ'],
    'u' => ['ú', 'ù', 'ũ', 'ủ', 'ụ'],
    'ư' => ['ứ', 'ừ', 'ữ', 'ử', 'ự'],
    'y' => ['ý', 'ỳ', 'ỹ', 'ỷ', 'ỵ'],
    'A' => ['Á', 'À', 'Ã', 'Ả', 'Ạ'],
    'Ă' => ['Ắ', 'Ằ', 'Ẵ', 'Ẳ', 'Ặ'],
    'Â' => ['Ấ', 'Ầ', 'Ẫ', 'Ẩ', 'Ậ'],
    'E' => ['É', 'È', 'Ẽ', 'Ẻ', 'Ẹ'],
    'Ê' => ['Ế', 'Ề', 'Ễ', 'Ể', 'Ệ'],
    'I' => ['Í', 'Ì', 'Ĩ', 'Ỉ', 'Ị'],
    'O' => ['Ó', 'Ò', 'Õ', 'Ỏ', 'Ọ'],
    'Ô' => ['Ố', 'Ồ', 'Ỗ', 'Ổ', 'Ộ'],
    'Ơ' => ['Ớ', 'Ờ', 'Ỡ', 'Ở', 'Ợ'],
    'U' => ['Ú', 'Ù', 'Ũ', 'Ủ', 'Ụ'],
    'Ư' => ['Ứ', 'Ừ', 'Ữ', 'Ử', 'Ự'],
    'Y' => ['Ý', 'Ỳ', 'Ỹ', 'Ỷ', 'Ỵ'],
};

// Only plain vowels carry entries: a vowel that already has a quality mark
// cannot take another one.
static QUALITY_MARKS: phf::Map<char, &'static [(char, char)]> = phf_map! {
    'a' => &[('a', 'â'), ('w', 'ă')],
    'e' => &[('e', 'ê')],
    'o' => &[('o', 'ô'), ('w', 'ơ')],
    'u' => &[('w', 'ư')],
    'A' => &[('a', 'Â'), ('w', 'Ă')],
    'E' => &[('e', 'Ê')],
    'O' => &[('o', 'Ô'), ('w', 'Ơ')],
    'U' => &[('w', 'Ư')],
};

static TONED: Lazy<AHashMap<char, (char, Tone)>> = Lazy::new(|| {
    let mut m = AHashMap::with_capacity(TONE_FORMS.len() * 5);
    for (&base, forms) in TONE_FORMS.entries() {
        for tone in Tone::ALL {
            m.insert(forms[tone.index()], (base, tone));
        }
    }
    m
});

/// Split a vowel into its un-toned base and tone.
///
/// Returns `None` for anything that is not a Vietnamese vowel.
pub fn decompose(c: char) -> Option<(char, Option<Tone>)> {
    if TONE_FORMS.contains_key(&c) {
        Some((c, None))
    } else {
        TONED.get(&c).map(|&(base, tone)| (base, Some(tone)))
    }
}

/// The vowel without its tone mark; non-vowels come back unchanged.
pub fn strip_tone(c: char) -> char {
    decompose(c).map_or(c, |(base, _)| base)
}

pub fn tone_of(c: char) -> Option<Tone> {
    decompose(c).and_then(|(_, tone)| tone)
}

/// Put `tone` on a vowel, replacing any tone it already carries.
pub fn apply_tone(c: char, tone: Tone) -> Option<char> {
    let (base, _) = decompose(c)?;
    TONE_FORMS.get(&base).map(|forms| forms[tone.index()])
}

/// Add the quality mark selected by `key` (`a`, `e`, `o` or `w`) to a vowel.
///
/// The mark goes on the un-toned base and the tone is carried over, so
/// `á` + `a` gives `ấ`. Fails for vowels that already carry a quality mark
/// and for keys that do not mark this vowel.
pub fn apply_quality(c: char, key: char) -> Option<char> {
    let (base, tone) = decompose(c)?;
    let key = key.to_ascii_lowercase();
    let (_, marked) = QUALITY_MARKS
        .get(&base)?
        .iter()
        .find(|(k, _)| *k == key)?;
    match tone {
        Some(tone) => apply_tone(*marked, tone),
        None => Some(*marked),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_keys() {
        assert_eq!(Tone::from_key('s'), Some(Tone::Acute));
        assert_eq!(Tone::from_key('J'), Some(Tone::Dot));
        assert_eq!(Tone::from_key('a'), None);
        for tone in Tone::ALL {
            assert_eq!(Tone::from_key(tone.key()), Some(tone));
        }
    }

    #[test]
    fn test_apply_tone_replaces_existing() {
        assert_eq!(apply_tone('a', Tone::Acute), Some('á'));
        assert_eq!(apply_tone('â', Tone::Acute), Some('ấ'));
        assert_eq!(apply_tone('ấ', Tone::Grave), Some('ầ'));
        assert_eq!(apply_tone('Ư', Tone::Hook), Some('Ử'));
        assert_eq!(apply_tone('b', Tone::Acute), None);
    }

    #[test]
    fn test_quality_marks() {
        assert_eq!(apply_quality('a', 'a'), Some('â'));
        assert_eq!(apply_quality('a', 'w'), Some('ă'));
        assert_eq!(apply_quality('e', 'e'), Some('ê'));
        assert_eq!(apply_quality('o', 'O'), Some('ô'));
        assert_eq!(apply_quality('O', 'w'), Some('Ơ'));
        assert_eq!(apply_quality('u', 'w'), Some('ư'));
        assert_eq!(apply_quality('e', 'w'), None);
        assert_eq!(apply_quality('i', 'w'), None);
    }

    #[test]
    fn test_quality_keeps_tone_and_does_not_stack() {
        assert_eq!(apply_quality('á', 'a'), Some('ấ'));
        assert_eq!(apply_quality('ọ', 'w'), Some('ợ'));
        assert_eq!(apply_quality('â', 'w'), None);
        assert_eq!(apply_quality('ơ', 'o'), None);
    }

    #[test]
    fn test_decompose() {
        assert_eq!(decompose('ễ'), Some(('ê', Some(Tone::Tilde))));
        assert_eq!(decompose('Y'), Some(('Y', None)));
        assert_eq!(decompose('đ'), None);
        assert_eq!(strip_tone('ợ'), 'ơ');
        assert_eq!(strip_tone('n'), 'n');
        assert_eq!(tone_of('ỳ'), Some(Tone::Grave));
        assert_eq!(tone_of('y'), None);
    }
}
