// libtelex/src/buffer.rs
//
// The word being composed.
//
// A word is kept as two sequences that move in lockstep:
// - the rendered text (an `InputBuffer` with a byte cursor), plus for every
//   rendered scalar the sequence numbers of the raw keys that produced it
// - the raw keys, in typed order
//
// Every edit updates both in the same call, so deleting a rendered `ấ`
// drops exactly the `a`, `s`, `a` keys behind it and an undo can rebuild the
// literal spelling from the keys alone.
//
// Supported word shape, read from the start of the word up to the cursor:
//
//     [d|đ] nucleus(1..=3 vowels) coda(0..=2 consonants) key
//
// with nucleus + coda at most four scalars. Other onset consonants never
// reach the buffer: the caller passes them straight to the application.
// Anything outside this shape is left literal.

use libviet_core::{Composer, Composition, InputBuffer};
use tracing::trace;

use crate::accents::{self, Tone};
use crate::classifier::{is_quality_key, is_tone_key, is_vowel, placement_class, PlacementClass};
use crate::config::TelexConfig;

/// Number of nucleus positions tracked in `source_slots`.
pub const MAX_SLOTS: usize = 4;

/// What the first typed letters say about the syllable onset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnsetTag {
    #[default]
    Unset,
    /// A `g` went to the application; an `i` now would be a glide
    G,
    /// A `q` went to the application; a `u` now would be a glide
    Q,
    D,
    DStroke,
    Gi,
    Qu,
}

impl OnsetTag {
    pub fn as_str(self) -> &'static str {
        match self {
            OnsetTag::Unset => "",
            OnsetTag::G => "g",
            OnsetTag::Q => "q",
            OnsetTag::D => "d",
            OnsetTag::DStroke => "đ",
            OnsetTag::Gi => "gi",
            OnsetTag::Qu => "qu",
        }
    }

    /// `gi`/`qu`: the first vowel in the buffer belongs to the onset.
    pub fn is_glide(self) -> bool {
        matches!(self, OnsetTag::Gi | OnsetTag::Qu)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RawKey {
    seq: u32,
    ch: char,
}

/// A rule's replacement for the text before the cursor.
///
/// The key glyph is dropped and its raw key is credited to `absorbed_by`.
struct Rewrite {
    head: Vec<char>,
    absorbed_by: usize,
}

/// Telex composition state for one word.
#[derive(Debug, Clone)]
pub struct CompositionBuffer {
    text: InputBuffer,
    /// Raw key sequence numbers behind each scalar of `text`
    origins: Vec<Vec<u32>>,
    raw: Vec<RawKey>,
    next_seq: u32,
    onset: OnsetTag,
    catalyst: Option<char>,
    source_slots: [Option<char>; MAX_SLOTS],
    double_d: bool,
    undo_on_repeat: bool,
}

impl Default for CompositionBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl CompositionBuffer {
    pub fn new() -> Self {
        Self::with_config(&TelexConfig::default())
    }

    pub fn with_config(config: &TelexConfig) -> Self {
        Self {
            text: InputBuffer::new(),
            origins: Vec::new(),
            raw: Vec::new(),
            next_seq: 0,
            onset: OnsetTag::Unset,
            catalyst: None,
            source_slots: [None; MAX_SLOTS],
            double_d: config.double_d,
            undo_on_repeat: config.undo_on_repeat,
        }
    }

    pub fn text(&self) -> &str {
        self.text.text()
    }

    /// Cursor as a byte offset into `text()`.
    pub fn cursor(&self) -> usize {
        self.text.cursor()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Keys behind the current text, in typed order.
    pub fn raw(&self) -> String {
        self.raw.iter().map(|k| k.ch).collect()
    }

    pub fn onset(&self) -> OnsetTag {
        self.onset
    }

    /// Mark key that a repeated press would undo.
    pub fn catalyst(&self) -> Option<char> {
        self.catalyst
    }

    /// For each nucleus vowel, the key that first produced it.
    pub fn source_slots(&self) -> [Option<char>; MAX_SLOTS] {
        self.source_slots
    }

    /// Whether `ch` may not start a word.
    ///
    /// Only vowels and `d` open a word; other leading letters belong to the
    /// application.
    pub fn should_not_append(&self, ch: char) -> bool {
        self.text.is_empty() && !is_vowel(ch) && !matches!(ch, 'd' | 'D')
    }

    /// Track the onset from keys typed while the buffer is empty.
    pub fn classify_onset(&mut self, ch: char) {
        if !self.text.is_empty() {
            return;
        }
        self.onset = match (self.onset, ch.to_ascii_lowercase()) {
            (OnsetTag::G, 'i') => OnsetTag::Gi,
            (OnsetTag::Q, 'u') => OnsetTag::Qu,
            (_, 'g') => OnsetTag::G,
            (_, 'q') => OnsetTag::Q,
            (_, 'd') => OnsetTag::D,
            _ => OnsetTag::Unset,
        };
    }

    /// Insert a key at the cursor and run the composition rules on it.
    pub fn append(&mut self, ch: char) -> Composition {
        self.classify_onset(ch);

        let seq = self.next_seq;
        self.next_seq += 1;
        self.raw.push(RawKey { seq, ch });
        let at = self.text.char_cursor();
        self.text.insert_char(ch);
        self.origins.insert(at, vec![seq]);

        let outcome = self.recompose();
        trace!(key = %ch, ?outcome, text = self.text(), raw = %self.raw(), "append");
        outcome
    }

    /// Remove `n` scalars before the cursor together with their raw keys.
    pub fn delete_backward(&mut self, n: usize) {
        for _ in 0..n {
            let at = self.text.char_cursor();
            if at == 0 {
                break;
            }
            self.text.delete_before();
            let removed = self.origins.remove(at - 1);
            self.forget(&removed);
        }
        self.catalyst = None;
        self.refresh();
    }

    /// Remove `n` scalars after the cursor together with their raw keys.
    pub fn delete_forward(&mut self, n: usize) {
        for _ in 0..n {
            let at = self.text.char_cursor();
            if at >= self.origins.len() {
                break;
            }
            self.text.delete_after();
            let removed = self.origins.remove(at);
            self.forget(&removed);
        }
        self.catalyst = None;
        self.refresh();
    }

    pub fn move_left(&mut self) {
        self.text.move_left();
        self.catalyst = None;
    }

    pub fn move_right(&mut self) {
        self.text.move_right();
        self.catalyst = None;
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.origins.clear();
        self.raw.clear();
        self.next_seq = 0;
        self.onset = OnsetTag::Unset;
        self.catalyst = None;
        self.source_slots = [None; MAX_SLOTS];
    }

    /// Take the composed word and start a new one.
    pub fn commit(&mut self) -> String {
        let word = self.text.text().to_string();
        self.clear();
        word
    }

    fn recompose(&mut self) -> Composition {
        let head: Vec<char> = self.text.text()[..self.text.cursor()].chars().collect();
        let Some(&key) = head.last() else {
            return Composition::Literal;
        };

        if self.undo_on_repeat && self.catalyst == Some(key) && is_tone_key(key) {
            return self.undo(head.len());
        }

        if let Some(rewrite) = self.double_d(&head).or_else(|| self.mark(&head)) {
            self.apply(head.len(), rewrite);
            self.catalyst = Some(key);
            self.refresh();
            return Composition::Transformed;
        }

        if self.undo_on_repeat && self.catalyst == Some(key) {
            return self.undo(head.len());
        }

        if is_vowel(key) {
            self.catalyst = None;
        }
        self.refresh();
        Composition::Literal
    }

    /// `d … d` → `đ …`
    fn double_d(&self, head: &[char]) -> Option<Rewrite> {
        if !self.double_d || head.len() < 2 {
            return None;
        }
        let stroke = match (head[0], head[head.len() - 1]) {
            ('d', 'd' | 'D') => 'đ',
            ('D', 'd' | 'D') => 'Đ',
            _ => return None,
        };
        let mut out = head[..head.len() - 1].to_vec();
        out[0] = stroke;
        Some(Rewrite {
            head: out,
            absorbed_by: 0,
        })
    }

    /// Tone and quality marks on the nucleus.
    fn mark(&self, head: &[char]) -> Option<Rewrite> {
        if head.len() < 2 {
            return None;
        }
        let key = head[head.len() - 1];
        let tone = Tone::from_key(key);
        if tone.is_none() && !is_quality_key(key) {
            return None;
        }

        let glide = self.glide_len(head);
        let start = if glide > 0 {
            glide
        } else {
            usize::from(!is_vowel(head[0]))
        };
        let body = &head[start..head.len() - 1];
        let nucleus = body.iter().take_while(|&&c| is_vowel(c)).count();
        let coda = &body[nucleus..];
        if nucleus == 0
            || nucleus > 3
            || coda.len() > 2
            || body.len() > MAX_SLOTS
            || coda.iter().any(|&c| is_vowel(c))
        {
            return None;
        }
        let vowels = &body[..nucleus];
        let has_coda = !coda.is_empty();

        let mut out = head[..head.len() - 1].to_vec();
        let target = match tone {
            Some(tone) => {
                let target = tone_target(vowels, has_coda);
                if glide > 0 {
                    out[0] = accents::strip_tone(head[0]);
                }
                for (i, &v) in vowels.iter().enumerate() {
                    out[start + i] = if i == target {
                        accents::apply_tone(v, tone)?
                    } else {
                        accents::strip_tone(v)
                    };
                }
                target
            }
            None => {
                let (target, marked) = quality_targets(nucleus, has_coda)
                    .iter()
                    .find_map(|&i| accents::apply_quality(vowels[i], key).map(|m| (i, m)))
                    .filter(|&(i, m)| i < 2 || completes_type2(vowels, i, m))?;
                out[start + target] = marked;
                target
            }
        };

        // Same tone again on the same vowel
        if out[..] == head[..head.len() - 1] {
            return None;
        }

        Some(Rewrite {
            head: out,
            absorbed_by: start + target,
        })
    }

    /// Length of a `gi`/`qu` glide vowel at the start of `head`.
    ///
    /// The glide belongs to the onset, so it only counts when another vowel
    /// follows it; a lone `gi` keeps `i` as its nucleus.
    fn glide_len(&self, head: &[char]) -> usize {
        if !self.onset.is_glide() || head.len() < 3 || !is_vowel(head[1]) {
            return 0;
        }
        match (self.onset, accents::strip_tone(head[0]).to_ascii_lowercase()) {
            (OnsetTag::Gi, 'i') | (OnsetTag::Qu, 'u') => 1,
            _ => 0,
        }
    }

    fn apply(&mut self, head_len: usize, rewrite: Rewrite) {
        let key_origin = self.origins.remove(head_len - 1);
        self.origins[rewrite.absorbed_by].extend(key_origin);
        let head: String = rewrite.head.iter().collect();
        self.text.replace_chars(0..head_len, &head);
    }

    /// Put the keys behind the head back in literal form, dropping the key
    /// that was just repeated.
    fn undo(&mut self, head_len: usize) -> Composition {
        let repeated = self.origins[head_len - 1].clone();
        let mut seqs: Vec<u32> = self.origins[..head_len]
            .iter()
            .flatten()
            .copied()
            .filter(|seq| !repeated.contains(seq))
            .collect();
        seqs.sort_unstable();

        let literal: String = seqs.iter().filter_map(|&seq| self.raw_char(seq)).collect();
        self.forget(&repeated);
        self.text.replace_chars(0..head_len, &literal);
        self.origins.splice(0..head_len, seqs.into_iter().map(|seq| vec![seq]));
        self.catalyst = None;
        self.refresh();
        Composition::Undone
    }

    fn raw_char(&self, seq: u32) -> Option<char> {
        self.raw
            .binary_search_by_key(&seq, |k| k.seq)
            .ok()
            .map(|i| self.raw[i].ch)
    }

    fn forget(&mut self, seqs: &[u32]) {
        self.raw.retain(|k| !seqs.contains(&k.seq));
    }

    /// Re-derive the onset and nucleus slots after an edit.
    fn refresh(&mut self) {
        self.onset = match self.text.text().chars().next() {
            None => OnsetTag::Unset,
            Some('d' | 'D') => OnsetTag::D,
            Some('đ' | 'Đ') => OnsetTag::DStroke,
            Some(_) => match self.onset {
                OnsetTag::D | OnsetTag::DStroke => OnsetTag::Unset,
                other => other,
            },
        };

        let mut slots = [None; MAX_SLOTS];
        let mut glyphs = self.text.text().chars().zip(&self.origins).peekable();
        if glyphs.peek().is_some_and(|&(c, _)| !is_vowel(c)) {
            glyphs.next();
        }
        for (slot, (_, origin)) in slots
            .iter_mut()
            .zip(glyphs.take_while(|&(c, _)| is_vowel(c)))
        {
            *slot = origin.first().and_then(|&seq| self.raw_char(seq));
        }
        self.source_slots = slots;
    }
}

fn tone_target(vowels: &[char], has_coda: bool) -> usize {
    match vowels.len() {
        1 => 0,
        2 => usize::from(has_coda || placement_class(vowels) != PlacementClass::Plain),
        _ => {
            if placement_class(vowels) == PlacementClass::Type2 {
                2
            } else {
                1
            }
        }
    }
}

/// The last vowel of a triphthong only takes a mark that makes it `…yê`/`…ê`.
fn completes_type2(vowels: &[char], at: usize, marked: char) -> bool {
    let mut cluster = vowels.to_vec();
    cluster[at] = marked;
    placement_class(&cluster) == PlacementClass::Type2
}

/// Nucleus positions tried, in order, for a quality key.
fn quality_targets(nucleus: usize, has_coda: bool) -> &'static [usize] {
    match (nucleus, has_coda) {
        (1, _) => &[0],
        (2, _) => &[1, 0],
        (3, false) => &[1, 2],
        // TODO: decide how a quality key reaches a triphthong with a coda
        // (`uoin` + `w`); left literal until then.
        _ => &[],
    }
}

impl Composer for CompositionBuffer {
    fn feed(&mut self, ch: char) -> Option<Composition> {
        if self.should_not_append(ch) {
            self.classify_onset(ch);
            return None;
        }
        Some(self.append(ch))
    }

    fn delete_backward(&mut self, n: usize) {
        CompositionBuffer::delete_backward(self, n)
    }

    fn delete_forward(&mut self, n: usize) {
        CompositionBuffer::delete_forward(self, n)
    }

    fn move_left(&mut self) {
        CompositionBuffer::move_left(self)
    }

    fn move_right(&mut self) {
        CompositionBuffer::move_right(self)
    }

    fn clear(&mut self) {
        CompositionBuffer::clear(self)
    }

    fn text(&self) -> &str {
        CompositionBuffer::text(self)
    }

    fn cursor(&self) -> usize {
        CompositionBuffer::cursor(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(keys: &str) -> CompositionBuffer {
        let mut buf = CompositionBuffer::new();
        for ch in keys.chars() {
            buf.feed(ch);
        }
        buf
    }

    #[test]
    fn test_tone_and_undo_by_repeat() {
        let buf = typed("as");
        assert_eq!(buf.text(), "á");
        assert_eq!(buf.raw(), "as");
        assert_eq!(buf.catalyst(), Some('s'));

        let mut buf = typed("as");
        assert_eq!(buf.append('s'), Composition::Undone);
        assert_eq!(buf.text(), "as");
        assert_eq!(buf.raw(), "as");
        assert_eq!(buf.catalyst(), None);
    }

    #[test]
    fn test_tone_replaces_tone() {
        assert_eq!(typed("asf").text(), "à");
        assert_eq!(typed("ajx").text(), "ã");
    }

    #[test]
    fn test_quality_then_tone() {
        assert_eq!(typed("ows").text(), "ớ");
        assert_eq!(typed("aar").text(), "ẩ");
        assert_eq!(typed("uw").text(), "ư");
        assert_eq!(typed("aw").text(), "ă");
    }

    #[test]
    fn test_quality_after_tone_keeps_tone() {
        let buf = typed("asa");
        assert_eq!(buf.text(), "ấ");
        assert_eq!(buf.raw(), "asa");
    }

    #[test]
    fn test_same_tone_again_is_literal() {
        let mut buf = typed("asa");
        assert_eq!(buf.append('s'), Composition::Literal);
        assert_eq!(buf.text(), "ấs");
    }

    #[test]
    fn test_repeated_quality_key_undoes() {
        assert_eq!(typed("aaa").text(), "aa");
        assert_eq!(typed("aww").text(), "aw");
        assert_eq!(typed("ooo").text(), "oo");
    }

    #[test]
    fn test_double_d() {
        let buf = typed("dd");
        assert_eq!(buf.text(), "đ");
        assert_eq!(buf.onset(), OnsetTag::DStroke);
        assert_eq!(buf.raw(), "dd");

        assert_eq!(typed("dda").text(), "đa");
        assert_eq!(typed("Dd").text(), "Đ");
        assert_eq!(typed("DDi").text(), "Đi");
        assert_eq!(typed("did").text(), "đi");
    }

    #[test]
    fn test_triple_d_restores_literal() {
        let buf = typed("ddd");
        assert_eq!(buf.text(), "dd");
        assert_eq!(buf.onset(), OnsetTag::D);
    }

    #[test]
    fn test_double_d_can_be_disabled() {
        let config = TelexConfig {
            double_d: false,
            ..TelexConfig::default()
        };
        let mut buf = CompositionBuffer::with_config(&config);
        buf.feed('d');
        assert_eq!(buf.feed('d'), Some(Composition::Literal));
        assert_eq!(buf.text(), "dd");
    }

    #[test]
    fn test_undo_can_be_disabled() {
        let config = TelexConfig {
            undo_on_repeat: false,
            ..TelexConfig::default()
        };
        let mut buf = CompositionBuffer::with_config(&config);
        for ch in "ass".chars() {
            buf.feed(ch);
        }
        assert_eq!(buf.text(), "ás");
    }

    #[test]
    fn test_leading_consonants_pass_through() {
        let mut buf = CompositionBuffer::new();
        assert_eq!(buf.feed('t'), None);
        assert!(buf.is_empty());
        assert_eq!(buf.feed('i'), Some(Composition::Literal));
        assert_eq!(buf.feed('e'), Some(Composition::Literal));
        assert_eq!(buf.feed('e'), Some(Composition::Transformed));
        assert_eq!(buf.feed('s'), Some(Composition::Transformed));
        assert_eq!(buf.text(), "iế");
    }

    #[test]
    fn test_should_not_append() {
        let mut buf = CompositionBuffer::new();
        assert!(buf.should_not_append('b'));
        assert!(buf.should_not_append('g'));
        assert!(!buf.should_not_append('d'));
        assert!(!buf.should_not_append('D'));
        assert!(!buf.should_not_append('ơ'));
        buf.append('a');
        assert!(!buf.should_not_append('b'));
    }

    #[test]
    fn test_two_vowel_placement() {
        // open syllable, no class: first vowel
        assert_eq!(typed("muas").text(), "úa");
        assert_eq!(typed("ais").text(), "ái");
        // coda moves the mark to the second vowel
        assert_eq!(typed("hoans").text(), "oán");
        // Type1 cluster
        assert_eq!(typed("yeeus").text(), "yếu");
        assert_eq!(typed("uoongs").text(), "uống");
    }

    #[test]
    fn test_glide_onsets() {
        let buf = typed("gias");
        assert_eq!(buf.text(), "iá");
        assert_eq!(buf.onset(), OnsetTag::Gi);

        let buf = typed("quas");
        assert_eq!(buf.text(), "uá");
        assert_eq!(buf.onset(), OnsetTag::Qu);

        // `g` followed by something other than `i` is not a glide onset
        let buf = typed("gaif");
        assert_eq!(buf.text(), "ài");
        assert_eq!(buf.onset(), OnsetTag::Unset);
    }

    #[test]
    fn test_three_vowel_placement() {
        assert_eq!(typed("oais").text(), "oái");
        assert_eq!(typed("nguwowif").text(), "ười");
        assert_eq!(typed("uyeens").text(), "uyến");
    }

    #[test]
    fn test_glide_is_outside_the_nucleus() {
        let buf = typed("giuwowngf");
        assert_eq!(buf.text(), "iường");
        assert_eq!(buf.raw(), "iuwowngf");
        assert_eq!(typed("gieengs").text(), "iếng");
        assert_eq!(typed("quyeenf").text(), "uyền");
        assert_eq!(typed("quoocs").text(), "uốc");
        assert_eq!(typed("giuwax").text(), "iữa");
        // Without a following vowel the glide is the nucleus
        assert_eq!(typed("ginf").text(), "ìn");
        // A tone typed on the glide moves to the real nucleus
        assert_eq!(typed("gisaf").text(), "ià");
    }

    #[test]
    fn test_repeated_quality_key_on_triphthong() {
        // The horn never stacks onto the trailing `u`
        let buf = typed("uouww");
        assert_eq!(buf.text(), "uouw");
        assert_eq!(buf.catalyst(), None);
        assert_eq!(typed("ruowuj").text(), "uợu");
        assert_eq!(typed("ruwowuj").text(), "ượu");
        // `…yê` still takes the circumflex on its last vowel
        assert_eq!(typed("uyee").text(), "uyê");
    }

    #[test]
    fn test_horn_spreads_across_uo() {
        assert_eq!(typed("uow").text(), "uơ");
        assert_eq!(typed("uoww").text(), "ươ");
    }

    #[test]
    fn test_unmodelled_shapes_stay_literal() {
        let buf = typed("uoinw");
        assert_eq!(buf.text(), "uoinw");
        assert_eq!(typed("anhs").text(), "ánh");
        // coda longer than two
        assert_eq!(typed("anhts").text(), "anhts");
    }

    #[test]
    fn test_cursor_after_transform() {
        let buf = typed("as");
        assert_eq!(buf.cursor(), "á".len());
        let buf = typed("ddaaj");
        assert_eq!(buf.text(), "đậ");
        assert_eq!(buf.cursor(), "đậ".len());
    }

    #[test]
    fn test_mid_word_insertion_keeps_tail() {
        let mut buf = typed("an");
        buf.move_left();
        assert_eq!(buf.append('s'), Composition::Transformed);
        assert_eq!(buf.text(), "án");
        assert_eq!(buf.cursor(), "á".len());
        assert_eq!(buf.raw(), "ans");
    }

    #[test]
    fn test_delete_backward_drops_raw_keys() {
        let mut buf = typed("dda");
        buf.delete_backward(1);
        assert_eq!(buf.text(), "đ");
        assert_eq!(buf.raw(), "dd");
        assert_eq!(buf.onset(), OnsetTag::DStroke);

        buf.delete_backward(5);
        assert!(buf.is_empty());
        assert_eq!(buf.raw(), "");
        assert_eq!(buf.onset(), OnsetTag::Unset);
    }

    #[test]
    fn test_delete_onset_resets_tag() {
        let mut buf = typed("ddaa");
        buf.move_left();
        buf.delete_backward(1);
        assert_eq!(buf.text(), "â");
        assert_eq!(buf.raw(), "aa");
        assert_eq!(buf.onset(), OnsetTag::Unset);
        assert_eq!(buf.cursor(), 0);
    }

    #[test]
    fn test_delete_forward() {
        let mut buf = typed("ows");
        buf.append('i');
        buf.move_left();
        buf.move_left();
        buf.delete_forward(1);
        assert_eq!(buf.text(), "i");
        assert_eq!(buf.raw(), "i");
        assert_eq!(buf.cursor(), 0);
        buf.delete_forward(3);
        assert!(buf.is_empty());
        assert_eq!(buf.raw(), "");
    }

    #[test]
    fn test_delete_clears_catalyst() {
        let mut buf = typed("asn");
        assert_eq!(buf.catalyst(), Some('s'));
        buf.delete_backward(1);
        assert_eq!(buf.catalyst(), None);
        // A new `s` is a fresh tone key, not an undo
        assert_eq!(buf.append('s'), Composition::Literal);
        assert_eq!(buf.text(), "ás");
    }

    #[test]
    fn test_literal_consonant_keeps_catalyst() {
        let mut buf = typed("asn");
        assert_eq!(buf.append('s'), Composition::Undone);
        assert_eq!(buf.text(), "asn");
    }

    #[test]
    fn test_moves_are_clamped() {
        let mut buf = typed("ơi");
        buf.move_right();
        assert_eq!(buf.cursor(), "ơi".len());
        buf.move_left();
        buf.move_left();
        buf.move_left();
        assert_eq!(buf.cursor(), 0);
    }

    #[test]
    fn test_source_slots() {
        let buf = typed("uow");
        assert_eq!(buf.source_slots(), [Some('u'), Some('o'), None, None]);

        let buf = typed("ddoans");
        assert_eq!(buf.source_slots(), [Some('o'), Some('a'), None, None]);

        assert_eq!(typed("").source_slots(), [None; MAX_SLOTS]);
    }

    #[test]
    fn test_uppercase() {
        assert_eq!(typed("AS").text(), "Á");
        assert_eq!(typed("Ow").text(), "Ơ");
        assert_eq!(typed("DDuwowngf").text(), "Đường");
    }

    #[test]
    fn test_commit_resets_state() {
        let mut buf = typed("gias");
        assert_eq!(buf.commit(), "iá");
        assert!(buf.is_empty());
        assert_eq!(buf.onset(), OnsetTag::Unset);
        assert_eq!(buf.raw(), "");
        assert_eq!(buf.commit(), "");

        // Next word starts fresh: no glide onset carried over
        for ch in "ias".chars() {
            buf.feed(ch);
        }
        assert_eq!(buf.text(), "ía");
    }
}
