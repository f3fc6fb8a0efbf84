// ── Word boundary scanner ─────────────────────────────────────────────────────
//
// Pure Rust, no Win32.  Works on UTF-16 code units because that is how the
// RichEdit control indexes characters; every offset produced here can be fed
// straight into `EM_EXSETSEL`.

use std::{char::REPLACEMENT_CHARACTER, sync::LazyLock};

use regex::Regex;

/// Lazy iterator over the word-start offsets of a UTF-16 text.
///
/// Offset `i` is yielded when the character before `i` is whitespace and the
/// character at `i` is a letter, digit, or punctuation mark.  The first word
/// of the text is never yielded: it has no preceding boundary and implicitly
/// starts at 0.
///
/// The iterator is `Clone`, so a scan can be restarted from any point.
#[derive(Debug, Clone)]
pub(crate) struct WordStarts<'a> {
    text: &'a [u16],
    /// Offset of the next unit to decode.
    pos: usize,
    prev_whitespace: bool,
}

/// Scan `text` for word starts.  Nothing is decoded until the iterator is
/// driven.
pub(crate) fn word_starts(text: &[u16]) -> WordStarts<'_> {
    WordStarts {
        text,
        pos: 0,
        prev_whitespace: false,
    }
}

impl Iterator for WordStarts<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.pos < self.text.len() {
            let at = self.pos;
            let (c, len) = decode_at(self.text, at);
            self.pos += len;

            let starts_word = self.prev_whitespace && is_word_char(c);
            self.prev_whitespace = c.is_whitespace();
            if starts_word {
                return Some(at);
            }
        }
        None
    }
}

impl std::iter::FusedIterator for WordStarts<'_> {}

/// Decode the character starting at `pos`, returning it with its length in
/// code units.  Unpaired surrogates decode to U+FFFD with length 1.
fn decode_at(text: &[u16], pos: usize) -> (char, usize) {
    match char::decode_utf16(text[pos..].iter().copied()).next() {
        Some(Ok(c)) => (c, c.len_utf16()),
        Some(Err(_)) | None => (REPLACEMENT_CHARACTER, 1),
    }
}

/// Characters that may open a word: letters (L*), decimal digits (Nd) and
/// punctuation (Pc, Pd, Ps, Pe, Pi, Pf, Po).  Other numbers, letter numbers
/// and symbols are excluded.
static WORD_OPENER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}\p{Nd}\p{P}]").unwrap());

/// Letter, digit, or punctuation: the characters that may open a word.
pub(crate) fn is_word_char(c: char) -> bool {
    let mut buf = [0u8; 4];
    WORD_OPENER.is_match(c.encode_utf8(&mut buf))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn units(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    fn starts(s: &str) -> Vec<usize> {
        word_starts(&units(s)).collect()
    }

    #[test]
    fn three_words() {
        assert_eq!(starts("The quick fox"), vec![4, 10]);
    }

    #[test]
    fn single_word_has_no_boundary() {
        assert_eq!(starts("Hi"), Vec::<usize>::new());
        assert_eq!(starts(""), Vec::<usize>::new());
    }

    #[test]
    fn leading_whitespace_makes_first_word_a_boundary() {
        assert_eq!(starts("  lead"), vec![2]);
    }

    #[test]
    fn whitespace_runs_yield_one_boundary() {
        assert_eq!(starts("a   b\t\tc\r\nd"), vec![4, 7, 10]);
    }

    #[test]
    fn trailing_whitespace_adds_nothing() {
        assert_eq!(starts("one two   "), vec![4]);
    }

    #[test]
    fn punctuation_opens_a_word() {
        assert_eq!(starts("say (hi) \u{201C}there\u{201D}"), vec![4, 9]);
    }

    #[test]
    fn symbols_do_not_open_a_word() {
        assert_eq!(starts("cost $5 + tax"), vec![10]);
    }

    #[test]
    fn digits_open_a_word() {
        assert_eq!(starts("page 42"), vec![5]);
    }

    #[test]
    fn offsets_are_utf16_units() {
        // U+1F600 takes two code units, so "b" starts at 3 (not 2).
        assert_eq!(starts("\u{1F600} b"), vec![3]);
        assert_eq!(starts("a \u{1F600}x b"), vec![6]);
        assert_eq!(starts("\u{00E9}t\u{00E9} \u{00E0}"), vec![4]);
    }

    #[test]
    fn unpaired_surrogate_is_not_a_word() {
        let text = vec![u16::from(b'a'), u16::from(b' '), 0xD800, u16::from(b' '), u16::from(b'z')];
        assert_eq!(word_starts(&text).collect::<Vec<_>>(), vec![4]);
    }

    #[test]
    fn scan_is_restartable_by_clone() {
        let text = units("a b c d");
        let mut it = word_starts(&text);
        assert_eq!(it.next(), Some(2));
        let snapshot = it.clone();
        assert_eq!(it.collect::<Vec<_>>(), vec![4, 6]);
        assert_eq!(snapshot.collect::<Vec<_>>(), vec![4, 6]);
    }

    #[test]
    fn output_is_strictly_increasing_and_in_bounds() {
        let samples = [
            "",
            " ",
            "x",
            "The quick brown fox jumps over the lazy dog.",
            "  spaced   out\ttext\n\nwith (brackets) and \u{00BF}qu\u{00E9}?",
            "\u{3001}\u{3000}\u{3001} \u{1F600} \u{1F600}",
        ];
        for s in samples {
            let text = units(s);
            let list: Vec<usize> = word_starts(&text).collect();
            assert!(list.windows(2).all(|w| w[0] < w[1]), "not increasing for {s:?}");
            assert!(list.iter().all(|&o| o > 0 && o < text.len()), "out of bounds for {s:?}");
        }
    }

    #[test]
    fn punctuation_classification() {
        for c in ['!', ',', '.', '-', '_', '(', '}', '\u{00BF}', '\u{2014}', '\u{3002}'] {
            assert!(is_word_char(c), "{c:?} should open a word");
        }
        for c in ['$', '+', '<', '=', '^', '`', '|', '~', ' ', '\u{00A9}'] {
            assert!(!is_word_char(c), "{c:?} should not open a word");
        }
    }

    #[test]
    fn punctuation_from_every_script_opens_a_word() {
        // Myanmar, Syriac, Ethiopic and Mongolian sentence marks (all Po).
        for c in ['\u{104A}', '\u{0700}', '\u{1363}', '\u{1800}'] {
            assert!(is_word_char(c), "{c:?} should open a word");
            assert_eq!(starts(&format!("a {c}")), vec![2], "for {c:?}");
        }
    }

    #[test]
    fn non_decimal_numbers_do_not_open_a_word() {
        // Superscript two and one half (No), Roman numeral twelve (Nl).
        for c in ['\u{00B2}', '\u{00BD}', '\u{216B}'] {
            assert!(!is_word_char(c), "{c:?} should not open a word");
            assert_eq!(starts(&format!("a {c}")), Vec::<usize>::new(), "for {c:?}");
        }
        assert_eq!(starts("a \u{00B2}"), Vec::<usize>::new());
    }

    #[test]
    fn letters_and_decimal_digits_from_any_script() {
        for c in ['a', 'Z', '\u{00E9}', '\u{0416}', '\u{4E2D}', '7', '\u{0663}'] {
            assert!(is_word_char(c), "{c:?} should open a word");
        }
    }
}
