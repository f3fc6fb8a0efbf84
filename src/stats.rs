// ── Status-bar counts ─────────────────────────────────────────────────────────
//
// Pure Rust; recomputed from the same UTF-16 text the highlighter sees.

use std::sync::LazyLock;

use regex::Regex;

/// A word for counting purposes: a maximal run of non-whitespace.
static WORD_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S+").unwrap());

/// Character and word totals for the status bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct TextStats {
    /// Length in UTF-16 code units: the same unit the limit counts in.
    pub(crate) characters: usize,
    /// Number of maximal runs of non-whitespace characters.
    pub(crate) words: usize,
}

impl TextStats {
    pub(crate) fn of(text: &[u16]) -> Self {
        let decoded = String::from_utf16_lossy(text);
        Self {
            characters: text.len(),
            words: WORD_RUN.find_iter(&decoded).count(),
        }
    }

    /// Status-bar text for the character part.
    pub(crate) fn characters_label(&self) -> String {
        format!("Characters: {}", self.characters)
    }

    /// Status-bar text for the word part.
    pub(crate) fn words_label(&self) -> String {
        format!("Words: {}", self.words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(s: &str) -> TextStats {
        TextStats::of(&s.encode_utf16().collect::<Vec<_>>())
    }

    #[test]
    fn empty() {
        assert_eq!(stats(""), TextStats { characters: 0, words: 0 });
        assert_eq!(stats(" \t\r\n"), TextStats { characters: 4, words: 0 });
    }

    #[test]
    fn counts_runs_not_boundaries() {
        assert_eq!(stats("The quick fox").words, 3);
        assert_eq!(stats("  padded   words  ").words, 2);
        assert_eq!(stats("Hi").words, 1);
    }

    #[test]
    fn symbols_count_as_words() {
        // `\S+` semantics: anything that is not whitespace forms a word.
        assert_eq!(stats("$5 + tax").words, 3);
    }

    #[test]
    fn unicode_whitespace_separates_words() {
        // Ideographic space and no-break space.
        assert_eq!(stats("\u{4E2D}\u{3000}\u{6587} a\u{00A0}b").words, 4);
        // An unpaired surrogate still counts as part of a word.
        let text = [u16::from(b'a'), 0xD800, u16::from(b' '), u16::from(b'b')];
        assert_eq!(TextStats::of(&text).words, 2);
    }

    #[test]
    fn characters_are_utf16_units() {
        assert_eq!(stats("\u{1F600}").characters, 2);
        assert_eq!(stats("\u{00E9}").characters, 1);
    }

    #[test]
    fn labels() {
        let s = stats("one two");
        assert_eq!(s.characters_label(), "Characters: 7");
        assert_eq!(s.words_label(), "Words: 2");
    }
}
