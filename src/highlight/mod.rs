// ── Limit highlighter ─────────────────────────────────────────────────────────
//
// Given the pad text and a limit (characters or words), compute where the
// "post" colour starts.  Pure functions only: no Win32, no shared state,
// nothing survives a call.  The window layer owns the RichEdit control and
// applies the returned range (see `editor::richedit::RichEditView::recolor`).
//
// All offsets are UTF-16 code-unit offsets, matching RichEdit's character
// positions.

pub(crate) mod scanner;

use std::ops::Range;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::theme::{Rgb, DEFAULT_POST, DEFAULT_PRE};

pub(crate) use scanner::word_starts;

// ── Mode ──────────────────────────────────────────────────────────────────────

/// How the limit is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum LimitMode {
    /// The limit is a character count.
    #[default]
    Characters,
    /// The limit is a 1-based word index; the post range starts at that word.
    Words,
}

// ── No-change signal ──────────────────────────────────────────────────────────

/// The limit cannot be resolved against this text; leave the colouring as it
/// is.  Recoverable and never shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub(crate) enum NoHighlightChange {
    /// Word mode on an empty text.
    #[error("text is empty")]
    EmptyText,

    /// Word mode with an index that has no word-start offset.
    #[error("word {requested} requested, but only {available} word boundaries exist")]
    OutOfRangeWord { requested: u32, available: usize },
}

// ── Resolver ──────────────────────────────────────────────────────────────────

/// Translate `limit` into the offset where the post range begins.
///
/// * `Characters`: `min(limit, text.len())`.  Never fails.
/// * `Words`: the start of word `limit`, i.e. entry `limit - 1` of
///   [`word_starts`].  Fails for an empty text, `limit == 0`, or a limit past
///   the last detected boundary.
pub(crate) fn resolve_split(
    text: &[u16],
    limit: u32,
    mode: LimitMode,
) -> Result<usize, NoHighlightChange> {
    match mode {
        LimitMode::Characters => Ok((limit as usize).min(text.len())),
        LimitMode::Words => {
            if text.is_empty() {
                return Err(NoHighlightChange::EmptyText);
            }
            let out_of_range = || NoHighlightChange::OutOfRangeWord {
                requested: limit,
                available: word_starts(text).count(),
            };
            let index = (limit as usize).checked_sub(1).ok_or_else(out_of_range)?;
            word_starts(text).nth(index).ok_or_else(out_of_range)
        }
    }
}

// ── Configuration ─────────────────────────────────────────────────────────────

/// Everything the highlighter needs from the UI, passed in explicitly.
///
/// Persisted as part of the settings file; missing fields fall back to
/// [`HighlightConfig::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct HighlightConfig {
    pub(crate) mode: LimitMode,
    pub(crate) limit: u32,
    /// Colour before the limit.
    pub(crate) pre: Rgb,
    /// Colour from the limit to the end of the text.
    pub(crate) post: Rgb,
}

/// Initial limit for a fresh install.
pub(crate) const DEFAULT_LIMIT: u32 = 140;

/// Largest value the limit spinner accepts.
pub(crate) const MAX_LIMIT: u32 = 1_000_000;

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            mode: LimitMode::Characters,
            limit: DEFAULT_LIMIT,
            pre: DEFAULT_PRE,
            post: DEFAULT_POST,
        }
    }
}

impl HighlightConfig {
    /// The range to paint in the post colour: from the resolved split to the
    /// end of the text.
    pub(crate) fn post_range(&self, text: &[u16]) -> Result<Range<usize>, NoHighlightChange> {
        let start = resolve_split(text, self.limit, self.mode)?;
        Ok(start..text.len())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn units(s: &str) -> Vec<u16> {
        s.encode_utf16().collect()
    }

    const SAMPLES: &[&str] = &[
        "",
        "Hi",
        "The quick fox",
        "  two  spaces\tand\ttabs\r\nand lines",
        "caf\u{00E9} \u{1F600} (emoji) \u{2014} dash",
    ];

    // ── Scenarios ─────────────────────────────────────────────────────────────

    #[test]
    fn characters_split_inside_text() {
        let text = units("The quick fox");
        assert_eq!(resolve_split(&text, 4, LimitMode::Characters), Ok(4));
    }

    #[test]
    fn words_split_at_second_boundary() {
        let text = units("The quick fox");
        assert_eq!(word_starts(&text).collect::<Vec<_>>(), vec![4, 10]);
        assert_eq!(resolve_split(&text, 2, LimitMode::Words), Ok(10));
    }

    #[test]
    fn words_past_last_boundary_is_no_change() {
        let text = units("The quick fox");
        assert_eq!(
            resolve_split(&text, 5, LimitMode::Words),
            Err(NoHighlightChange::OutOfRangeWord { requested: 5, available: 2 })
        );
    }

    #[test]
    fn characters_on_empty_text_is_zero() {
        assert_eq!(resolve_split(&[], 10, LimitMode::Characters), Ok(0));
    }

    #[test]
    fn single_word_has_nothing_to_split() {
        let text = units("Hi");
        assert_eq!(
            resolve_split(&text, 1, LimitMode::Words),
            Err(NoHighlightChange::OutOfRangeWord { requested: 1, available: 0 })
        );
    }

    // ── Edge cases ────────────────────────────────────────────────────────────

    #[test]
    fn words_on_empty_text() {
        assert_eq!(resolve_split(&[], 1, LimitMode::Words), Err(NoHighlightChange::EmptyText));
        assert_eq!(resolve_split(&[], 0, LimitMode::Words), Err(NoHighlightChange::EmptyText));
    }

    #[test]
    fn word_zero_is_no_change() {
        let text = units("The quick fox");
        assert_eq!(
            resolve_split(&text, 0, LimitMode::Words),
            Err(NoHighlightChange::OutOfRangeWord { requested: 0, available: 2 })
        );
    }

    #[test]
    fn character_limit_zero_paints_everything() {
        let text = units("abc");
        let config = HighlightConfig { limit: 0, ..HighlightConfig::default() };
        assert_eq!(config.post_range(&text), Ok(0..3));
    }

    #[test]
    fn huge_character_limit_clamps() {
        let text = units("abc");
        assert_eq!(resolve_split(&text, u32::MAX, LimitMode::Characters), Ok(3));
    }

    #[test]
    fn post_range_in_word_mode() {
        let text = units("The quick fox");
        let config = HighlightConfig { mode: LimitMode::Words, limit: 1, ..HighlightConfig::default() };
        let range = config.post_range(&text).unwrap();
        assert_eq!(range, 4..13);
        assert_eq!(String::from_utf16_lossy(&text[range]), "quick fox");
    }

    #[test]
    fn post_range_propagates_no_change() {
        let config = HighlightConfig { mode: LimitMode::Words, limit: 3, ..HighlightConfig::default() };
        assert!(config.post_range(&units("one two")).is_err());
    }

    // ── Properties ────────────────────────────────────────────────────────────

    #[test]
    fn characters_mode_is_a_clamp() {
        for s in SAMPLES {
            let text = units(s);
            for limit in 0..=(text.len() as u32 + 3) {
                let offset = resolve_split(&text, limit, LimitMode::Characters).unwrap();
                assert_eq!(offset, (limit as usize).min(text.len()));
            }
        }
    }

    #[test]
    fn words_mode_inverts_the_scan() {
        for s in SAMPLES {
            let text = units(s);
            let boundaries: Vec<usize> = word_starts(&text).collect();
            for k in 0..=(boundaries.len() as u32 + 2) {
                let got = resolve_split(&text, k, LimitMode::Words);
                if k >= 1 && (k as usize) <= boundaries.len() {
                    assert_eq!(got, Ok(boundaries[k as usize - 1]), "{s:?} word {k}");
                } else {
                    assert!(got.is_err(), "{s:?} word {k} should be no change");
                }
            }
        }
    }

    #[test]
    fn resolver_is_idempotent() {
        for s in SAMPLES {
            let text = units(s);
            for mode in [LimitMode::Characters, LimitMode::Words] {
                for limit in [0, 1, 2, 5, 100] {
                    assert_eq!(
                        resolve_split(&text, limit, mode),
                        resolve_split(&text, limit, mode)
                    );
                }
            }
        }
    }

    #[test]
    fn split_is_always_in_bounds() {
        for s in SAMPLES {
            let text = units(s);
            for mode in [LimitMode::Characters, LimitMode::Words] {
                for limit in [0, 1, 3, 7, 1_000] {
                    if let Ok(offset) = resolve_split(&text, limit, mode) {
                        assert!(offset <= text.len());
                    }
                }
            }
        }
    }

    // ── Serde ─────────────────────────────────────────────────────────────────

    #[test]
    fn mode_serialises_lowercase() {
        assert_eq!(serde_json::to_string(&LimitMode::Words).unwrap(), "\"words\"");
        assert_eq!(
            serde_json::from_str::<LimitMode>("\"characters\"").unwrap(),
            LimitMode::Characters
        );
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: HighlightConfig = serde_json::from_str(r#"{"limit":7}"#).unwrap();
        assert_eq!(config, HighlightConfig { limit: 7, ..HighlightConfig::default() });
    }

    #[test]
    fn no_change_messages() {
        assert_eq!(NoHighlightChange::EmptyText.to_string(), "text is empty");
        assert_eq!(
            NoHighlightChange::OutOfRangeWord { requested: 4, available: 2 }.to_string(),
            "word 4 requested, but only 2 word boundaries exist"
        );
    }
}
