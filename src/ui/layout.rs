// ── Main-window layout ────────────────────────────────────────────────────────
//
// One toolbar row (limit spinner, mode radios, colour buttons) above the pad,
// status bar below.  All metrics are defined at 96 DPI and scaled.

/// Reference DPI the metrics below are defined at.
pub(crate) const BASE_DPI: u32 = 96;

const MARGIN: i32 = 6;
const ROW_HEIGHT: i32 = 24;
const GAP: i32 = 8;
const LABEL_WIDTH: i32 = 36;
const EDIT_WIDTH: i32 = 80;
const RADIO_WIDTH: i32 = 92;
const BUTTON_WIDTH: i32 = 96;

/// Width of the first status-bar part (character count).
const STATUS_PART_WIDTH: i32 = 160;

/// Scale a pixel value defined at 96 DPI to `dpi`.
pub(crate) fn scale(px: i32, dpi: u32) -> i32 {
    px * dpi as i32 / BASE_DPI as i32
}

/// A child-window rectangle in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Rect {
    pub(crate) x: i32,
    pub(crate) y: i32,
    pub(crate) width: i32,
    pub(crate) height: i32,
}

/// Positions of every child except the status bar, which sizes itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Layout {
    pub(crate) limit_label: Rect,
    /// The buddy edit; the up-down control attaches to its right edge.
    pub(crate) limit_edit: Rect,
    pub(crate) characters: Rect,
    pub(crate) words: Rect,
    pub(crate) pre_button: Rect,
    pub(crate) post_button: Rect,
    pub(crate) pad: Rect,
}

impl Layout {
    /// Lay out a client area of `width` × `height`, leaving `status_height`
    /// pixels at the bottom.
    pub(crate) fn compute(width: i32, height: i32, status_height: i32, dpi: u32) -> Self {
        let s = |px| scale(px, dpi);
        let row = Rect {
            x: 0,
            y: s(MARGIN),
            width: 0,
            height: s(ROW_HEIGHT),
        };
        let mut x = s(MARGIN);
        let mut next = |w: i32, gap: i32| {
            let r = Rect { x, width: s(w), ..row };
            x += s(w) + s(gap);
            r
        };

        let limit_label = next(LABEL_WIDTH, 0);
        let limit_edit = next(EDIT_WIDTH, GAP);
        let characters = next(RADIO_WIDTH, 0);
        let words = next(RADIO_WIDTH, GAP);
        let pre_button = next(BUTTON_WIDTH, GAP);
        let post_button = next(BUTTON_WIDTH, 0);

        let pad_top = row.y + row.height + s(MARGIN);
        let pad = Rect {
            x: 0,
            y: pad_top,
            width: width.max(0),
            height: (height - pad_top - status_height).max(0),
        };

        Self {
            limit_label,
            limit_edit,
            characters,
            words,
            pre_button,
            post_button,
            pad,
        }
    }
}

/// Right edges of the status-bar parts (`SB_SETPARTS`); `-1` runs to the end.
pub(crate) fn status_parts(dpi: u32) -> [i32; 2] {
    [scale(STATUS_PART_WIDTH, dpi), -1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn scale_identity_at_base() {
        assert_eq!(scale(24, BASE_DPI), 24);
        assert_eq!(scale(24, 144), 36);
        assert_eq!(scale(24, 192), 48);
    }

    #[test]
    fn toolbar_flows_left_to_right() {
        let l = Layout::compute(800, 600, 22, BASE_DPI);
        assert_eq!(l.limit_label, Rect { x: 6, y: 6, width: 36, height: 24 });
        assert_eq!(l.limit_edit.x, 42);
        assert_eq!(l.characters.x, 42 + 80 + 8);
        assert_eq!(l.words.x, l.characters.x + 92);
        assert_eq!(l.pre_button.x, l.words.x + 92 + 8);
        assert_eq!(l.post_button.x, l.pre_button.x + 96 + 8);
        for r in [l.limit_edit, l.characters, l.words, l.pre_button, l.post_button] {
            assert_eq!((r.y, r.height), (6, 24));
        }
    }

    #[test]
    fn pad_fills_between_toolbar_and_status() {
        let l = Layout::compute(800, 600, 22, BASE_DPI);
        assert_eq!(l.pad, Rect { x: 0, y: 36, width: 800, height: 600 - 36 - 22 });
    }

    #[test]
    fn high_dpi_scales_everything() {
        let base = Layout::compute(1600, 1200, 44, BASE_DPI);
        let double = Layout::compute(1600, 1200, 44, 192);
        assert_eq!(double.limit_edit.x, base.limit_edit.x * 2);
        assert_eq!(double.post_button.width, base.post_button.width * 2);
        assert_eq!(double.pad.y, base.pad.y * 2);
    }

    #[test]
    fn tiny_window_never_goes_negative() {
        let l = Layout::compute(10, 10, 22, BASE_DPI);
        assert_eq!(l.pad.height, 0);
        assert_eq!(Layout::compute(-5, 0, 0, BASE_DPI).pad.width, 0);
    }

    #[test]
    fn status_parts_scale() {
        assert_eq!(status_parts(BASE_DPI), [160, -1]);
        assert_eq!(status_parts(192), [320, -1]);
    }
}
