// ── Limit colours ─────────────────────────────────────────────────────────────
//
// The two user-selectable foreground colours: "pre" for text before the
// limit, "post" for text past it.
//
// Colour conventions:
//   • `Rgb` holds 0xRRGGBB, which is what the settings file stores.
//   • Win32 (`COLORREF`, `CHARFORMATW::crTextColor`, `CHOOSECOLORW`) wants
//     0x00BBGGRR; convert with `to_colorref` / `from_colorref` at the
//     platform boundary only.

use serde::{Deserialize, Serialize};

// ── Colour macro ──────────────────────────────────────────────────────────────

/// Build an `Rgb` from byte components.
macro_rules! rgb {
    ($r:expr, $g:expr, $b:expr) => {
        Rgb((($r as u32) << 16) | (($g as u32) << 8) | ($b as u32))
    };
}

/// A 24-bit colour in 0xRRGGBB form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct Rgb(pub(crate) u32);

/// Default colour for text before the limit.
pub(crate) const DEFAULT_PRE: Rgb = rgb!(0x00, 0x00, 0x00);

/// Default colour for text past the limit.
pub(crate) const DEFAULT_POST: Rgb = rgb!(0xFF, 0x00, 0x00);

impl Rgb {
    pub(crate) fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub(crate) fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub(crate) fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Convert to a Win32 `COLORREF` value (0x00BBGGRR).
    pub(crate) fn to_colorref(self) -> u32 {
        (u32::from(self.blue()) << 16) | (u32::from(self.green()) << 8) | u32::from(self.red())
    }

    /// Convert from a Win32 `COLORREF` value.  The high byte is ignored.
    pub(crate) fn from_colorref(colorref: u32) -> Self {
        rgb!(colorref & 0xFF, (colorref >> 8) & 0xFF, (colorref >> 16) & 0xFF)
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06X}", self.0 & 0x00FF_FFFF)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn components() {
        let c = rgb!(0x12, 0x34, 0x56);
        assert_eq!(c, Rgb(0x12_34_56));
        assert_eq!((c.red(), c.green(), c.blue()), (0x12, 0x34, 0x56));
    }

    #[test]
    fn colorref_swaps_red_and_blue() {
        assert_eq!(DEFAULT_POST.to_colorref(), 0x00_00_00FF);
        assert_eq!(Rgb(0x12_34_56).to_colorref(), 0x56_34_12);
    }

    #[test]
    fn colorref_ignores_high_byte() {
        assert_eq!(Rgb::from_colorref(0xFF_56_34_12), Rgb(0x12_34_56));
    }

    #[test]
    fn colorref_inverse() {
        for c in [DEFAULT_PRE, DEFAULT_POST, Rgb(0xAB_CD_EF), Rgb(0x00_80_00)] {
            assert_eq!(Rgb::from_colorref(c.to_colorref()), c);
        }
    }

    #[test]
    fn display_as_hex() {
        assert_eq!(DEFAULT_POST.to_string(), "#FF0000");
        assert_eq!(Rgb(0x0A0B0C).to_string(), "#0A0B0C");
    }

    #[test]
    fn serialises_as_plain_number() {
        assert_eq!(serde_json::to_string(&Rgb(0xFF0000)).unwrap(), "16711680");
        let back: Rgb = serde_json::from_str("255").unwrap();
        assert_eq!(back, Rgb(0x0000FF));
    }
}
