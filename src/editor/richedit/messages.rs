// ── RichEdit / common-control message constants ───────────────────────────────
//
// Source of truth: Richedit.h, CommCtrl.h, WinUser.h.
// Only the subset the pad uses is listed here.  Declared locally (rather than
// pulled from the windows crate) so the raw structs below can stay
// `#[repr(C)]` mirrors with plain integer fields.

const WM_USER: u32 = 0x0400;

// ── Window / clipboard ────────────────────────────────────────────────────────

/// Enable (WPARAM=1) or suspend (WPARAM=0) repainting of a window.
pub(crate) const WM_SETREDRAW: u32 = 0x000B;
/// Replace all window text.  LPARAM = null-terminated UTF-16 string.
pub(super) const WM_SETTEXT: u32 = 0x000C;
/// Cut selection to clipboard.
pub(super) const WM_CUT: u32 = 0x0300;
/// Copy selection to clipboard.
pub(super) const WM_COPY: u32 = 0x0301;

// ── RichEdit ──────────────────────────────────────────────────────────────────

pub(super) const ES_MULTILINE: u32 = 0x0004;
pub(super) const ES_AUTOVSCROLL: u32 = 0x0040;
pub(super) const ES_NOHIDESEL: u32 = 0x0100;
pub(super) const ES_WANTRETURN: u32 = 0x1000;

/// Select a range.  LPARAM = `*const CharRange`.
pub(super) const EM_EXSETSEL: u32 = WM_USER + 55;
/// Read the selection.  LPARAM = `*mut CharRange`.
pub(super) const EM_EXGETSEL: u32 = WM_USER + 52;
/// Raise the text limit.  LPARAM = max characters.
pub(super) const EM_EXLIMITTEXT: u32 = WM_USER + 53;
/// Set default character formatting (new text + whole document when `SCF_ALL`).
pub(super) const EM_SETCHARFORMAT: u32 = WM_USER + 68;
/// Select which `EN_*` notifications the parent receives.
pub(super) const EM_SETEVENTMASK: u32 = WM_USER + 69;
/// Copy text.  WPARAM = `*const GetTextEx`; LPARAM = buffer.
pub(super) const EM_GETTEXTEX: u32 = WM_USER + 94;
/// Text length.  WPARAM = `*const GetTextLengthEx`.
pub(super) const EM_GETTEXTLENGTHEX: u32 = WM_USER + 95;
/// Clear the undo buffer.
pub(super) const EM_EMPTYUNDOBUFFER: u32 = 0x00CD;
/// Paste a specific clipboard format.  WPARAM = format.
pub(super) const EM_PASTESPECIAL: u32 = WM_USER + 64;
/// Clipboard format: UTF-16 text.
pub(super) const CF_UNICODETEXT: usize = 13;

/// `EM_SETCHARFORMAT` target: current selection.
pub(super) const SCF_SELECTION: usize = 0x0001;
/// `EM_SETCHARFORMAT` target: every character.
pub(super) const SCF_ALL: usize = 0x0004;

/// `CharFormat::dw_mask`: `cr_text_color` is valid.
pub(super) const CFM_COLOR: u32 = 0x4000_0000;

/// `EN_CHANGE` delivery bit for `EM_SETEVENTMASK`.
pub(super) const ENM_CHANGE: usize = 0x0000_0001;

/// `GetTextEx::flags`: paragraph marks as `\r` (matches character positions).
pub(super) const GT_DEFAULT: u32 = 0;
/// `GetTextEx::flags`: paragraph marks as `\r\n` (for saving to disk).
pub(super) const GT_USECRLF: u32 = 1;
/// `GetTextLengthEx::flags`: exact length in characters.
pub(super) const GTL_PRECISE: u32 = 2;
/// `GetTextLengthEx::flags`: count `\r\n` as two characters.
pub(super) const GTL_USECRLF: u32 = 1;
/// `GetTextLengthEx::flags`: return characters, not bytes.
pub(super) const GTL_NUMCHARS: u32 = 8;
/// Code page 1200: UTF-16 LE.
pub(super) const CP_UTF16: u32 = 1200;

// ── Notifications (WM_COMMAND dispatch in window.rs) ─────────────────────────

/// Edit / RichEdit text changed (HIWORD of WPARAM in WM_COMMAND).
pub(crate) const EN_CHANGE: u32 = 0x0300;
/// Button clicked (HIWORD of WPARAM in WM_COMMAND).
pub(crate) const BN_CLICKED: u32 = 0;

// ── Buttons ───────────────────────────────────────────────────────────────────

pub(crate) const BS_PUSHBUTTON: u32 = 0x0000;
pub(crate) const BS_AUTORADIOBUTTON: u32 = 0x0009;
pub(crate) const BM_SETCHECK: u32 = 0x00F1;
pub(crate) const BST_CHECKED: usize = 1;

// ── Static ────────────────────────────────────────────────────────────────────

/// Static style: centre the text vertically.
pub(crate) const SS_CENTERIMAGE: u32 = 0x0200;

// ── Edit / up-down ────────────────────────────────────────────────────────────

/// Edit style: digits only.
pub(crate) const ES_NUMBER: u32 = 0x2000;
pub(crate) const UDS_SETBUDDYINT: u32 = 0x0002;
pub(crate) const UDS_ALIGNRIGHT: u32 = 0x0004;
pub(crate) const UDS_ARROWKEYS: u32 = 0x0020;
pub(crate) const UDS_NOTHOUSANDS: u32 = 0x0080;
pub(crate) const UDM_SETBUDDY: u32 = WM_USER + 105;
pub(crate) const UDM_SETRANGE32: u32 = WM_USER + 111;
pub(crate) const UDM_SETPOS32: u32 = WM_USER + 113;
pub(crate) const UDM_GETPOS32: u32 = WM_USER + 114;

// ── Status bar ────────────────────────────────────────────────────────────────

pub(crate) const SBARS_SIZEGRIP: u32 = 0x0100;
pub(crate) const SB_SETTEXTW: u32 = WM_USER + 11;
pub(crate) const SB_SETPARTS: u32 = WM_USER + 4;

// ── Raw structs ───────────────────────────────────────────────────────────────

/// Mirror of `CHARRANGE`.  `cp_max == -1` means "to the end".
#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
pub(super) struct CharRange {
    pub(super) cp_min: i32,
    pub(super) cp_max: i32,
}

/// Mirror of `CHARFORMATW`.
#[repr(C)]
#[derive(Clone, Copy)]
pub(super) struct CharFormat {
    pub(super) cb_size: u32,
    pub(super) dw_mask: u32,
    pub(super) dw_effects: u32,
    pub(super) y_height: i32,
    pub(super) y_offset: i32,
    pub(super) cr_text_color: u32,
    pub(super) b_char_set: u8,
    pub(super) b_pitch_and_family: u8,
    pub(super) sz_face_name: [u16; 32],
}

impl CharFormat {
    /// A format that only changes the text colour (`COLORREF`).
    pub(super) fn color(colorref: u32) -> Self {
        Self {
            cb_size: std::mem::size_of::<Self>() as u32,
            dw_mask: CFM_COLOR,
            dw_effects: 0, // clears CFE_AUTOCOLOR so cr_text_color applies
            y_height: 0,
            y_offset: 0,
            cr_text_color: colorref,
            b_char_set: 0,
            b_pitch_and_family: 0,
            sz_face_name: [0; 32],
        }
    }
}

/// Mirror of `GETTEXTEX`.
#[repr(C)]
pub(super) struct GetTextEx {
    pub(super) cb: u32,
    pub(super) flags: u32,
    pub(super) codepage: u32,
    pub(super) lp_default_char: *const u8,
    pub(super) lp_used_def_char: *mut i32,
}

/// Mirror of `GETTEXTLENGTHEX`.
#[repr(C)]
pub(super) struct GetTextLengthEx {
    pub(super) flags: u32,
    pub(super) codepage: u32,
}
