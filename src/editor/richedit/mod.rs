// ── RichEdit child-window hosting ─────────────────────────────────────────────
//
// This is one of exactly two modules where `unsafe` is permitted.
// Every `unsafe` block MUST carry a `// SAFETY:` comment.
//
// ── DLL ownership model ───────────────────────────────────────────────────────
//
// `RichEditDll` owns the single `LoadLibraryW` call for `Msftedit.dll`.  It is
// stored in `WindowState` after the view, so it drops after the child window
// (which Windows has already destroyed with its parent by then).

#![allow(unsafe_code)]

pub mod messages;

use std::ops::Range;

use messages::{
    CharFormat, CharRange, GetTextEx, GetTextLengthEx, CF_UNICODETEXT, CP_UTF16, EM_EMPTYUNDOBUFFER,
    EM_EXGETSEL, EM_EXLIMITTEXT, EM_EXSETSEL, EM_GETTEXTEX, EM_GETTEXTLENGTHEX,
    EM_PASTESPECIAL, EM_SETCHARFORMAT, EM_SETEVENTMASK, ENM_CHANGE, ES_AUTOVSCROLL, ES_MULTILINE, ES_NOHIDESEL,
    ES_WANTRETURN, GTL_NUMCHARS, GTL_PRECISE, GTL_USECRLF, GT_DEFAULT, GT_USECRLF, SCF_ALL,
    SCF_SELECTION, WM_COPY, WM_CUT, WM_SETREDRAW, WM_SETTEXT,
};

use windows::{
    core::{w, PCWSTR},
    Win32::{
        Foundation::{HINSTANCE, HMODULE, HWND, LPARAM, TRUE, WPARAM},
        Graphics::Gdi::InvalidateRect,
        System::LibraryLoader::{FreeLibrary, LoadLibraryW},
        UI::WindowsAndMessaging::{
            CreateWindowExW, SendMessageW, HMENU, WINDOW_STYLE, WS_CHILD, WS_EX_CLIENTEDGE,
            WS_TABSTOP, WS_VISIBLE, WS_VSCROLL,
        },
    },
};

use crate::{
    error::Result,
    highlight::{HighlightConfig, NoHighlightChange},
    theme::Rgb,
};

// ── DLL identity ──────────────────────────────────────────────────────────────

/// RichEdit 4.1+; registers the `RICHEDIT50W` class.
const DLL_NAME: PCWSTR = w!("Msftedit.dll");
const CLASS_NAME: PCWSTR = w!("RICHEDIT50W");

/// Text limit for the pad (characters).  The default of 32 767 is too small.
const TEXT_LIMIT: isize = 0x7FFF_FFFE;

// ── RichEditDll ───────────────────────────────────────────────────────────────

/// RAII handle to the loaded `Msftedit.dll`.
pub(crate) struct RichEditDll(HMODULE);

impl RichEditDll {
    /// Load `Msftedit.dll` (a system DLL, resolved from System32).
    pub(crate) fn load() -> Result<Self> {
        // SAFETY: DLL_NAME is a valid null-terminated UTF-16 literal.
        let dll = unsafe { LoadLibraryW(DLL_NAME) }?;
        Ok(Self(dll))
    }
}

impl Drop for RichEditDll {
    fn drop(&mut self) {
        // SAFETY: self.0 came from a successful LoadLibraryW and has not been
        // freed.  The RichEdit child is destroyed with the main window before
        // WindowState (and therefore this handle) is dropped.
        unsafe {
            let _ = FreeLibrary(self.0);
        }
    }
}

// ── Redraw suspension ─────────────────────────────────────────────────────────

/// Suspends painting of the view while alive; repaints on drop.
///
/// Taken before the split is resolved, so it also brackets the
/// `NoHighlightChange` return.
pub(crate) struct RedrawGuard<'a> {
    view: &'a RichEditView,
}

impl Drop for RedrawGuard<'_> {
    fn drop(&mut self) {
        // SAFETY: hwnd is a live child window for the lifetime of the view.
        unsafe {
            let _ = SendMessageW(self.view.hwnd, WM_SETREDRAW, WPARAM(1), LPARAM(0));
            let _ = InvalidateRect(self.view.hwnd, None, TRUE);
        }
    }
}

// ── RichEditView ──────────────────────────────────────────────────────────────

/// The pad's RichEdit child window.
///
/// The child `HWND` is destroyed automatically by Windows when the parent is
/// destroyed; no explicit cleanup is needed.
pub(crate) struct RichEditView {
    hwnd: HWND,
}

impl RichEditView {
    /// Create the RichEdit child inside `hwnd_parent` with control id `id`.
    ///
    /// `_dll` proves that `Msftedit.dll` is loaded and the class registered.
    /// The window starts with zero size; the parent lays it out in WM_SIZE.
    pub(crate) fn create(
        hwnd_parent: HWND,
        hinstance: HINSTANCE,
        id: usize,
        _dll: &RichEditDll,
    ) -> Result<Self> {
        let style = WS_CHILD
            | WS_VISIBLE
            | WS_VSCROLL
            | WS_TABSTOP
            | WINDOW_STYLE(ES_MULTILINE | ES_AUTOVSCROLL | ES_NOHIDESEL | ES_WANTRETURN);

        // SAFETY: CLASS_NAME is registered by Msftedit.dll (_dll proves it is
        // loaded).  hwnd_parent and hinstance are valid handles owned by the
        // caller.
        // For a child window the HMENU parameter carries the control id.
        let hwnd = unsafe {
            CreateWindowExW(
                WS_EX_CLIENTEDGE,
                CLASS_NAME,
                PCWSTR::null(),
                style,
                0, 0, 0, 0,
                hwnd_parent,
                HMENU(id as *mut core::ffi::c_void),
                hinstance,
                None,
            )
        }?;

        // SAFETY: hwnd is a valid RichEdit window; both messages take plain
        // integers.
        unsafe {
            let _ = SendMessageW(hwnd, EM_EXLIMITTEXT, WPARAM(0), LPARAM(TEXT_LIMIT));
            let _ = SendMessageW(hwnd, EM_SETEVENTMASK, WPARAM(0), LPARAM(ENM_CHANGE as isize));
        }

        Ok(Self { hwnd })
    }

    /// The RichEdit child window handle.  Valid until the parent is destroyed.
    pub(crate) fn hwnd(&self) -> HWND {
        self.hwnd
    }

    // ── Text ──────────────────────────────────────────────────────────────────

    /// Replace the whole text and reset undo history.
    pub(crate) fn set_text(&self, text: &str) {
        let wide: Vec<u16> = text.encode_utf16().chain(std::iter::once(0)).collect();
        // SAFETY: hwnd valid; wide is null-terminated UTF-16 that outlives the
        // call.
        unsafe {
            let _ = SendMessageW(self.hwnd, WM_SETTEXT, WPARAM(0), LPARAM(wide.as_ptr() as isize));
            let _ = SendMessageW(self.hwnd, EM_EMPTYUNDOBUFFER, WPARAM(0), LPARAM(0));
        }
    }

    /// The text as UTF-16 code units.
    ///
    /// With `crlf = false` paragraph marks come back as a single `\r`, so
    /// indices line up with RichEdit character positions (use this for the
    /// highlighter and counts).  With `crlf = true` they are `\r\n` (use this
    /// for saving).
    pub(crate) fn text_utf16(&self, crlf: bool) -> Vec<u16> {
        let gtl = GetTextLengthEx {
            flags: GTL_PRECISE | GTL_NUMCHARS | if crlf { GTL_USECRLF } else { 0 },
            codepage: CP_UTF16,
        };
        // SAFETY: hwnd valid; gtl is a live GETTEXTLENGTHEX for the call.
        let len = unsafe {
            SendMessageW(
                self.hwnd,
                EM_GETTEXTLENGTHEX,
                WPARAM(&gtl as *const GetTextLengthEx as usize),
                LPARAM(0),
            )
            .0
        }
        .max(0) as usize;

        let mut buf = vec![0u16; len + 1];
        let gte = GetTextEx {
            cb: (buf.len() * 2) as u32,
            flags: if crlf { GT_USECRLF } else { GT_DEFAULT },
            codepage: CP_UTF16,
            lp_default_char: std::ptr::null(),
            lp_used_def_char: std::ptr::null_mut(),
        };
        // SAFETY: buf holds `gte.cb` bytes; RichEdit writes at most that many,
        // including the terminator, and returns the number of units copied.
        let copied = unsafe {
            SendMessageW(
                self.hwnd,
                EM_GETTEXTEX,
                WPARAM(&gte as *const GetTextEx as usize),
                LPARAM(buf.as_mut_ptr() as isize),
            )
            .0
        }
        .max(0) as usize;
        buf.truncate(copied.min(len));
        buf
    }

    /// The text as a `String` with `\r\n` line breaks.
    pub(crate) fn text_for_disk(&self) -> String {
        String::from_utf16_lossy(&self.text_utf16(true))
    }

    // ── Selection ─────────────────────────────────────────────────────────────

    fn selection(&self) -> CharRange {
        let mut range = CharRange::default();
        // SAFETY: hwnd valid; range is a live CHARRANGE RichEdit fills in.
        unsafe {
            let _ = SendMessageW(
                self.hwnd,
                EM_EXGETSEL,
                WPARAM(0),
                LPARAM(&mut range as *mut CharRange as isize),
            );
        }
        range
    }

    fn set_selection(&self, range: CharRange) {
        // SAFETY: hwnd valid; range is a live CHARRANGE for the call.
        unsafe {
            let _ = SendMessageW(
                self.hwnd,
                EM_EXSETSEL,
                WPARAM(0),
                LPARAM(&range as *const CharRange as isize),
            );
        }
    }

    // ── Colouring ─────────────────────────────────────────────────────────────

    /// Stop repainting until the returned guard is dropped.
    pub(crate) fn suspend_redraw(&self) -> RedrawGuard<'_> {
        // SAFETY: hwnd valid; WM_SETREDRAW(FALSE) only sets a flag.
        unsafe {
            let _ = SendMessageW(self.hwnd, WM_SETREDRAW, WPARAM(0), LPARAM(0));
        }
        RedrawGuard { view: self }
    }

    /// Paint every character (and the insertion format) in `color`.
    fn paint_all(&self, color: Rgb) {
        let format = CharFormat::color(color.to_colorref());
        // SAFETY: hwnd valid; format is a live CHARFORMATW with cbSize set.
        unsafe {
            let _ = SendMessageW(
                self.hwnd,
                EM_SETCHARFORMAT,
                WPARAM(SCF_ALL),
                LPARAM(&format as *const CharFormat as isize),
            );
        }
    }

    /// Paint `range` in `color`.  Moves the selection.
    fn paint(&self, range: Range<usize>, color: Rgb) {
        self.set_selection(CharRange {
            cp_min: range.start as i32,
            cp_max: range.end as i32,
        });
        let format = CharFormat::color(color.to_colorref());
        // SAFETY: hwnd valid; format is a live CHARFORMATW with cbSize set.
        unsafe {
            let _ = SendMessageW(
                self.hwnd,
                EM_SETCHARFORMAT,
                WPARAM(SCF_SELECTION),
                LPARAM(&format as *const CharFormat as isize),
            );
        }
    }

    /// Re-apply the limit colours to `text`, which must be the view's current
    /// content as returned by `text_utf16(false)`.
    ///
    /// Painting is suspended for the whole operation and the caret/selection
    /// is restored afterwards.  On `NoHighlightChange` the existing colours
    /// are left as they are.
    pub(crate) fn recolor(
        &self,
        text: &[u16],
        config: &HighlightConfig,
    ) -> std::result::Result<Range<usize>, NoHighlightChange> {
        let _redraw = self.suspend_redraw();
        let post = config.post_range(text)?;

        let saved = self.selection();
        self.paint_all(config.pre);
        if !post.is_empty() {
            self.paint(post.clone(), config.post);
        }
        self.set_selection(saved);
        Ok(post)
    }

    // ── Edit operations ───────────────────────────────────────────────────────

    /// Cut the current selection to the clipboard.
    pub(crate) fn cut(&self) {
        // SAFETY: hwnd valid; WM_CUT is processed natively by RichEdit.
        unsafe { let _ = SendMessageW(self.hwnd, WM_CUT, WPARAM(0), LPARAM(0)); }
    }

    /// Copy the current selection to the clipboard.
    pub(crate) fn copy_to_clipboard(&self) {
        // SAFETY: hwnd valid; WM_COPY is processed natively by RichEdit.
        unsafe { let _ = SendMessageW(self.hwnd, WM_COPY, WPARAM(0), LPARAM(0)); }
    }

    /// Paste clipboard text (without its formatting) at the caret position.
    pub(crate) fn paste(&self) {
        // SAFETY: hwnd valid; EM_PASTESPECIAL with a standard clipboard format
        // and no REPASTESPECIAL struct is documented.
        unsafe {
            let _ = SendMessageW(self.hwnd, EM_PASTESPECIAL, WPARAM(CF_UNICODETEXT), LPARAM(0));
        }
    }

    /// Select all text.
    pub(crate) fn select_all(&self) {
        self.set_selection(CharRange { cp_min: 0, cp_max: -1 });
    }
}
