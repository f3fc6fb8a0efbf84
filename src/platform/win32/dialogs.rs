// ── Common dialogs ─────────────────────────────────────────────────────────────
//
// Thin wrappers around the Win32 common-dialog and message-box APIs.  Picker
// functions return `Some(..)` on user confirmation and `None` on cancel or
// error.
//
// This is inside `platform::win32` so `unsafe` is permitted per crate policy.

#![allow(unsafe_code)]

use std::{fmt::Display, path::PathBuf};

use windows::{
    core::{w, PCWSTR, PWSTR},
    Win32::{
        Foundation::{COLORREF, HWND},
        UI::{
            Controls::Dialogs::{
                ChooseColorW, GetOpenFileNameW, GetSaveFileNameW, CC_FULLOPEN, CC_RGBINIT,
                CHOOSECOLORW, OFN_FILEMUSTEXIST, OFN_HIDEREADONLY, OFN_OVERWRITEPROMPT,
                OFN_PATHMUSTEXIST, OPENFILENAMEW,
            },
            Shell::ShellExecuteW,
            WindowsAndMessaging::{
                MessageBoxW, IDCANCEL, IDYES, MB_ICONERROR, MB_ICONINFORMATION, MB_ICONWARNING,
                MB_OK, MB_YESNOCANCEL, SW_SHOWNORMAL,
            },
        },
    },
};

use crate::{app::APP_NAME, theme::Rgb};

// ── Buffer size ───────────────────────────────────────────────────────────────

/// Maximum path length in `WCHAR`s, including the null terminator.
/// `MAX_PATH` (260) is too short for modern Windows paths; use 32 768 which
/// is the documented maximum for `\\?\` extended paths.
const PATH_BUF_LEN: usize = 32_768;

/// Null-separated filter pairs ending with a double null.
const FILE_FILTER: &str = "Text Files (*.txt)\0*.txt\0All Files (*.*)\0*.*\0\0";

// ── Open dialog ───────────────────────────────────────────────────────────────

/// Show the standard "Open File" dialog.
///
/// Returns the chosen path, or `None` if the user cancelled.
pub(crate) fn show_open_dialog(hwnd_owner: HWND) -> Option<PathBuf> {
    let mut buf = vec![0u16; PATH_BUF_LEN];
    let filter: Vec<u16> = FILE_FILTER.encode_utf16().collect();

    let mut ofn = OPENFILENAMEW {
        lStructSize: std::mem::size_of::<OPENFILENAMEW>() as u32,
        hwndOwner: hwnd_owner,
        lpstrFilter: PCWSTR(filter.as_ptr()),
        lpstrFile: PWSTR(buf.as_mut_ptr()),
        nMaxFile: PATH_BUF_LEN as u32,
        Flags: OFN_FILEMUSTEXIST | OFN_PATHMUSTEXIST | OFN_HIDEREADONLY,
        ..Default::default()
    };

    // SAFETY: `ofn` is fully initialised; `buf` and `filter` outlive this
    // call.  GetOpenFileNameW reads and writes only within the buffers we
    // provided.  Called on the UI thread (required for modal dialogs).
    let ok = unsafe { GetOpenFileNameW(&mut ofn) };

    ok.as_bool().then(|| path_from_buf(&buf))
}

// ── Save dialog ───────────────────────────────────────────────────────────────

/// Show the standard "Save As" dialog, pre-filled with `default_name`.
///
/// A bare name gets a `.txt` extension.  Returns the chosen path, or `None`
/// if cancelled.
pub(crate) fn show_save_dialog(hwnd_owner: HWND, default_name: &str) -> Option<PathBuf> {
    let mut buf: Vec<u16> = default_name
        .encode_utf16()
        .chain(std::iter::repeat(0))
        .take(PATH_BUF_LEN)
        .collect();
    // Always leave room for the terminator.
    buf[PATH_BUF_LEN - 1] = 0;

    let filter: Vec<u16> = FILE_FILTER.encode_utf16().collect();

    let mut ofn = OPENFILENAMEW {
        lStructSize: std::mem::size_of::<OPENFILENAMEW>() as u32,
        hwndOwner: hwnd_owner,
        lpstrFilter: PCWSTR(filter.as_ptr()),
        lpstrFile: PWSTR(buf.as_mut_ptr()),
        nMaxFile: PATH_BUF_LEN as u32,
        lpstrDefExt: w!("txt"),
        Flags: OFN_OVERWRITEPROMPT | OFN_PATHMUSTEXIST,
        ..Default::default()
    };

    // SAFETY: same invariants as show_open_dialog above.
    let ok = unsafe { GetSaveFileNameW(&mut ofn) };

    ok.as_bool().then(|| path_from_buf(&buf))
}

// ── Colour dialog ─────────────────────────────────────────────────────────────

/// The 16 "custom colour" slots the colour dialog remembers between calls.
pub(crate) type CustomColors = [COLORREF; 16];

/// Show the standard "Color" dialog starting at `initial`.
///
/// `custom` is read and updated in place so user-defined swatches survive
/// between calls.
pub(crate) fn choose_color(
    hwnd_owner: HWND,
    initial: Rgb,
    custom: &mut CustomColors,
) -> Option<Rgb> {
    let mut cc = CHOOSECOLORW {
        lStructSize: std::mem::size_of::<CHOOSECOLORW>() as u32,
        hwndOwner: hwnd_owner,
        rgbResult: COLORREF(initial.to_colorref()),
        lpCustColors: custom.as_mut_ptr(),
        Flags: CC_RGBINIT | CC_FULLOPEN,
        ..Default::default()
    };

    // SAFETY: `cc` is fully initialised; `custom` points at 16 COLORREFs
    // that outlive the call, as ChooseColorW requires.
    let ok = unsafe { ChooseColorW(&mut cc) };

    ok.as_bool().then(|| Rgb::from_colorref(cc.rgbResult.0))
}

// ── Message boxes ─────────────────────────────────────────────────────────────

/// Answer to the "save changes?" prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SaveChoice {
    Save,
    Discard,
    Cancel,
}

/// Ask whether to save `name` before it is replaced or closed.
pub(crate) fn ask_save_changes(hwnd_owner: HWND, name: &str) -> SaveChoice {
    let body = format!("Do you want to save changes to {name}?");
    match message_box(hwnd_owner, &body, APP_NAME, MB_YESNOCANCEL | MB_ICONWARNING) {
        r if r == IDYES => SaveChoice::Save,
        r if r == IDCANCEL => SaveChoice::Cancel,
        _ => SaveChoice::Discard,
    }
}

/// Report a failed file operation: `what` plus the underlying error.
pub(crate) fn show_file_error(hwnd_owner: HWND, what: &str, error: &dyn Display) {
    let body = format!("{what}\n\nMessage:\n{error}");
    message_box(hwnd_owner, &body, "File error", MB_OK | MB_ICONERROR);
}

/// Informational box (About).
pub(crate) fn show_info(hwnd_owner: HWND, title: &str, body: &str) {
    message_box(hwnd_owner, body, title, MB_OK | MB_ICONINFORMATION);
}

/// Show a modal error dialog with no owner.
///
/// Used by `main()` when startup fails before or during the message loop.
pub(crate) fn show_fatal_error(message: &str) {
    let title = format!("{APP_NAME} \u{2014} Fatal Error");
    message_box(HWND::default(), message, &title, MB_OK | MB_ICONERROR);
}

fn message_box(
    hwnd_owner: HWND,
    body: &str,
    title: &str,
    style: windows::Win32::UI::WindowsAndMessaging::MESSAGEBOX_STYLE,
) -> windows::Win32::UI::WindowsAndMessaging::MESSAGEBOX_RESULT {
    let body_wide = wide(body);
    let title_wide = wide(title);
    // SAFETY: body_wide and title_wide are valid null-terminated UTF-16
    // strings that remain allocated for the duration of the call.  A null
    // owner is allowed.
    unsafe {
        MessageBoxW(
            hwnd_owner,
            PCWSTR(body_wide.as_ptr()),
            PCWSTR(title_wide.as_ptr()),
            style,
        )
    }
}

// ── Shell ─────────────────────────────────────────────────────────────────────

/// Open `url` in the default browser.  Failure is logged, not shown.
pub(crate) fn open_url(hwnd_owner: HWND, url: &str) {
    let url_wide = wide(url);
    // SAFETY: url_wide is null-terminated UTF-16 that outlives the call; the
    // remaining string parameters are documented as optional (null).
    let result = unsafe {
        ShellExecuteW(
            hwnd_owner,
            w!("open"),
            PCWSTR(url_wide.as_ptr()),
            PCWSTR::null(),
            PCWSTR::null(),
            SW_SHOWNORMAL,
        )
    };
    // Values <= 32 are error codes.
    if result.0 as usize <= 32 {
        log::warn!("could not open {url} (ShellExecuteW returned {})", result.0 as usize);
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Null-terminated UTF-16 copy of `s`.
pub(crate) fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Convert a null-terminated UTF-16 buffer to a `PathBuf`.
fn path_from_buf(buf: &[u16]) -> PathBuf {
    let len = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
    PathBuf::from(String::from_utf16_lossy(&buf[..len]))
}
