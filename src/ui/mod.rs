// ── UI state helpers ──────────────────────────────────────────────────────────
//
// Pure Rust mirrors of window geometry.  No Win32 calls here; all control
// messages are sent from `platform::win32::window`.

pub(crate) mod layout;
