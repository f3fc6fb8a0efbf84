// ── Platform layer ────────────────────────────────────────────────────────────
//
// Everything that talks to the OS lives below here.  No `unsafe` in this file;
// all Win32 FFI is confined to the `win32` sub-module.

pub mod win32;
