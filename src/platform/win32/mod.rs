// ── Win32 platform implementation ─────────────────────────────────────────────
//
// One of exactly two modules where `unsafe` code is permitted (the other is
// `editor::richedit`).  Every `unsafe` block MUST carry a `// SAFETY:` comment
// stating which invariant makes the operation sound.

#![allow(unsafe_code)]

pub mod dialogs; // open/save, colour picker, message boxes, shell links
pub mod window; // main window, WndProc, message loop
