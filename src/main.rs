// ── Safety policy ────────────────────────────────────────────────────────────
// Unsafe code is forbidden everywhere except:
//   • `platform::win32`   – Win32 / WinAPI FFI
//   • `editor::richedit`  – RichEdit child-window hosting
// Each unsafe block in those modules MUST carry a `// SAFETY:` comment.
#![deny(unsafe_code)]
// Release builds run as a GUI application (no console window).
// Debug builds keep the console so the terminal logger is visible.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
// The shell is Windows-only; elsewhere only the core and its tests build.
#![cfg_attr(not(windows), allow(dead_code))]

mod app;
#[cfg(windows)]
mod editor;
mod error;
mod highlight;
mod logging;
#[cfg(windows)]
mod platform;
mod settings;
mod stats;
mod theme;
mod ui;

#[cfg(windows)]
fn main() {
    if let Err(e) = logging::init(&settings::data_dir()) {
        eprintln!("[limitpad] logging disabled: {e}");
    }
    log::info!("{} {} starting", app::APP_NAME, app::APP_VERSION);

    if let Err(e) = platform::win32::window::run() {
        // Startup failed before or during the message loop.
        log::error!("fatal: {e}");
        platform::win32::dialogs::show_fatal_error(&e.to_string());
        std::process::exit(1);
    }
    log::info!("exiting");
}

#[cfg(not(windows))]
fn main() {
    eprintln!("{} only runs on Windows", app::APP_NAME);
    std::process::exit(1);
}
