// ── Central error type ────────────────────────────────────────────────────────
//
// All fallible operations in Limitpad return `error::Result<T>`.  No panics
// in production paths; errors surface as user-facing dialogs (see
// `platform::win32::dialogs::show_file_error` and `show_fatal_error`).
//
// The limit highlighter has its own non-fatal signal,
// `highlight::NoHighlightChange`, which never reaches this type.

use thiserror::Error;

/// Every error that Limitpad can produce.
#[derive(Debug, Error)]
pub enum LimitpadError {
    /// A Win32 API call returned a failure code.
    #[error("{function} failed (error {code:#010x})")]
    Win32 {
        /// The name of the failing function, for display purposes.
        function: &'static str,
        /// The raw Win32 error code (`GetLastError()` value) or HRESULT.
        code: u32,
    },

    /// A standard I/O error (file open, read, write, …).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file could not be parsed or serialised.
    #[error("settings file error: {0}")]
    Settings(#[from] serde_json::Error),

    /// A global logger was already installed.
    #[error("logger setup failed: {0}")]
    Logger(#[from] log::SetLoggerError),
}

// Convert a windows-crate error (HRESULT) directly into a LimitpadError so
// that `?` can be used on `windows::core::Result<T>` throughout the platform
// module.
#[cfg(windows)]
impl From<windows::core::Error> for LimitpadError {
    fn from(e: windows::core::Error) -> Self {
        // HRESULT.0 is i32; reinterpret bits as u32 for display purposes.
        // Win32 errors appear as 0x8007xxxx HRESULTs.
        Self::Win32 {
            function: "windows",
            code: e.code().0 as u32,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LimitpadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win32_display_is_hex() {
        let e = LimitpadError::Win32 { function: "CreateWindowExW", code: 5 };
        assert_eq!(e.to_string(), "CreateWindowExW failed (error 0x00000005)");
    }

    #[test]
    fn io_error_keeps_source() {
        use std::error::Error as _;
        let e: LimitpadError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(e.to_string().starts_with("I/O error:"));
        assert!(e.source().is_some());
    }

    #[test]
    fn settings_error_from_bad_json() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let e: LimitpadError = json_err.into();
        assert!(matches!(e, LimitpadError::Settings(_)));
    }
}
