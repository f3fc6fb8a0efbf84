// ── Application lifecycle & top-level state ────────────────────────────────────
//
// A single `App` is created on startup and owned by `WindowState` for the
// lifetime of the main window.  All mutations happen on the UI thread; there
// is no global mutable state.

use std::path::PathBuf;

use crate::{highlight::HighlightConfig, settings::SettingsData};

/// Product name shown in the title bar and dialogs.
pub(crate) const APP_NAME: &str = "Limitpad";

/// Version shown in the About box.
pub(crate) const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ── Encoding ──────────────────────────────────────────────────────────────────

/// The character encoding of the document on disk.
///
/// The pad always holds UTF-16 (RichEdit's native form).  This field records
/// what encoding should be used when writing back to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Encoding {
    /// UTF-8, with or without BOM.
    Utf8,
    /// UTF-16 Little-Endian with BOM.
    Utf16Le,
    /// UTF-16 Big-Endian with BOM.
    Utf16Be,
    /// Single-byte fallback; bytes are read and written as Latin-1.
    Ansi,
}

impl Encoding {
    /// Short display string for logs.
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Utf16Le => "UTF-16 LE",
            Self::Utf16Be => "UTF-16 BE",
            Self::Ansi => "ANSI",
        }
    }
}

// ── DocumentState ─────────────────────────────────────────────────────────────

/// State of the single pad document.
#[derive(Debug)]
pub(crate) struct DocumentState {
    /// Absolute path to the file on disk, or `None` for an untitled buffer.
    pub(crate) path: Option<PathBuf>,
    /// The encoding used to read (and that will be used to write) the file.
    pub(crate) encoding: Encoding,
    /// `true` when the buffer contains changes not yet saved to disk.
    pub(crate) dirty: bool,
}

impl DocumentState {
    /// A fresh, untitled document with sensible defaults.
    fn new_untitled() -> Self {
        Self {
            path: None,
            encoding: Encoding::Utf8,
            dirty: false,
        }
    }

    /// The bare filename component, or `"Untitled"` if no path is set.
    pub(crate) fn display_name(&self) -> String {
        self.path
            .as_deref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled".to_owned())
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Top-level application state.
///
/// Passed by mutable reference through WndProc handlers so that all
/// application logic sees a single, explicit state root rather than a
/// collection of disconnected globals.
pub(crate) struct App {
    /// State of the pad document.
    pub(crate) doc: DocumentState,
    /// Persisted settings; written back on exit.
    pub(crate) settings: SettingsData,
}

impl App {
    /// Create an `App` with an untitled, empty document.
    pub(crate) fn new(settings: SettingsData) -> Self {
        Self {
            doc: DocumentState::new_untitled(),
            settings,
        }
    }

    /// Current highlight configuration.
    pub(crate) fn highlight(&self) -> &HighlightConfig {
        &self.settings.highlight
    }

    /// Mutable access for the limit spinner, mode radios and colour pickers.
    pub(crate) fn highlight_mut(&mut self) -> &mut HighlightConfig {
        &mut self.settings.highlight
    }

    /// Compute the title string for the main window.
    ///
    /// | State | Title |
    /// |---|---|
    /// | No path, clean | `"Limitpad"` |
    /// | Path set, clean | `"filename — Limitpad"` |
    /// | Path set, dirty | `"*filename — Limitpad"` |
    /// | No path, dirty | `"*Untitled — Limitpad"` |
    pub(crate) fn window_title(&self) -> String {
        if self.doc.path.is_none() && !self.doc.dirty {
            return APP_NAME.to_owned();
        }
        let dirty = if self.doc.dirty { "*" } else { "" };
        format!("{dirty}{} \u{2014} {APP_NAME}", self.doc.display_name())
    }

    /// Reset to a clean, untitled document.
    pub(crate) fn new_document(&mut self) {
        self.doc = DocumentState::new_untitled();
    }

    /// Whether to ask about unsaved changes before the text is replaced
    /// (`closing = false`) or the window closes (`closing = true`).
    ///
    /// An untitled pad whose text is remembered across runs is not lost on
    /// close, so it is not prompted for.
    pub(crate) fn needs_save_prompt(&self, closing: bool) -> bool {
        if !self.doc.dirty {
            return false;
        }
        !(closing && self.doc.path.is_none() && self.settings.remember_text)
    }

    // ── Remembered text ───────────────────────────────────────────────────────

    /// Text to load into the pad at startup, if the user asked for it.
    pub(crate) fn remembered_text(&self) -> Option<&str> {
        if !self.settings.remember_text {
            return None;
        }
        self.settings.pad_texts.first().map(String::as_str)
    }

    /// Record the pad text for the next start.  Clears the stored texts when
    /// remembering is switched off.
    pub(crate) fn remember(&mut self, text: &str) {
        self.settings.pad_texts.clear();
        if self.settings.remember_text {
            self.settings.pad_texts.push(text.to_owned());
        }
    }

    // ── File save ─────────────────────────────────────────────────────────────

    /// Write `text` to `path` using the document's current encoding.
    ///
    /// On success, updates `doc.path` (for Save As) and clears `doc.dirty`.
    pub(crate) fn save(&mut self, path: PathBuf, text: &str) -> crate::error::Result<()> {
        let bytes = self.encode_for_disk(text);
        std::fs::write(&path, &bytes)?;
        log::info!(
            "saved {} ({} bytes, {})",
            path.display(),
            bytes.len(),
            self.doc.encoding.as_str()
        );
        self.doc.path = Some(path);
        self.doc.dirty = false;
        Ok(())
    }

    /// Encode `text` to the document's on-disk encoding.
    fn encode_for_disk(&self, text: &str) -> Vec<u8> {
        match self.doc.encoding {
            Encoding::Utf8 => text.as_bytes().to_vec(),
            Encoding::Utf16Le => {
                let mut out = vec![0xFF_u8, 0xFE]; // LE BOM
                for unit in text.encode_utf16() {
                    out.extend_from_slice(&unit.to_le_bytes());
                }
                out
            }
            Encoding::Utf16Be => {
                let mut out = vec![0xFE_u8, 0xFF]; // BE BOM
                for unit in text.encode_utf16() {
                    out.extend_from_slice(&unit.to_be_bytes());
                }
                out
            }
            // Latin-1: characters outside U+0000..=U+00FF cannot be stored.
            Encoding::Ansi => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
                .collect(),
        }
    }

    // ── File open ─────────────────────────────────────────────────────────────

    /// Update document state after a successful file read and return the
    /// decoded text for the pad.
    ///
    /// Encoding detection order:
    /// 1. UTF-16 LE BOM (`FF FE`)
    /// 2. UTF-16 BE BOM (`FE FF`)
    /// 3. UTF-8 BOM (`EF BB BF`)
    /// 4. Heuristic: if the bytes are valid UTF-8, treat as UTF-8
    /// 5. Fallback: ANSI, decoded as Latin-1
    pub(crate) fn open_file(&mut self, path: PathBuf, bytes: &[u8]) -> String {
        let (encoding, text) = Self::detect_and_decode(bytes);
        log::info!(
            "opened {} ({} bytes, {})",
            path.display(),
            bytes.len(),
            encoding.as_str()
        );
        self.doc.encoding = encoding;
        self.doc.dirty = false;
        self.doc.path = Some(path);
        text
    }

    /// Detect the encoding of `bytes` and return the encoding + decoded text.
    fn detect_and_decode(bytes: &[u8]) -> (Encoding, String) {
        // UTF-16 LE BOM: FF FE
        if let Some(payload) = bytes.strip_prefix(&[0xFF, 0xFE]) {
            let units: Vec<u16> = payload
                .chunks_exact(2)
                .map(|c| u16::from_le_bytes([c[0], c[1]]))
                .collect();
            return (Encoding::Utf16Le, String::from_utf16_lossy(&units));
        }

        // UTF-16 BE BOM: FE FF
        if let Some(payload) = bytes.strip_prefix(&[0xFE, 0xFF]) {
            let units: Vec<u16> = payload
                .chunks_exact(2)
                .map(|c| u16::from_be_bytes([c[0], c[1]]))
                .collect();
            return (Encoding::Utf16Be, String::from_utf16_lossy(&units));
        }

        // UTF-8 BOM: EF BB BF
        if let Some(payload) = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
            return (Encoding::Utf8, String::from_utf8_lossy(payload).into_owned());
        }

        // Heuristic: valid UTF-8
        if let Ok(text) = std::str::from_utf8(bytes) {
            return (Encoding::Utf8, text.to_owned());
        }

        // Fallback: Latin-1, one char per byte
        (Encoding::Ansi, bytes.iter().map(|&b| char::from(b)).collect())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(SettingsData::default())
    }

    #[test]
    fn title_clean_untitled() {
        assert_eq!(app().window_title(), "Limitpad");
    }

    #[test]
    fn title_clean_with_path() {
        let mut app = app();
        app.doc.path = Some(PathBuf::from("notes").join("todo.txt"));
        assert_eq!(app.window_title(), "todo.txt \u{2014} Limitpad");
    }

    #[test]
    fn title_dirty_with_path() {
        let mut app = app();
        app.doc.path = Some(PathBuf::from("notes").join("todo.txt"));
        app.doc.dirty = true;
        assert_eq!(app.window_title(), "*todo.txt \u{2014} Limitpad");
    }

    #[test]
    fn title_dirty_untitled() {
        let mut app = app();
        app.doc.dirty = true;
        assert_eq!(app.window_title(), "*Untitled \u{2014} Limitpad");
    }

    #[test]
    fn new_document_resets_state() {
        let mut app = app();
        app.doc.path = Some(PathBuf::from("a.txt"));
        app.doc.encoding = Encoding::Utf16Be;
        app.doc.dirty = true;
        app.new_document();
        assert_eq!(app.doc.path, None);
        assert_eq!(app.doc.encoding, Encoding::Utf8);
        assert!(!app.doc.dirty);
    }

    #[test]
    fn clean_document_never_prompts() {
        let app = app();
        assert!(!app.needs_save_prompt(false));
        assert!(!app.needs_save_prompt(true));
    }

    #[test]
    fn dirty_document_prompts() {
        let mut app = app();
        app.doc.dirty = true;
        assert!(app.needs_save_prompt(false));
        assert!(app.needs_save_prompt(true));
    }

    #[test]
    fn remembered_untitled_text_skips_close_prompt() {
        let mut app = app();
        app.doc.dirty = true;
        app.settings.remember_text = true;
        assert!(!app.needs_save_prompt(true));
        // Replacing the text still loses it.
        assert!(app.needs_save_prompt(false));

        app.doc.path = Some(PathBuf::from("a.txt"));
        assert!(app.needs_save_prompt(true));
    }

    #[test]
    fn encoding_display() {
        assert_eq!(Encoding::Utf8.as_str(), "UTF-8");
        assert_eq!(Encoding::Utf16Le.as_str(), "UTF-16 LE");
        assert_eq!(Encoding::Utf16Be.as_str(), "UTF-16 BE");
        assert_eq!(Encoding::Ansi.as_str(), "ANSI");
    }

    // ── Remembered text ───────────────────────────────────────────────────────

    #[test]
    fn remembered_text_requires_flag() {
        let mut settings = SettingsData::default();
        settings.pad_texts.push("kept".to_owned());
        let mut app = App::new(settings);
        assert_eq!(app.remembered_text(), None);
        app.settings.remember_text = true;
        assert_eq!(app.remembered_text(), Some("kept"));
    }

    #[test]
    fn remember_replaces_previous_text() {
        let mut app = app();
        app.settings.remember_text = true;
        app.remember("first");
        app.remember("second");
        assert_eq!(app.settings.pad_texts, vec!["second".to_owned()]);
    }

    #[test]
    fn remember_off_clears_texts() {
        let mut app = app();
        app.settings.pad_texts.push("stale".to_owned());
        app.remember("ignored");
        assert!(app.settings.pad_texts.is_empty());
    }

    // ── Encoding detection ────────────────────────────────────────────────────

    #[test]
    fn detect_encoding_utf16le() {
        let (enc, text) = App::detect_and_decode(b"\xFF\xFEh\x00i\x00");
        assert_eq!(enc, Encoding::Utf16Le);
        assert_eq!(text, "hi");
    }

    #[test]
    fn detect_encoding_utf16be() {
        let (enc, text) = App::detect_and_decode(b"\xFE\xFF\x00h\x00i");
        assert_eq!(enc, Encoding::Utf16Be);
        assert_eq!(text, "hi");
    }

    #[test]
    fn detect_encoding_utf8_bom() {
        let (enc, text) = App::detect_and_decode(b"\xEF\xBB\xBFhello");
        assert_eq!(enc, Encoding::Utf8);
        assert_eq!(text, "hello");
    }

    #[test]
    fn detect_encoding_utf8_no_bom() {
        let (enc, text) = App::detect_and_decode("caf\u{00E9}".as_bytes());
        assert_eq!(enc, Encoding::Utf8);
        assert_eq!(text, "caf\u{00E9}");
    }

    #[test]
    fn detect_encoding_ansi_fallback() {
        // 0xE9 alone is not valid UTF-8; Latin-1 maps it to é.
        let (enc, text) = App::detect_and_decode(b"caf\xE9");
        assert_eq!(enc, Encoding::Ansi);
        assert_eq!(text, "caf\u{00E9}");
    }

    #[test]
    fn encode_ansi_replaces_unrepresentable() {
        let mut app = app();
        app.doc.encoding = Encoding::Ansi;
        assert_eq!(app.encode_for_disk("caf\u{00E9} \u{2014}"), b"caf\xE9 ?".to_vec());
    }

    #[test]
    fn encode_utf16_writes_bom() {
        let mut app = app();
        app.doc.encoding = Encoding::Utf16Le;
        assert_eq!(app.encode_for_disk("hi"), b"\xFF\xFEh\x00i\x00".to_vec());
        app.doc.encoding = Encoding::Utf16Be;
        assert_eq!(app.encode_for_disk("hi"), b"\xFE\xFF\x00h\x00i".to_vec());
    }

    // ── Disk round trip ───────────────────────────────────────────────────────

    #[test]
    fn save_then_open_keeps_encoding() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("pad.txt");

        let mut writer = app();
        writer.doc.encoding = Encoding::Utf16Le;
        writer.doc.dirty = true;
        writer.save(path.clone(), "line one\r\nline two").expect("save");
        assert!(!writer.doc.dirty);
        assert_eq!(writer.doc.path.as_deref(), Some(path.as_path()));

        let bytes = std::fs::read(&path).expect("read");
        let mut reader = app();
        let text = reader.open_file(path.clone(), &bytes);
        assert_eq!(text, "line one\r\nline two");
        assert_eq!(reader.doc.encoding, Encoding::Utf16Le);
        assert_eq!(reader.window_title(), "pad.txt \u{2014} Limitpad");
    }
}
