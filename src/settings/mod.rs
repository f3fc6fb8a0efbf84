// ── Settings persistence ──────────────────────────────────────────────────────
//
// Reads and writes `Limitpad-SettingsData.txt` beside the executable.
// No `unsafe`: pure safe Rust + serde_json.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{error::Result, highlight::HighlightConfig};

// ── On-disk types ─────────────────────────────────────────────────────────────

/// Root of the JSON settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct SettingsData {
    pub(crate) version: u32,
    /// Restore the pad text on the next start.
    #[serde(default)]
    pub(crate) remember_text: bool,
    /// Remembered pad texts.  Only the first entry is used (single pad).
    #[serde(default)]
    pub(crate) pad_texts: Vec<String>,
    /// Limit, mode and colours as they were at exit.
    #[serde(default)]
    pub(crate) highlight: HighlightConfig,
}

impl Default for SettingsData {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            remember_text: false,
            pad_texts: Vec::new(),
            highlight: HighlightConfig::default(),
        }
    }
}

// ── Format version ────────────────────────────────────────────────────────────

const SETTINGS_VERSION: u32 = 1;

// ── Path ──────────────────────────────────────────────────────────────────────

/// Sidecar file name, derived from the product name.
pub(crate) const SETTINGS_FILE_NAME: &str = "Limitpad-SettingsData.txt";

/// Directory holding the settings and log files: the executable's directory,
/// or the current directory when that cannot be determined.
pub(crate) fn data_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Full path of the settings file.
pub(crate) fn settings_path() -> PathBuf {
    data_dir().join(SETTINGS_FILE_NAME)
}

// ── Save ──────────────────────────────────────────────────────────────────────

/// Write `data` to `path`, replacing any previous file.
pub(crate) fn save_to(path: &Path, data: &SettingsData) -> Result<()> {
    let file = fs::File::create(path)?;
    serde_json::to_writer_pretty(file, data)?;
    log::debug!("settings saved to {}", path.display());
    Ok(())
}

// ── Load ──────────────────────────────────────────────────────────────────────

/// Read and parse the settings file at `path`.
///
/// A file with an unrecognised version is treated as absent and yields the
/// defaults.
pub(crate) fn load_from(path: &Path) -> Result<SettingsData> {
    let bytes = fs::read(path)?;
    let data: SettingsData = serde_json::from_slice(&bytes)?;
    if data.version != SETTINGS_VERSION {
        log::warn!(
            "settings version {} not recognised (expected {SETTINGS_VERSION}); using defaults",
            data.version
        );
        return Ok(SettingsData::default());
    }
    Ok(data)
}

/// Load the settings at `path`, creating a default file first when none
/// exists.
///
/// Never fails: a file that cannot be read or parsed is logged and the app
/// continues with defaults.
pub(crate) fn load_or_create(path: &Path) -> SettingsData {
    if !path.exists() {
        let defaults = SettingsData::default();
        if let Err(e) = save_to(path, &defaults) {
            log::warn!("could not create {}: {e}", path.display());
        }
        return defaults;
    }
    match load_from(path) {
        Ok(data) => {
            log::info!("settings loaded from {}", path.display());
            data
        }
        Err(e) => {
            log::warn!("could not load {}: {e}; using defaults", path.display());
            SettingsData::default()
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::LimitMode;
    use crate::theme::Rgb;
    use pretty_assertions::assert_eq;

    fn sample() -> SettingsData {
        SettingsData {
            version: SETTINGS_VERSION,
            remember_text: true,
            pad_texts: vec!["hello\r\nworld".to_owned()],
            highlight: HighlightConfig {
                mode: LimitMode::Words,
                limit: 12,
                pre: Rgb(0x202020),
                post: Rgb(0x00AA00),
            },
        }
    }

    #[test]
    fn save_then_load_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(SETTINGS_FILE_NAME);
        save_to(&path, &sample()).expect("save");
        assert_eq!(load_from(&path).expect("load"), sample());
    }

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(SETTINGS_FILE_NAME);
        assert!(!path.exists());
        let data = load_or_create(&path);
        assert_eq!(data, SettingsData::default());
        assert!(path.exists(), "default settings file should be written");
        assert_eq!(load_from(&path).expect("load"), SettingsData::default());
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(SETTINGS_FILE_NAME);
        fs::write(&path, b"<SettingsData>not json</SettingsData>").expect("write");
        assert!(load_from(&path).is_err());
        assert_eq!(load_or_create(&path), SettingsData::default());
    }

    #[test]
    fn unknown_version_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(SETTINGS_FILE_NAME);
        let newer = SettingsData { version: 99, ..sample() };
        save_to(&path, &newer).expect("save");
        assert_eq!(load_from(&path).expect("load"), SettingsData::default());
    }

    /// Files written before the highlight block existed only carry the
    /// remember flag and texts.
    #[test]
    fn missing_fields_default() {
        let json = r#"{"version":1,"remember_text":true}"#;
        let data: SettingsData = serde_json::from_str(json).expect("deserialize");
        assert!(data.remember_text);
        assert!(data.pad_texts.is_empty());
        assert_eq!(data.highlight, HighlightConfig::default());
    }

    #[test]
    fn settings_file_sits_in_data_dir() {
        let path = settings_path();
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some(SETTINGS_FILE_NAME));
        assert_eq!(path.parent(), Some(data_dir().as_path()));
    }
}
