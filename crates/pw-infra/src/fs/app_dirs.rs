use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Get the PasteWatch application data root directory.
///
/// # Platform-specific Paths
/// - macOS: ~/Library/Application Support/PasteWatch
/// - Windows: %APPDATA%\PasteWatch
/// - Linux: $XDG_DATA_HOME/PasteWatch or ~/.local/share/PasteWatch
///
/// The function only computes the path; the caller decides when to create
/// the directory.
pub fn app_data_dir() -> Result<PathBuf> {
    let base_dir = dirs::data_dir().context("Failed to get platform-specific data directory")?;
    Ok(base_dir.join("PasteWatch"))
}

/// Directory for full images and thumbnails, read directly by the UI.
pub fn images_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("images")
}

/// Location of the user settings file.
pub fn settings_path(data_dir: &Path) -> PathBuf {
    data_dir.join("settings.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_ends_with_app_name() {
        let path = app_data_dir().expect("Should be able to get app data dir");
        assert!(path.ends_with("PasteWatch"));
    }

    #[test]
    fn derived_paths_hang_off_the_data_dir() {
        let data_dir = PathBuf::from("/tmp/pastewatch-data");
        assert!(images_dir(&data_dir).ends_with("images"));
        assert!(settings_path(&data_dir).ends_with("settings.json"));
    }
}
