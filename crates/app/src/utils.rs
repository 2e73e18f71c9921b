//! Helper functions for the PDF Drop app.

use shared::settings::UploadSettings;
use std::path::Path;

/// Get the config file path
pub fn config_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|mut p| {
        p.push("pdf_drop");
        p.push("settings.json");
        p
    })
}

/// Read settings from a JSON file, if it exists and parses.
pub fn load_settings_from(path: &Path) -> Option<UploadSettings> {
    let contents = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str::<UploadSettings>(&contents) {
        Ok(settings) => Some(settings),
        Err(e) => {
            tracing::warn!(path = %path.display(), "Ignoring unreadable settings: {}", e);
            None
        }
    }
}

/// Load settings from disk or defaults, then apply environment overrides.
pub fn load_settings_or_default() -> UploadSettings {
    config_path()
        .and_then(|path| load_settings_from(&path))
        .unwrap_or_default()
        .with_env_overrides()
}
