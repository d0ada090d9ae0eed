use std::path::Path;

use crate::error::AppError;
use crate::models::settings::AppConfig;

/// Read the client configuration. Returns defaults if the file is absent or unreadable.
pub fn load_config(path: &Path) -> AppConfig {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => return AppConfig::default(),
    };
    serde_json::from_str(&content).unwrap_or_else(|e| {
        log::warn!("Ignoring malformed config {}: {}", path.display(), e);
        AppConfig::default()
    })
}

/// Write the client configuration, replacing the whole file.
pub fn save_config(path: &Path, config: &AppConfig) -> crate::error::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AppError::Storage(format!("create {}: {}", parent.display(), e)))?;
        }
    }
    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content)
        .map_err(|e| AppError::Storage(format!("write {}: {}", path.display(), e)))?;
    Ok(())
}
