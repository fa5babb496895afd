//! Whole-collection JSON persistence. Each collection (notes, maps, plans,
//! decks) lives in one file; saves rewrite the file atomically and loads fall
//! back to seed data when the file is missing or unreadable. There is no
//! migration layer and no partial write.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Write via temp file + rename so a crash mid-save never leaves a truncated
/// collection behind.
pub fn atomic_write_file(path: &Path, content: &[u8]) -> Result<(), String> {
    use std::io::Write;

    let file_name = path.file_name().unwrap_or_default().to_string_lossy();
    let temp_path = path.with_file_name(format!("{}.studybuddy-tmp", file_name));

    let mut file = fs::File::create(&temp_path)
        .map_err(|e| format!("Failed to create temp file {:?}: {}", temp_path, e))?;
    file.write_all(content)
        .map_err(|e| format!("Failed to write temp file {:?}: {}", temp_path, e))?;
    file.sync_all()
        .map_err(|e| format!("Failed to sync temp file {:?}: {}", temp_path, e))?;
    drop(file);

    fs::rename(&temp_path, path)
        .map_err(|e| format!("Failed to rename {:?} -> {:?}: {}", temp_path, path, e))?;

    Ok(())
}

/// Serialize a collection to its file.
pub fn save_collection<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize {:?}: {}", path, e))?;
    atomic_write_file(path, json.as_bytes())
}

/// Load a collection, or `None` when the file does not exist.
pub fn load_collection<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|e| format!("Failed to read {:?}: {}", path, e))?;
    let value = serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse {:?}: {}", path, e))?;
    Ok(Some(value))
}

/// Load a collection, seeding on absence OR corruption. A file that fails to
/// parse is logged and replaced by seed data rather than erroring the whole
/// startup.
pub fn load_or_seed<T, F>(path: &Path, seed: F) -> T
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    match load_collection(path) {
        Ok(Some(value)) => value,
        Ok(None) => {
            log::info!("[storage] {:?} not found, seeding defaults", path);
            seed()
        }
        Err(e) => {
            log::warn!("[storage] {}, seeding defaults", e);
            seed()
        }
    }
}
