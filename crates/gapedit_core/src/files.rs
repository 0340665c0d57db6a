//! Plain-text load/save for the gap buffer.
//!
//! Fallible helpers return [`EditorError`]; the `*_or_log` entry points used
//! by the host report failures as an absent path instead.

use crate::constants::TEXT_FILE_EXTENSION;
use crate::error::EditorError;
use crate::gap_buffer::GapBuffer;
use std::fs;
use std::path::{Path, PathBuf};

/// File-picker collaborator supplying load and save destinations.
pub trait FilePicker {
    /// Path to open, or `None` when the user cancelled.
    fn pick_open(&mut self) -> Option<PathBuf>;

    /// Path to save to, or `None` when the user cancelled.
    fn pick_save(&mut self, suggested_name: Option<&str>) -> Option<PathBuf>;
}

/// Append `.txt` unless the path's last four characters are exactly `.txt`.
///
/// The comparison is case-sensitive, so `NOTES.TXT` becomes
/// `NOTES.TXT.txt`.
pub fn with_text_extension(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    if raw.ends_with(TEXT_FILE_EXTENSION) {
        return path.to_path_buf();
    }
    let mut extended = path.as_os_str().to_os_string();
    extended.push(TEXT_FILE_EXTENSION);
    PathBuf::from(extended)
}

/// Replace the buffer with the contents of `path`.
///
/// The buffer is cleared only after the read succeeds; bytes that are not
/// valid UTF-8 are replaced with U+FFFD.
///
/// # Errors
/// Returns [`EditorError::Io`] when the file cannot be read.
pub fn load_file(buffer: &mut GapBuffer, path: &Path) -> Result<(), EditorError> {
    let bytes = fs::read(path).map_err(|err| EditorError::io(path, err))?;
    let text = String::from_utf8_lossy(&bytes);
    buffer.clear();
    for ch in text.chars() {
        buffer.insert(ch);
    }
    tracing::info!(path = %path.display(), chars = buffer.len(), "loaded file");
    Ok(())
}

/// Write the buffer verbatim, enforcing the `.txt` suffix.
///
/// # Returns
/// The path actually written.
///
/// # Errors
/// Returns [`EditorError::Io`] when the file cannot be written.
pub fn save_file(buffer: &GapBuffer, path: &Path) -> Result<PathBuf, EditorError> {
    let target = with_text_extension(path);
    fs::write(&target, buffer.to_string()).map_err(|err| EditorError::io(&target, err))?;
    tracing::info!(path = %target.display(), chars = buffer.len(), "saved file");
    Ok(target)
}

/// Load via [`load_file`], logging failures.
///
/// # Returns
/// The loaded path, or `None` when the read failed (buffer untouched).
pub fn load_or_log(buffer: &mut GapBuffer, path: &Path) -> Option<PathBuf> {
    match load_file(buffer, path) {
        Ok(()) => Some(path.to_path_buf()),
        Err(err) => {
            tracing::warn!("Failed to load document: {}", err);
            None
        }
    }
}

/// Save via [`save_file`], logging failures.
///
/// # Returns
/// The written path, or `None` when the write failed.
pub fn save_or_log(buffer: &GapBuffer, path: &Path) -> Option<PathBuf> {
    match save_file(buffer, path) {
        Ok(target) => Some(target),
        Err(err) => {
            tracing::warn!("Failed to save document: {}", err);
            None
        }
    }
}
