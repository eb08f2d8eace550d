//! Helpers for log formatting, markup text and output files.

use scraper::ElementRef;
use std::error::Error;
use std::fs as stdfs;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument};

/// Truncate a string for logging purposes.
///
/// Strings longer than `max` bytes are cut at the nearest char boundary and
/// get `"…(+N bytes)"` appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Full text of an element with surrounding whitespace removed.
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Text of an element with each text node trimmed and empty nodes dropped,
/// joined by single spaces. Used where markup splits a value across `<br>`
/// or nested inline tags.
pub fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Ensure the directory holding `file` exists and is writable.
///
/// Creates the directory if needed, then performs a write test by creating
/// and immediately deleting a probe file.
///
/// # Returns
///
/// `Ok(())` once the directory is known to accept new files; the I/O error
/// of the first failing step otherwise.
#[instrument(level = "info", skip_all, fields(file = %file.display()))]
pub async fn ensure_parent_writable(file: &Path) -> Result<(), Box<dyn Error>> {
    let dir = match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).await?;
    // Small sync write: simpler error surface than tokio's
    let probe_path = dir.join("..__probe_write__");
    stdfs::File::create(&probe_path)?;
    let _ = stdfs::remove_file(&probe_path);
    info!(dir = %dir.display(), "Output directory is writable");
    Ok(())
}

/// Replace `path` with `contents` in one step.
///
/// The bytes are written to a sibling temporary file first and then renamed
/// over the target, so readers never observe a half-written file.
///
/// # Arguments
///
/// * `path` - File to replace; its directory must already exist.
/// * `contents` - Complete new file contents.
///
/// # Errors
///
/// Returns the I/O error of the write or the rename. A failed rename leaves
/// `<path>.tmp` behind and `path` untouched.
pub async fn replace_file(path: &Path, contents: &[u8]) -> Result<(), Box<dyn Error>> {
    let mut tmp_name = path
        .file_name()
        .ok_or_else(|| format!("not a file path: {}", path.display()))?
        .to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    fs::write(&tmp_path, contents).await?;
    fs::rename(&tmp_path, path).await?;
    debug!(path = %path.display(), bytes = contents.len(), "Replaced file");
    Ok(())
}
