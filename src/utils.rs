//! Utility functions for file operations and path manipulation

use crate::config::RenamePolicy;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Extension given to every saved image
pub const IMAGE_EXTENSION: &str = "jpg";

/// Maximum number of rename attempts when resolving file collisions
const MAX_RENAME_ATTEMPTS: u32 = 9999;

/// Turn an extracted title into an image file name
///
/// The title is used verbatim with `.jpg` appended. Titles that would escape
/// the image directory or name no file at all are rejected: empty titles,
/// `.` and `..`, and anything containing `/`, `\` or NUL.
///
/// # Examples
///
/// ```
/// use hikr_dl::utils::title_file_name;
///
/// assert_eq!(title_file_name("Matterhorn Ascent").unwrap(), "Matterhorn Ascent.jpg");
/// assert!(title_file_name("../etc/passwd").is_err());
/// ```
pub fn title_file_name(title: &str) -> Result<String> {
    let reject = |reason: &str| Error::InvalidTitle {
        title: title.to_string(),
        reason: reason.to_string(),
    };

    if title.is_empty() {
        return Err(reject("title is empty"));
    }
    if title == "." || title == ".." {
        return Err(reject("title is a relative directory name"));
    }
    if title.contains(['/', '\\']) {
        return Err(reject("title contains a path separator"));
    }
    if title.contains('\0') {
        return Err(reject("title contains a NUL byte"));
    }

    Ok(format!("{}.{}", title, IMAGE_EXTENSION))
}

/// Resolve where a file should land when `path` may already be taken
///
/// - `Overwrite` always returns `path`.
/// - `Skip` fails with [`Error::FileCollision`] if `path` exists.
/// - `Rename` returns the first free `stem (n).ext`.
pub fn resolve_destination(path: &Path, policy: RenamePolicy) -> Result<PathBuf> {
    match policy {
        RenamePolicy::Overwrite => Ok(path.to_path_buf()),
        RenamePolicy::Skip => {
            if path.exists() {
                return Err(Error::FileCollision {
                    path: path.to_path_buf(),
                });
            }
            Ok(path.to_path_buf())
        }
        RenamePolicy::Rename => {
            if path.exists() {
                next_free_path(path)
            } else {
                Ok(path.to_path_buf())
            }
        }
    }
}

/// First `stem (n).ext` next to `path` that does not exist yet
///
/// `path` itself is never returned, even when it is free.
pub fn next_free_path(path: &Path) -> Result<PathBuf> {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path.extension().map(|e| e.to_string_lossy().into_owned());
    let parent = path.parent().unwrap_or_else(|| Path::new(""));

    (1..=MAX_RENAME_ATTEMPTS)
        .map(|n| match &extension {
            Some(ext) => parent.join(format!("{} ({}).{}", stem, n, ext)),
            None => parent.join(format!("{} ({})", stem, n)),
        })
        .find(|candidate| !candidate.exists())
        .ok_or_else(|| Error::FileCollision {
            path: path.to_path_buf(),
        })
}

/// Name of the in-flight image for loop position `index`
pub fn transient_image_name(index: usize) -> String {
    format!("img{}.{}", index, IMAGE_EXTENSION)
}

/// Whether `file_name` has the shape of [`transient_image_name`] output
///
/// ```
/// use hikr_dl::utils::is_transient_image_name;
///
/// assert!(is_transient_image_name("img12.jpg"));
/// assert!(!is_transient_image_name("img12b.jpg"));
/// ```
pub fn is_transient_image_name(file_name: &str) -> bool {
    file_name
        .strip_prefix("img")
        .and_then(|rest| rest.strip_suffix(".jpg"))
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// Fail with [`Error::MissingDirectory`] unless `path` is an existing directory
pub fn ensure_directory(path: &Path) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(Error::MissingDirectory {
            path: path.to_path_buf(),
        })
    }
}

/// Delete a transient download, ignoring files that are already gone
pub async fn remove_transient(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => tracing::debug!(path = %path.display(), "Removed transient file"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to remove transient file")
        }
    }
}
