use crate::error::AppError;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Turn a user-supplied folder argument into a directory path.
///
/// Accepts a directory, a file inside the wanted directory, or a `file://`
/// URL with percent-encoded characters.
pub fn resolve_folder(arg: &str) -> Result<PathBuf, AppError> {
    let raw = match arg.strip_prefix("file://") {
        Some(encoded) => urlencoding::decode(encoded)
            .map_err(|e| AppError::InvalidFolder(format!("{}: {}", arg, e)))?
            .into_owned(),
        None => arg.to_string(),
    };

    let trimmed = raw.trim_end_matches(std::path::is_separator);
    // A lone "/" trims down to nothing
    let path = if trimmed.is_empty() && !raw.is_empty() {
        PathBuf::from(&raw)
    } else {
        PathBuf::from(trimmed)
    };

    if path.is_dir() {
        return Ok(path);
    }
    if path.is_file()
        && let Some(parent) = path.parent()
    {
        let parent = if parent.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            parent.to_path_buf()
        };
        return Ok(parent);
    }

    Err(AppError::InvalidFolder(arg.to_string()))
}

/// Check whether a path has one of the given extensions, ignoring case
pub fn has_media_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|wanted| wanted.eq_ignore_ascii_case(ext)))
}

/// List the media files directly inside `folder`, sorted by file name.
/// Subdirectories are not descended into.
pub fn list_media_files(folder: &Path, extensions: &[String]) -> Result<Vec<PathBuf>, AppError> {
    if !folder.is_dir() {
        return Err(AppError::InvalidFolder(folder.display().to_string()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| AppError::InvalidFolder(format!("{}: {}", folder.display(), e)))?;
        if entry.file_type().is_file() && has_media_extension(entry.path(), extensions) {
            files.push(entry.into_path());
        }
    }

    debug!("Found {} media files in {}", files.len(), folder.display());
    Ok(files)
}
