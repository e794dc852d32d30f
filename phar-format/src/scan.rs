use std::io::Result;
use std::path::{Path, PathBuf};

use regex::Regex;
use walkdir::WalkDir;

/// Recursively enumerate the files beneath `root`, optionally filtered by a
/// pattern searched against the full path.
///
/// Depth-first; within a directory, entries come back in the order the OS
/// listing returns them, which is not guaranteed sorted. Directories are
/// never yielded themselves.
pub fn find<P: AsRef<Path>>(root: P, pattern: Option<&Regex>) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root.as_ref()).follow_links(true) {
        let entry = entry.map_err(std::io::Error::from)?;

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.into_path();
        if let Some(pattern) = pattern {
            if !pattern.is_match(&path.to_string_lossy()) {
                continue;
            }
        }

        files.push(path);
    }

    tracing::debug!(root = %root.as_ref().display(), count = files.len(), "scanned directory");

    Ok(files)
}
