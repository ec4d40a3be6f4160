//! Input file discovery and line reading

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::{Error, Result};

/// List regular files in `dir` (not recursive) with the given extension
///
/// Results are sorted by path so runs process files in a stable order.
pub fn discover_input_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let dir_str = dir.to_str().ok_or_else(|| {
        Error::configuration(format!(
            "Input directory is not valid UTF-8: {}",
            dir.display()
        ))
    })?;

    let pattern = format!(
        "{}/*.{}",
        glob::Pattern::escape(dir_str),
        glob::Pattern::escape(extension)
    );
    debug!("Searching for input files matching {}", pattern);

    let entries = glob::glob(&pattern)
        .map_err(|e| Error::configuration(format!("Invalid input pattern '{}': {}", pattern, e)))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            Error::file_system(path, "failed to inspect directory entry", e.into())
        })?;
        if path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    debug!("Found {} input files in {}", files.len(), dir.display());
    Ok(files)
}

/// Read a file's lines without terminators, dropping blank lines
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::file_system(path, "failed to read input file", e))?;

    Ok(content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect())
}
