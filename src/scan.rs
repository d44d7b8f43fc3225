//! Input discovery: command-line paths → in-memory input files.
//!
//! A file argument becomes one input. A directory argument is walked
//! recursively and every regular file inside becomes an input, in file-name
//! order. Arguments keep the order they were given in.
//!
//! Nothing is filtered by extension: whether a file is an image is decided by
//! the decoder, and files that fail there are skipped by the batch.

use crate::process::InputFile;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to walk directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Expand `paths` into the ordered list of files to process.
pub fn collect_paths(paths: &[PathBuf]) -> Result<Vec<PathBuf>, ScanError> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path).sort_by_file_name() {
                let entry = entry?;
                if entry.file_type().is_file() {
                    files.push(entry.into_path());
                }
            }
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}

/// Read one file into an [`InputFile`].
pub fn read_input(path: &Path) -> Result<InputFile, ScanError> {
    let bytes = fs::read(path).map_err(|source| ScanError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(InputFile::new(name, bytes))
}

/// Expand `paths` and read every file into memory.
pub fn scan(paths: &[PathBuf]) -> Result<Vec<InputFile>, ScanError> {
    let files = collect_paths(paths)?;
    log::info!("Found {} input file(s)", files.len());
    files.iter().map(|p| read_input(p)).collect()
}
