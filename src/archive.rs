//! Archive export: bundle a batch into one downloadable ZIP.
//!
//! The batch only hands over ordered `(name, payload)` pairs; the container
//! layout belongs to the [`ArchiveExporter`]. Names in a batch are unique by
//! construction (monotonic numbering), but the exporter still refuses
//! duplicates rather than silently writing two entries with the same name.

use crate::process::BatchState;
use std::collections::HashSet;
use std::io::{Cursor, Write};
use thiserror::Error;
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

/// Default file name of the exported archive.
pub const ARCHIVE_NAME: &str = "images.zip";

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Duplicate entry name in archive: {0}")]
    DuplicateName(String),
}

/// Turns named payloads into a single archive payload.
pub trait ArchiveExporter {
    fn bundle(&self, entries: &[(&str, &[u8])]) -> Result<Vec<u8>, ArchiveError>;
}

/// ZIP container with deflate compression.
#[derive(Debug, Default)]
pub struct ZipExporter;

impl ArchiveExporter for ZipExporter {
    fn bundle(&self, entries: &[(&str, &[u8])]) -> Result<Vec<u8>, ArchiveError> {
        let mut seen = HashSet::new();
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for (name, bytes) in entries {
            if !seen.insert(*name) {
                return Err(ArchiveError::DuplicateName(name.to_string()));
            }
            writer.start_file(*name, options)?;
            writer.write_all(bytes)?;
        }

        Ok(writer.finish()?.into_inner())
    }
}

/// Bundle every result in `state`.
///
/// Returns `Ok(None)` without calling the exporter when the batch is empty.
/// The batch is only borrowed, so a failed export can be retried.
pub fn export_archive(
    exporter: &impl ArchiveExporter,
    state: &BatchState,
) -> Result<Option<Vec<u8>>, ArchiveError> {
    if state.is_empty() {
        return Ok(None);
    }
    let entries = state.entries();
    let bytes = exporter.bundle(&entries)?;
    log::info!(
        "Bundled {} file(s) into {} byte archive",
        entries.len(),
        bytes.len()
    );
    Ok(Some(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResizeConfig;
    use crate::imaging::backend::tests::MockBackend;
    use crate::process::{InputFile, NoPreview, process_batch};
    use std::cell::Cell;
    use std::io::Read;
    use std::sync::Arc;
    use zip::ZipArchive;

    /// Exporter that counts calls and can be told to fail.
    #[derive(Default)]
    struct CountingExporter {
        calls: Cell<usize>,
        fail: bool,
    }

    impl ArchiveExporter for CountingExporter {
        fn bundle(&self, entries: &[(&str, &[u8])]) -> Result<Vec<u8>, ArchiveError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                return Err(ArchiveError::Io(std::io::Error::other("disk full")));
            }
            Ok(vec![entries.len() as u8])
        }
    }

    async fn batch_of(n: usize) -> BatchState {
        let backend = Arc::new(MockBackend::new());
        let mut state = BatchState::new();
        let inputs = (0..n)
            .map(|i| InputFile::new(format!("{i}.jpg"), vec![0]))
            .collect();
        process_batch(backend, inputs, &ResizeConfig::default(), &mut state, &mut NoPreview)
            .await
            .unwrap();
        state
    }

    #[test]
    fn zip_contains_entries_in_order() {
        let entries: [(&str, &[u8]); 2] = [("image_001.png", b"first"), ("image_002.png", b"second")];
        let bytes = ZipExporter.bundle(&entries).unwrap();

        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 2);

        let mut first = archive.by_index(0).unwrap();
        assert_eq!(first.name(), "image_001.png");
        let mut contents = Vec::new();
        first.read_to_end(&mut contents).unwrap();
        assert_eq!(contents, b"first");
        drop(first);

        assert_eq!(archive.by_index(1).unwrap().name(), "image_002.png");
    }

    #[test]
    fn zip_rejects_duplicate_names() {
        let entries: [(&str, &[u8]); 2] = [("a.png", b"1"), ("a.png", b"2")];
        let err = ZipExporter.bundle(&entries).unwrap_err();
        assert!(matches!(err, ArchiveError::DuplicateName(n) if n == "a.png"));
    }

    #[test]
    fn empty_batch_export_is_noop() {
        let exporter = CountingExporter::default();
        let result = export_archive(&exporter, &BatchState::new()).unwrap();
        assert!(result.is_none());
        assert_eq!(exporter.calls.get(), 0);
    }

    #[tokio::test]
    async fn export_bundles_all_results() {
        let state = batch_of(3).await;
        let bytes = export_archive(&ZipExporter, &state).unwrap().unwrap();

        let archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        assert_eq!(names.len(), 3);
        assert!(names.contains(&"image_001.png"));
        assert!(names.contains(&"image_003.png"));
    }

    #[tokio::test]
    async fn failed_export_preserves_batch() {
        let state = batch_of(2).await;
        let exporter = CountingExporter {
            fail: true,
            ..Default::default()
        };

        assert!(export_archive(&exporter, &state).is_err());
        assert_eq!(state.results().len(), 2);

        // Retry with a working exporter succeeds on the same batch.
        let retry = export_archive(&CountingExporter::default(), &state).unwrap();
        assert_eq!(retry, Some(vec![2]));
    }
}
