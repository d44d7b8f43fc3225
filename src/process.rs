//! Batch processing: decode → resolve → render, one input at a time.
//!
//! ## Lifecycle
//!
//! ```text
//! Idle ──process_batch──▶ Processing ──▶ Completed         (≥1 result)
//!                                    └─▶ NothingProcessed  (every input failed)
//! ```
//!
//! An empty input list is rejected with [`BatchError::EmptyBatch`] before
//! anything changes. Otherwise the previous batch is cleared (its previews
//! released) and inputs are processed strictly in order.
//!
//! ## Sequential Processing
//!
//! Decode and render are CPU-bound, so each runs on tokio's blocking pool.
//! The orchestrator awaits each step before starting the next, so there is
//! never more than one item in flight and output numbering always follows
//! input order. The run cannot be cancelled once started.
//!
//! ## Numbering
//!
//! Each success takes the next index, starting at the configured start index.
//! A failed item is logged and skipped without using up a number, so the
//! output sequence has no gaps.

use crate::config::ResizeConfig;
use crate::imaging::{BackendError, EncodedImage, ImageBackend, resize_source};
use crate::naming::output_name;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("Please select at least one image file")]
    EmptyBatch,
}

/// Failure of a single input. Never aborts the batch.
#[derive(Error, Debug)]
pub enum ItemError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error("Processing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// One user-selected file. The name is only used for log messages.
#[derive(Debug, Clone)]
pub struct InputFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl InputFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// Opaque token for a preview created by a [`PreviewSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PreviewHandle(pub u64);

/// What a preview sink is shown for each processed image.
#[derive(Debug, Clone, Copy)]
pub struct Preview<'a> {
    pub name: &'a str,
    pub bytes: &'a [u8],
    pub size: u64,
    pub width: u32,
    pub height: u32,
}

/// Receives a preview per processed image.
///
/// A handle returned from [`show`](Self::show) is passed back to
/// [`release`](Self::release) exactly once, when the batch holding it is
/// cleared or replaced.
pub trait PreviewSink {
    fn show(&mut self, preview: &Preview<'_>) -> Option<PreviewHandle>;
    fn release(&mut self, handle: PreviewHandle);
}

/// Sink that shows nothing and holds nothing.
pub struct NoPreview;

impl PreviewSink for NoPreview {
    fn show(&mut self, _preview: &Preview<'_>) -> Option<PreviewHandle> {
        None
    }

    fn release(&mut self, _handle: PreviewHandle) {}
}

/// One successfully processed input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedResult {
    pub name: String,
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub preview: Option<PreviewHandle>,
}

impl ProcessedResult {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    /// Nothing has run yet, or the batch was cleared.
    Idle,
    /// At least one input produced a result.
    Completed,
    /// Every input failed.
    NothingProcessed,
}

/// Aggregate counts for a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub status: BatchStatus,
    pub processed: usize,
    pub failed: usize,
    pub total_bytes: u64,
}

/// Serializable record of a finished batch, written by `resize --report`.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    #[serde(flatten)]
    pub summary: BatchSummary,
    pub files: Vec<ReportEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    pub name: String,
    pub size: u64,
    pub width: u32,
    pub height: u32,
}

/// Results of the current batch plus the running index.
///
/// Owned by the caller and handed to [`process_batch`] by `&mut`.
#[derive(Debug)]
pub struct BatchState {
    results: Vec<ProcessedResult>,
    next_index: u64,
    failed: usize,
    status: BatchStatus,
}

impl Default for BatchState {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchState {
    pub fn new() -> Self {
        Self {
            results: Vec::new(),
            next_index: 0,
            failed: 0,
            status: BatchStatus::Idle,
        }
    }

    pub fn results(&self) -> &[ProcessedResult] {
        &self.results
    }

    pub fn status(&self) -> BatchStatus {
        self.status
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn total_bytes(&self) -> u64 {
        self.results.iter().map(ProcessedResult::size).sum()
    }

    pub fn summary(&self) -> BatchSummary {
        BatchSummary {
            status: self.status,
            processed: self.results.len(),
            failed: self.failed,
            total_bytes: self.total_bytes(),
        }
    }

    pub fn report(&self) -> BatchReport {
        BatchReport {
            summary: self.summary(),
            files: self
                .results
                .iter()
                .map(|r| ReportEntry {
                    name: r.name.clone(),
                    size: r.size(),
                    width: r.width,
                    height: r.height,
                })
                .collect(),
        }
    }

    /// `(name, payload)` pairs in batch order, as handed to an archive exporter.
    pub fn entries(&self) -> Vec<(&str, &[u8])> {
        self.results
            .iter()
            .map(|r| (r.name.as_str(), r.bytes.as_slice()))
            .collect()
    }

    /// Drop all results, release their previews and return to `Idle`.
    pub fn clear<S: PreviewSink + ?Sized>(&mut self, sink: &mut S) {
        for result in self.results.drain(..) {
            if let Some(handle) = result.preview {
                sink.release(handle);
            }
        }
        self.next_index = 0;
        self.failed = 0;
        self.status = BatchStatus::Idle;
    }

    fn push<S: PreviewSink + ?Sized>(&mut self, encoded: EncodedImage, prefix: &str, sink: &mut S) {
        let name = output_name(prefix, self.next_index);
        self.next_index = self.next_index.saturating_add(1);

        let size = encoded.size();
        let preview = sink.show(&Preview {
            name: &name,
            bytes: &encoded.bytes,
            size,
            width: encoded.width,
            height: encoded.height,
        });
        log::info!(
            "Processed {} ({}x{}, {} bytes)",
            name,
            encoded.width,
            encoded.height,
            size
        );
        self.results.push(ProcessedResult {
            name,
            bytes: encoded.bytes,
            width: encoded.width,
            height: encoded.height,
            preview,
        });
    }
}

/// Decode, resolve and render one input. The two blocking steps are the
/// only suspension points.
async fn process_item<B: ImageBackend + 'static>(
    backend: &Arc<B>,
    bytes: Vec<u8>,
    config: &ResizeConfig,
) -> Result<EncodedImage, ItemError> {
    let decoder = Arc::clone(backend);
    let source = tokio::task::spawn_blocking(move || decoder.decode(&bytes)).await??;

    let renderer = Arc::clone(backend);
    let (target, quality) = (config.target, config.quality);
    let encoded = tokio::task::spawn_blocking(move || {
        resize_source(renderer.as_ref(), &source, target, quality)
    })
    .await??;
    Ok(encoded)
}

/// Run a batch over `inputs`, replacing whatever `state` held before.
///
/// Per-item failures are logged and counted, never returned. The only error
/// is an empty input list, in which case `state` is left untouched.
pub async fn process_batch<B, S>(
    backend: Arc<B>,
    inputs: Vec<InputFile>,
    config: &ResizeConfig,
    state: &mut BatchState,
    sink: &mut S,
) -> Result<BatchSummary, BatchError>
where
    B: ImageBackend + 'static,
    S: PreviewSink + ?Sized,
{
    if inputs.is_empty() {
        return Err(BatchError::EmptyBatch);
    }

    state.clear(sink);
    state.next_index = config.start_index;
    log::info!(
        "Processing {} file(s), first index {}",
        inputs.len(),
        config.start_index
    );

    for InputFile { name, bytes } in inputs {
        match process_item(&backend, bytes, config).await {
            Ok(encoded) => state.push(encoded, &config.prefix, sink),
            Err(e) => {
                log::warn!("Error processing file {}: {}", name, e);
                state.failed += 1;
            }
        }
    }

    state.status = if state.results.is_empty() {
        BatchStatus::NothingProcessed
    } else {
        BatchStatus::Completed
    };
    let summary = state.summary();
    log::info!(
        "Batch finished: {} processed, {} failed, {} bytes",
        summary.processed,
        summary.failed,
        summary.total_bytes
    );
    Ok(summary)
}
