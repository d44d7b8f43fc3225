//! CLI output formatting.
//!
//! Each display has a `format_*` function (returns `String` or `Vec<String>`)
//! for testability and, where it is printed directly, a `print_*` wrapper that
//! writes to stdout. Format functions are pure — no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Resize
//!
//! ```text
//! image_001.png  800×600px · 1.5 KB  PNG
//! image_002.png  800×533px · 1.41 KB  PNG
//!
//! 2 file(s) · 2.91 KB
//! Archive: out/images.zip
//! ```
//!
//! ## Plan
//!
//! ```text
//! dawn.jpg  4000×3000 → 800×600  image_001.png
//! notes.txt  (not an image: Decode failed: Unrecognized image format)
//! ```

use crate::process::{BatchState, BatchStatus, Preview, PreviewHandle, PreviewSink};

/// Shown before anything has been processed, or after the batch is cleared.
pub const EMPTY_MESSAGE: &str = "No files processed yet.";

/// Shown when every input of a batch failed.
pub const NOTHING_PROCESSED_MESSAGE: &str = "No files could be processed. Check the log for errors.";

const BYTE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Format a byte count with 1024-based units and up to two decimals.
///
/// Trailing zeros are dropped: `1536` → `"1.5 KB"`, `1048576` → `"1 MB"`.
/// Ties round up (`1152` → `"1.13 KB"`). Sizes past the largest unit stay in GB.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut unit = 0;
    while unit + 1 < BYTE_UNITS.len() && bytes >= 1u64 << (10 * (unit + 1)) {
        unit += 1;
    }
    let value = bytes as f64 / (1u64 << (10 * unit)) as f64;
    // `{:.2}` alone rounds exact ties to even
    let rounded = (value * 100.0 + 0.5).floor() / 100.0;
    let fixed = format!("{:.2}", rounded);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, BYTE_UNITS[unit])
}

/// One-line summary of a batch.
pub fn format_summary(state: &BatchState) -> String {
    match state.status() {
        BatchStatus::NothingProcessed => NOTHING_PROCESSED_MESSAGE.to_string(),
        _ if state.is_empty() => EMPTY_MESSAGE.to_string(),
        _ => format!(
            "{} file(s) · {}",
            state.results().len(),
            format_bytes(state.total_bytes())
        ),
    }
}

/// Format a processed image as a single preview line.
pub fn format_preview(preview: &Preview<'_>) -> String {
    format!(
        "{}  {}×{}px · {}  PNG",
        preview.name,
        preview.width,
        preview.height,
        format_bytes(preview.size)
    )
}

/// Format one line of `plan` output.
pub fn format_plan_line(
    input: &str,
    intrinsic: (u32, u32),
    resolved: (u32, u32),
    output: &str,
) -> String {
    format!(
        "{}  {}×{} → {}×{}  {}",
        input, intrinsic.0, intrinsic.1, resolved.0, resolved.1, output
    )
}

/// Format a `plan` line for an input that could not be decoded.
pub fn format_plan_failure(input: &str, reason: &str) -> String {
    format!("{}  (not an image: {})", input, reason)
}

/// Preview sink that prints one line per image to stdout.
///
/// Console output can't be taken back, so a handle only tracks how many
/// previews are outstanding.
#[derive(Debug, Default)]
pub struct ConsolePreview {
    next: u64,
    live: usize,
}

impl ConsolePreview {
    pub fn new() -> Self {
        Self::default()
    }

    /// Previews shown and not yet released.
    pub fn live(&self) -> usize {
        self.live
    }
}

impl PreviewSink for ConsolePreview {
    fn show(&mut self, preview: &Preview<'_>) -> Option<PreviewHandle> {
        println!("{}", format_preview(preview));
        self.next += 1;
        self.live += 1;
        Some(PreviewHandle(self.next))
    }

    fn release(&mut self, _handle: PreviewHandle) {
        self.live = self.live.saturating_sub(1);
    }
}

/// Print the batch summary line.
pub fn print_summary(state: &BatchState) {
    println!();
    println!("{}", format_summary(state));
}
