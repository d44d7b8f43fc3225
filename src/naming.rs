//! Output file naming: `<prefix><NNN>.png`.
//!
//! Every successfully processed image gets the next number in the batch,
//! rendered in decimal and zero-padded to at least three digits. Indices past
//! 999 simply grow wider; nothing is truncated.
//!
//! - prefix `image_`, index 1 → `image_001.png`
//! - prefix `img_`, index 42 → `img_042.png`
//! - prefix `x`, index 12345 → `x12345.png`

/// Extension of every generated file. Output is always PNG.
pub const OUTPUT_EXTENSION: &str = "png";

/// Minimum number of digits in the rendered index.
const INDEX_WIDTH: usize = 3;

/// Render an index zero-padded to at least three digits.
pub fn pad_index(index: u64) -> String {
    format!("{:0>width$}", index, width = INDEX_WIDTH)
}

/// Build the output file name for the `index`-th image of a batch.
pub fn output_name(prefix: &str, index: u64) -> String {
    format!("{}{}.{}", prefix, pad_index(index), OUTPUT_EXTENSION)
}
