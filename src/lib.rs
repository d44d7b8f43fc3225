//! # batch-resize
//!
//! Resize a set of images in one pass, rename them to a numbered pattern and
//! bundle the results into a single ZIP archive.
//!
//! # Architecture: Per-Item Pipeline
//!
//! Every input goes through the same three steps, one input at a time:
//!
//! ```text
//! 1. Decode    bytes        →  SourceImage        (format sniffed from content)
//! 2. Resolve   SourceImage  →  output dimensions  (pure aspect-ratio rules)
//! 3. Render    SourceImage  →  PNG payload        (stretch to fill, encode)
//! ```
//!
//! Successes are numbered `<prefix>001.png`, `<prefix>002.png`, … in input
//! order and collected in a [`process::BatchState`]; failures are logged and
//! skipped without using up a number. The finished batch is handed to an
//! [`archive::ArchiveExporter`] as `(name, payload)` pairs.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`process`] | Batch orchestrator, batch state, preview sink trait |
//! | [`imaging`] | Decode/render backend trait, dimension resolver, `image`-crate backend |
//! | [`naming`] | `<prefix><NNN>.png` output names |
//! | [`archive`] | ZIP export of a finished batch |
//! | [`config`] | Layered `batch-resize.toml` + CLI configuration |
//! | [`scan`] | Command-line paths → in-memory input files |
//! | [`output`] | CLI output formatting (byte units, summary, previews) |
//!
//! # Design Decisions
//!
//! ## Sequential, Not Parallel
//!
//! Decode and render run on tokio's blocking pool, but the orchestrator awaits
//! each one before starting the next. Output numbering must follow input order
//! exactly, and awaiting in sequence gives that with no coordination at all.
//!
//! ## PNG Only
//!
//! Output is always PNG. Whatever the input format (PNG, JPEG, GIF, BMP,
//! WebP), every result is lossless RGBA with a predictable `.png` name.
//!
//! ## Unset Is Not Zero
//!
//! A missing target width or height is `None`. Zero is rejected at config
//! validation, so "leave this edge alone" can never be confused with a typo.

pub mod archive;
pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod process;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
