use batch_resize::archive::{ARCHIVE_NAME, ZipExporter, export_archive};
use batch_resize::config::{self, ConfigOverrides, ResizeConfig};
use batch_resize::imaging::{ImageBackend, RustBackend, plan_render};
use batch_resize::naming::output_name;
use batch_resize::process::{BatchError, BatchState, BatchStatus, InputFile, process_batch};
use batch_resize::{output, scan};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Environment variable holding the log filter (`env_logger` syntax).
const LOG_ENV: &str = "BATCH_RESIZE_LOG";

/// Shared flags for commands that run the resize rules over a set of inputs.
#[derive(clap::Args, Clone)]
struct BatchArgs {
    /// Image files or directories to process, in order
    inputs: Vec<PathBuf>,

    /// Output name prefix (default "image_")
    #[arg(long)]
    prefix: Option<String>,

    /// Index of the first output image; negative values fall back to 1
    #[arg(long, allow_negative_numbers = true)]
    start_index: Option<i64>,

    /// Target width in pixels
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    width: Option<u32>,

    /// Target height in pixels
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    height: Option<u32>,

    /// When only one of --width/--height is given, derive the other from the
    /// source aspect ratio
    #[arg(long)]
    keep_aspect: bool,
}

impl BatchArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            prefix: self.prefix.clone(),
            start_index: self.start_index,
            width: self.width,
            height: self.height,
            keep_aspect: self.keep_aspect,
        }
    }
}

#[derive(clap::Args)]
struct ResizeArgs {
    #[command(flatten)]
    batch: BatchArgs,

    /// Directory the archive (and --write-files output) is written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// File name of the archive inside --out-dir
    #[arg(long, default_value = ARCHIVE_NAME)]
    archive_name: String,

    /// Also write each resized image into --out-dir
    #[arg(long)]
    write_files: bool,

    /// Write a JSON report of the batch to this path
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Parser)]
#[command(name = "batch-resize")]
#[command(about = "Resize, renumber and zip a batch of images")]
#[command(long_about = "\
Resize, renumber and zip a batch of images

Every input is decoded, resized and re-encoded as PNG. Results are named
<prefix><NNN>.png in input order (at least three digits), and bundled into a
single ZIP archive. Inputs that fail to decode are skipped and logged; they do
not use up a number.

Sizing rules:
  neither --width nor --height   original size
  both                           exactly that size (stretched)
  one of them                    other edge unchanged, or derived from the
                                 source aspect ratio with --keep-aspect

Settings can also come from batch-resize.toml in the working directory (or
--config). Run 'batch-resize gen-config' for a documented example.

Set BATCH_RESIZE_LOG=info to see per-file progress and failures.")]
#[command(version)]
struct Cli {
    /// Config file (default: ./batch-resize.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resize inputs and write the archive
    Resize(ResizeArgs),
    /// Show what each input would become, without encoding anything
    Plan(BatchArgs),
    /// Print a stock batch-resize.toml with all options documented
    GenConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or(LOG_ENV, "warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Command::Resize(args) => {
            let resize_config = resolve_resize_config(cli.config.as_deref(), &args.batch)?;
            let inputs = scan::scan(&args.batch.inputs)?;

            let backend = Arc::new(RustBackend::new());
            let mut state = BatchState::new();
            let mut previews = output::ConsolePreview::new();
            process_batch(backend, inputs, &resize_config, &mut state, &mut previews).await?;
            output::print_summary(&state);

            if state.status() == BatchStatus::Completed {
                std::fs::create_dir_all(&args.out_dir)?;
                if args.write_files {
                    for result in state.results() {
                        std::fs::write(args.out_dir.join(&result.name), &result.bytes)?;
                    }
                }
                if let Some(bytes) = export_archive(&ZipExporter, &state)? {
                    let archive_path = args.out_dir.join(&args.archive_name);
                    std::fs::write(&archive_path, bytes)?;
                    println!("Archive: {}", archive_path.display());
                }
            }

            if let Some(report_path) = &args.report {
                let json = serde_json::to_string_pretty(&state.report())?;
                std::fs::write(report_path, json)?;
            }

            state.clear(&mut previews);
        }
        Command::Plan(args) => {
            let resize_config = resolve_resize_config(cli.config.as_deref(), &args)?;
            let inputs = scan::scan(&args.inputs)?;
            if inputs.is_empty() {
                return Err(BatchError::EmptyBatch.into());
            }
            print_plan(&RustBackend::new(), &inputs, &resize_config);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Layer config file and flags, validate, and normalize.
fn resolve_resize_config(
    config_path: Option<&Path>,
    args: &BatchArgs,
) -> Result<ResizeConfig, config::ConfigError> {
    let mut batch_config = config::load_config(config_path, Path::new("."))?;
    batch_config.apply_overrides(args.overrides());
    batch_config.validate()?;
    Ok(batch_config.resize_config())
}

/// Decode each input and print the size and name it would get.
///
/// Numbering follows the same rule as a real run: undecodable inputs are
/// listed but do not take an index.
fn print_plan(backend: &impl ImageBackend, inputs: &[InputFile], config: &ResizeConfig) {
    let mut index = config.start_index;
    for input in inputs {
        match backend.decode(&input.bytes) {
            Ok(source) => {
                let params = plan_render(&source, config.target, config.quality);
                println!(
                    "{}",
                    output::format_plan_line(
                        &input.name,
                        (source.width(), source.height()),
                        (params.width, params.height),
                        &output_name(&config.prefix, index),
                    )
                );
                index = index.saturating_add(1);
            }
            Err(e) => println!("{}", output::format_plan_failure(&input.name, &e.to_string())),
        }
    }
}
