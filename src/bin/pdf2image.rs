//! CLI binary: rasterise a single-page PDF to a PNG file.
//!
//! A thin shim over [`pdf2slides::pdf_to_image`].

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use pdf2slides::{pdf_to_image, write_error};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Writes one.png next to the input
  pdf2image one.pdf

  # Explicit output path and resolution
  pdf2image --dpi 150 one.pdf /tmp/cover.png

ENVIRONMENT VARIABLES:
  PDF2IMAGE_DPI     Default for --dpi
  PDFIUM_LIB_PATH   Path to an existing libpdfium
  RUST_LOG          Log filter (logs go to stderr)
"#;

/// Rasterise a single-page PDF to PNG.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2image",
    version,
    about = "Rasterise a single-page PDF to a PNG image",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to a PDF with exactly one page.
    pdf_path: PathBuf,

    /// Where to write the PNG. Default: the input path with a .png extension.
    output_image_path: Option<PathBuf>,

    /// Rendering DPI (50–600).
    #[arg(long, env = "PDF2IMAGE_DPI", default_value_t = 300,
          value_parser = clap::value_parser!(u32).range(50..=600))]
    dpi: u32,

    /// Report failures as {"error": ...} on stdout instead of text on stderr.
    #[arg(long)]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDF2IMAGE_VERBOSE")]
    verbose: bool,
}

/// Parse arguments; anything but `--help`/`--version` prints usage to
/// stdout and exits with status 1.
fn parse_args() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            println!("{}", e.render());
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = parse_args();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    match run(&cli).await {
        Ok(path) => {
            println!("Saved image to {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            let message = format!("{e:#}");
            if cli.json {
                if let Err(io_err) = write_error(&message, io::stdout().lock()) {
                    eprintln!("Error: {message} (and stdout failed: {io_err})");
                }
            } else {
                eprintln!("Error: {message}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<PathBuf> {
    let saved = pdf_to_image(&cli.pdf_path, cli.output_image_path.as_deref(), cli.dpi).await?;
    Ok(saved.path)
}
