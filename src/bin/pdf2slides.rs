//! CLI binary for pdf2slides.
//!
//! Rasterises every page of a PDF, uploads the PNGs under a session prefix
//! and prints the slide manifest as JSON. Stdout carries only JSON: the
//! manifest on success, `{"error": ...}` on any failure.

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use pdf2slides::pipeline::input::validate_pdf_path;
use pdf2slides::{
    convert_and_upload, write_error, write_manifest, ConversionProgressCallback, ObjectStore,
    ProgressCallback, S3Store, SlideRecord, StorageConfig, UploadConfig,
};
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Progress bar on stderr. Pages complete out of order, so per-page start
/// times are tracked by page number.
struct CliProgressCallback {
    bar: ProgressBar,
    start_times: Mutex<HashMap<usize, Instant>>,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());

        bar.set_style(spinner_style);
        bar.set_prefix("Rendering");
        bar.set_message("Rasterising PDF…");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            start_times: Mutex::new(HashMap::new()),
        })
    }

    fn elapsed_secs(&self, page_num: usize) -> f64 {
        self.start_times
            .lock()
            .ok()
            .and_then(|mut times| times.remove(&page_num))
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_conversion_start(&self, total_pages: usize) {
        let style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  [{bar:42.green/238}] {pos:>3}/{len} slides  ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ");

        self.bar.set_length(total_pages as u64);
        self.bar.set_style(style);
        self.bar.set_prefix("Uploading");
    }

    fn on_page_start(&self, page_num: usize, _total_pages: usize) {
        if let Ok(mut times) = self.start_times.lock() {
            times.insert(page_num, Instant::now());
        }
    }

    fn on_page_uploaded(&self, page_num: usize, total_pages: usize, key: &str) {
        let secs = self.elapsed_secs(page_num);
        self.bar.println(format!(
            "  {} Slide {:>3}/{:<3}  {}  {}",
            green("✓"),
            page_num,
            total_pages,
            dim(key),
            dim(&format!("{secs:.1}s")),
        ));
        self.bar.inc(1);
    }

    fn on_page_error(&self, page_num: usize, total_pages: usize, error: &str) {
        let secs = self.elapsed_secs(page_num);
        self.bar.println(format!(
            "  {} Slide {:>3}/{:<3}  {}  {}",
            red("✗"),
            page_num,
            total_pages,
            red(error),
            dim(&format!("{secs:.1}s")),
        ));
    }

    fn on_conversion_complete(&self, total_pages: usize) {
        self.bar.finish_and_clear();
        eprintln!("{} {} slides uploaded", green("✔"), total_pages);
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Upload every page of deck.pdf under sessions/abc123/slides/
  pdf2slides deck.pdf abc123

  # Higher resolution, live progress on stderr
  pdf2slides --dpi 200 --progress deck.pdf abc123 > manifest.json

OUTPUT:
  [{"slideNumber":1,"slideLocation":"sessions/abc123/slides/slide_001.png"}, ...]
  On failure: {"error": "<message>"} and exit status 1.

ENVIRONMENT VARIABLES (also read from ./.env):
  MINIO_ENDPOINT     host:port of the S3-compatible endpoint
  MINIO_ACCESS_KEY   Access key
  MINIO_SECRET_KEY   Secret key
  MINIO_SECURE       Use HTTPS for a bare host:port endpoint (default: false)
  MINIO_REGION       Signing region (default: us-east-1)
  PDFIUM_LIB_PATH    Path to an existing libpdfium
  RUST_LOG           Log filter (logs go to stderr)

Slides are always written to the `storage` bucket.
"#;

/// Rasterise a PDF and publish each page as a PNG slide.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2slides",
    version,
    about = "Rasterise a PDF and upload each page as a PNG slide",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Path to the PDF to publish.
    pdf_path: PathBuf,

    /// Session identifier; becomes sessions/<SESSION_ID>/slides/ in the bucket.
    session_id: String,

    /// Rendering DPI (50–600).
    #[arg(long, env = "PDF2SLIDES_DPI", default_value_t = 130,
          value_parser = clap::value_parser!(u32).range(50..=600))]
    dpi: u32,

    /// Pages written and uploaded concurrently.
    #[arg(short, long, env = "PDF2SLIDES_CONCURRENCY", default_value_t = 4)]
    concurrency: usize,

    /// S3-compatible endpoint, e.g. localhost:9000.
    #[arg(long, env = "MINIO_ENDPOINT", hide_env_values = true)]
    endpoint: Option<String>,

    /// Storage access key.
    #[arg(long, env = "MINIO_ACCESS_KEY", hide_env_values = true)]
    access_key: Option<String>,

    /// Storage secret key.
    #[arg(long, env = "MINIO_SECRET_KEY", hide_env_values = true)]
    secret_key: Option<String>,

    /// Signing region.
    #[arg(long, env = "MINIO_REGION")]
    region: Option<String>,

    /// Use HTTPS when the endpoint has no scheme.
    #[arg(long, env = "MINIO_SECURE")]
    secure: bool,

    /// Show a progress bar on stderr.
    #[arg(long, env = "PDF2SLIDES_PROGRESS")]
    progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PDF2SLIDES_VERBOSE")]
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
    // A missing .env is fine; the process environment may carry everything.
    dotenvy::dotenv().ok();
    let cli = parse_args();

    // ── Logging setup ────────────────────────────────────────────────────
    // Stdout is reserved for JSON; logs always go to stderr.
    let filter = if cli.verbose {
        "debug"
    } else if cli.progress {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let outcome = match run(&cli).await {
        Ok(records) => write_manifest(&records, io::stdout().lock())
            .context("Failed to write manifest to stdout"),
        Err(e) => Err(e),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let message = format!("{e:#}");
            if let Err(io_err) = write_error(&message, io::stdout().lock()) {
                eprintln!("Error: {message} (and stdout failed: {io_err})");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> Result<Vec<SlideRecord>> {
    // A missing PDF is reported before storage settings are looked at.
    let pdf_path = validate_pdf_path(&cli.pdf_path)?;

    let storage = build_storage_config(cli)?;
    let store: Arc<dyn ObjectStore> = Arc::new(S3Store::new(&storage)?);

    let mut builder = UploadConfig::builder()
        .dpi(cli.dpi)
        .concurrency(cli.concurrency);
    if cli.progress {
        builder = builder.progress_callback(CliProgressCallback::new() as ProgressCallback);
    }
    let config = builder.build()?;

    let records = convert_and_upload(&pdf_path, &cli.session_id, store, &config).await?;
    Ok(records)
}

/// Map CLI args / environment to `StorageConfig`.
fn build_storage_config(cli: &Cli) -> Result<StorageConfig> {
    let mut builder = StorageConfig::builder().secure(cli.secure);

    if let Some(ref endpoint) = cli.endpoint {
        builder = builder.endpoint(endpoint);
    }
    if let Some(ref key) = cli.access_key {
        builder = builder.access_key(key);
    }
    if let Some(ref key) = cli.secret_key {
        builder = builder.secret_key(key);
    }
    if let Some(ref region) = cli.region {
        builder = builder.region(region);
    }

    Ok(builder.build()?)
}
