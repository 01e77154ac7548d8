//! CLI binary for html2pdf-cloud.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `ConversionConfig` and writes the PDF or reports the upload.

use anyhow::{Context, Result};
use clap::Parser;
use html2pdf_cloud::{
    convert_to_file, CloudConvert, ConversionConfig, ConversionOutput, S3Destination,
    DEFAULT_BASE_URL,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # PDF to stdout
  html2pdf https://example.com/invoice.html > invoice.pdf

  # PDF to a file
  html2pdf https://example.com/invoice.html -o invoice.pdf

  # Let the provider upload the PDF to S3 (public-read)
  html2pdf https://example.com/invoice.html --bucket docs --key invoices/42

ENVIRONMENT VARIABLES:
  CLOUDCONVERT_API_KEY    Provider API key (required)
  CLOUDCONVERT_BASE_URL   Provider API root (default: https://api.cloudconvert.com)
  AWS_ACCESS_KEY_ID       S3 access key forwarded to the provider
  AWS_SECRET_ACCESS_KEY   S3 secret key forwarded to the provider
  AWS_REGION              S3 region forwarded to the provider
"#;

/// Convert an HTML document to PDF through a cloud conversion API.
#[derive(Parser, Debug)]
#[command(
    name = "html2pdf",
    version,
    about = "Convert an HTML document to PDF through a cloud conversion API",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// URL of the HTML document; the provider downloads it.
    source: String,

    /// Write the PDF to this file instead of stdout.
    #[arg(short, long, env = "HTML2PDF_OUTPUT", conflicts_with_all = ["bucket", "key"])]
    output: Option<PathBuf>,

    /// S3 bucket the provider uploads the PDF to (needs --key).
    #[arg(long, env = "HTML2PDF_S3_BUCKET", requires = "key")]
    bucket: Option<String>,

    /// S3 object key for the uploaded PDF (needs --bucket).
    #[arg(long, env = "HTML2PDF_S3_KEY", requires = "bucket")]
    key: Option<String>,

    /// S3 access key forwarded to the provider.
    #[arg(long, env = "AWS_ACCESS_KEY_ID", hide_env_values = true, default_value = "")]
    aws_access_key: String,

    /// S3 secret key forwarded to the provider.
    #[arg(long, env = "AWS_SECRET_ACCESS_KEY", hide_env_values = true, default_value = "")]
    aws_secret_key: String,

    /// S3 region forwarded to the provider.
    #[arg(long, env = "AWS_REGION")]
    aws_region: Option<String>,

    /// Provider API key.
    #[arg(long, env = "CLOUDCONVERT_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Provider API root.
    #[arg(long, env = "CLOUDCONVERT_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Disable the progress spinner.
    #[arg(long, env = "HTML2PDF_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "HTML2PDF_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "HTML2PDF_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The spinner provides the feedback; INFO logs would tear it apart.
    let show_progress = !cli.quiet && !cli.no_progress;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let config = build_config(&cli)?;

    let spinner = show_progress.then(|| {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}  {elapsed}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
        bar.set_prefix("Converting");
        bar.set_message(cli.source.clone());
        bar.enable_steady_tick(Duration::from_millis(80));
        bar
    });

    let start = Instant::now();

    // ── File output: atomic write through the library ────────────────────
    if let Some(ref path) = cli.output {
        let result = convert_to_file(&cli.source, path, &config).await;
        if let Some(ref bar) = spinner {
            bar.finish_and_clear();
        }
        let bytes = result.context("Conversion failed")?;
        if !cli.quiet {
            eprintln!(
                "{}  {} bytes  {}  →  {}",
                green("✔"),
                bytes,
                dim(&format!("{}ms", start.elapsed().as_millis())),
                bold(&path.display().to_string()),
            );
        }
        return Ok(());
    }

    // ── Stdout or S3 ─────────────────────────────────────────────────────
    let result = CloudConvert::from_config(&config)?
        .convert(&cli.source, config.destination.as_ref())
        .await;
    if let Some(ref bar) = spinner {
        bar.finish_and_clear();
    }
    let output = result.context("Conversion failed")?;

    match output {
        ConversionOutput::Uploaded { bucket, key } => {
            if !cli.quiet {
                eprintln!(
                    "{}  uploaded to {}  {}",
                    green("✔"),
                    bold(&format!("s3://{bucket}/{key}")),
                    dim(&format!("{}ms", start.elapsed().as_millis())),
                );
            }
        }
        ConversionOutput::Inline { pdf, .. } => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(&pdf)
                .context("Failed to write to stdout")?;
            handle.flush().context("Failed to flush stdout")?;
        }
    }

    Ok(())
}

/// Map CLI args to `ConversionConfig`.
fn build_config(cli: &Cli) -> Result<ConversionConfig> {
    let mut builder = ConversionConfig::builder()
        .api_key(&cli.api_key)
        .base_url(&cli.base_url);

    if let (Some(bucket), Some(key)) = (&cli.bucket, &cli.key) {
        let mut destination = S3Destination::new(bucket, key)
            .credentials(&cli.aws_access_key, &cli.aws_secret_key);
        if let Some(ref region) = cli.aws_region {
            destination = destination.region(region);
        }
        builder = builder.destination(destination);
    }

    builder.build().context("Invalid configuration")
}
