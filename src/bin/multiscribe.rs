//! CLI binary for multiscribe.
//!
//! A thin shim over the library crate that maps subcommands and flags to the
//! library configs and prints results.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use multiscribe::{
    envfile::load_env_file,
    extract::{extract_document, parse_extractor_names},
    reinterpret::{page_dirs, reinterpret_dir},
    timing::time_async,
    transcribe::transcribe,
    ExtractionConfig, GeminiClient, OutputLayout, ReinterpretConfig, TranscribeConfig,
    TranscribeService,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;
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
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Run every extraction strategy, one flat text file each
  multiscribe extract document.pdf

  # One strategy, nested per-page output with rendered page images
  multiscribe extract document.pdf --extractors lopdf \
      --layout nested --render --output-dir out

  # Reinterpret the extracted pages with Gemini vision
  multiscribe reinterpret out/document

  # Reinterpret a single page directory
  multiscribe reinterpret out/document/0 --model gemini-1.5-flash-latest

  # Transcribe audio (Gemini by default)
  multiscribe transcribe interview.mp3 --language ja

  # Transcribe through the OpenAI whisper endpoint
  multiscribe transcribe interview.mp3 --service whisper

  # List Gemini models that support content generation
  multiscribe models

ENVIRONMENT VARIABLES:
  GOOGLE_API_KEY          Gemini API key (reinterpret, transcribe, models)
  OPENAI_API_KEY          OpenAI API key (transcribe --service whisper)
  MULTISCRIBE_ENV_FILE    Env file to load instead of ./.env
  RUST_LOG                Overrides the log filter (e.g. multiscribe=debug)

SETUP:
  1. Put keys in ./.env:   GOOGLE_API_KEY=...
  2. Extract:              multiscribe extract document.pdf --layout nested --render
  3. Reinterpret:          multiscribe reinterpret ./document

  Page rendering needs a pdfium shared library; set PDFIUM_DYNAMIC_LIB_PATH
  if it is not on the default search path.
"#;

/// Extract PDF content and reinterpret or transcribe it with generative AI.
#[derive(Parser, Debug)]
#[command(
    name = "multiscribe",
    version,
    about = "Extract PDF text/images and reinterpret or transcribe content with generative AI",
    long_about = "Extract per-page text from PDF documents through interchangeable backends, \
rasterise pages to images, reinterpret pages with the Gemini vision API, and transcribe \
audio through Gemini or the OpenAI whisper endpoint.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Load environment variables from this file (default: probe ./.env).
    #[arg(long, global = true, env = "MULTISCRIBE_ENV_FILE")]
    env_file: Option<PathBuf>,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "MULTISCRIBE_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors and results.
    #[arg(short, long, global = true, env = "MULTISCRIBE_QUIET")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract per-page text (and optionally page images) from a PDF.
    Extract {
        /// Path to the PDF file.
        file: PathBuf,

        /// Comma-separated strategy names, or "all" (pdf-extract, lopdf).
        #[arg(long, env = "MULTISCRIBE_EXTRACTORS", default_value = "all")]
        extractors: String,

        /// Directory to save the extracted files.
        #[arg(long, env = "MULTISCRIBE_OUTPUT_DIR", default_value = ".")]
        output_dir: PathBuf,

        /// Output naming scheme: flat or nested.
        #[arg(long, value_enum, env = "MULTISCRIBE_LAYOUT", default_value = "flat")]
        layout: LayoutArg,

        /// Also rasterise each page to a PNG section (nested layout only).
        #[arg(long)]
        render: bool,

        /// Maximum rendered image dimension in pixels.
        #[arg(long, default_value_t = 2000)]
        max_pixels: u32,
    },

    /// Reinterpret extracted pages with the Gemini vision API.
    Reinterpret {
        /// A nested extraction root (e.g. out/document) or one page directory.
        dir: PathBuf,

        /// Gemini model ID.
        #[arg(long, env = "MULTISCRIBE_MODEL", default_value = "gemini-1.5-pro-latest")]
        model: String,

        /// Path to a text file containing a custom reinterpretation prompt.
        #[arg(long)]
        prompt: Option<PathBuf>,

        /// Per-API-call timeout in seconds.
        #[arg(long, default_value_t = 120)]
        api_timeout: u64,
    },

    /// Transcribe an audio file.
    Transcribe {
        /// Path to the audio file (mp3, wav, m4a, aac, flac, ogg).
        audio: PathBuf,

        /// Transcription service.
        #[arg(long, value_enum, default_value = "gemini")]
        service: ServiceArg,

        /// Model ID (default: gemini-1.5-pro-latest / whisper-1).
        #[arg(long, env = "MULTISCRIBE_MODEL")]
        model: Option<String>,

        /// Spoken-language hint, ISO-639-1 (e.g. "ja").
        #[arg(long)]
        language: Option<String>,

        /// Per-API-call timeout in seconds.
        #[arg(long, default_value_t = 300)]
        api_timeout: u64,
    },

    /// List Gemini models that support content generation.
    Models,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum LayoutArg {
    Flat,
    Nested,
}

impl From<LayoutArg> for OutputLayout {
    fn from(v: LayoutArg) -> Self {
        match v {
            LayoutArg::Flat => OutputLayout::Flat,
            LayoutArg::Nested => OutputLayout::Nested,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum ServiceArg {
    Gemini,
    Whisper,
}

impl From<ServiceArg> for TranscribeService {
    fn from(v: ServiceArg) -> Self {
        match v {
            ServiceArg::Gemini => TranscribeService::Gemini,
            ServiceArg::Whisper => TranscribeService::Whisper,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // Keys may live in an env file next to the project, as the APIs expect.
    load_env_file(cli.env_file.as_deref()).context("Failed to load env file")?;

    match cli.command {
        Command::Extract {
            file,
            extractors,
            output_dir,
            layout,
            render,
            max_pixels,
        } => cmd_extract(&file, &extractors, output_dir, layout, render, max_pixels, cli.quiet).await,
        Command::Reinterpret {
            dir,
            model,
            prompt,
            api_timeout,
        } => cmd_reinterpret(&dir, model, prompt, api_timeout, cli.quiet).await,
        Command::Transcribe {
            audio,
            service,
            model,
            language,
            api_timeout,
        } => cmd_transcribe(&audio, service, model, language, api_timeout, cli.quiet).await,
        Command::Models => cmd_models().await,
    }
}

// ── extract ──────────────────────────────────────────────────────────────────

async fn cmd_extract(
    file: &PathBuf,
    extractors: &str,
    output_dir: PathBuf,
    layout: LayoutArg,
    render: bool,
    max_pixels: u32,
    quiet: bool,
) -> Result<()> {
    let (kinds, unknown) = parse_extractor_names(extractors);
    for name in &unknown {
        println!("Unknown extractor: {name}");
    }
    if kinds.is_empty() && !render {
        // Nothing to run is not a failure — the message above is the output.
        return Ok(());
    }

    let config = ExtractionConfig::builder()
        .extractors(kinds)
        .output_dir(output_dir)
        .layout(layout.into())
        .render_pages(render)
        .max_rendered_pixels(max_pixels)
        .build()
        .context("Invalid configuration")?;

    let extraction = extract_document(file, &config)
        .await
        .context("Extraction failed")?;

    for result in &extraction.results {
        println!("Extractor: {}", result.backend);
        println!("Extracted Text: {}...", result.preview(100));
        println!("Execution Time: {:.2} seconds", result.elapsed_secs());
        println!("---");
    }

    if !quiet {
        eprintln!(
            "{} {} file(s) written for '{}'",
            green("✔"),
            bold(&extraction.written.len().to_string()),
            extraction.basename,
        );
    }
    Ok(())
}

// ── reinterpret ──────────────────────────────────────────────────────────────

async fn cmd_reinterpret(
    dir: &PathBuf,
    model: String,
    prompt: Option<PathBuf>,
    api_timeout: u64,
    quiet: bool,
) -> Result<()> {
    let prompt = match prompt {
        Some(path) => Some(
            tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read prompt from {:?}", path))?,
        ),
        None => None,
    };

    let config = ReinterpretConfig {
        model,
        prompt,
        api_timeout_secs: api_timeout,
    };
    let client = GeminiClient::from_env(config.api_timeout_secs)
        .context("Gemini client unavailable")?;

    let start = Instant::now();
    let pages = page_dirs(dir).unwrap_or_default();

    let written = if pages.is_empty() {
        // No numeric subdirectories: treat the path as one page directory.
        reinterpret_dir(&client, dir, &config)
            .await
            .context("Reinterpretation failed")?
    } else {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            let bar = ProgressBar::new(pages.len() as u64);
            bar.set_style(
                ProgressStyle::with_template(
                    "{spinner:.cyan} {prefix:.bold}  \
                     [{bar:42.green/238}] {pos:>3}/{len} pages  ⏱ {elapsed_precise}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▉▊▋▌▍▎▏  "),
            );
            bar.set_prefix("Reinterpreting");
            bar
        };

        let mut written = Vec::new();
        for (page, page_dir) in pages {
            match reinterpret_dir(&client, &page_dir, &config).await {
                Ok(paths) => {
                    bar.println(format!(
                        "  {} Page {:>3}  {}",
                        green("✓"),
                        page,
                        dim(&format!("{} file(s)", paths.len())),
                    ));
                    written.extend(paths);
                }
                Err(e) => {
                    bar.finish_and_clear();
                    return Err(e).context(format!("Reinterpretation failed on page {page}"));
                }
            }
            bar.inc(1);
        }
        bar.finish_and_clear();
        written
    };

    if !quiet {
        eprintln!(
            "{} {} Markdown file(s) written",
            green("✔"),
            bold(&written.len().to_string()),
        );
    }
    println!("Execution time: {:.2} seconds", start.elapsed().as_secs_f64());
    Ok(())
}

// ── transcribe ───────────────────────────────────────────────────────────────

async fn cmd_transcribe(
    audio: &PathBuf,
    service: ServiceArg,
    model: Option<String>,
    language: Option<String>,
    api_timeout: u64,
    quiet: bool,
) -> Result<()> {
    let config = TranscribeConfig {
        service: service.into(),
        model,
        language,
        api_timeout_secs: api_timeout,
    };

    let timed = transcribe(audio, &config).await.context("Transcription failed")?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(timed.value.text.as_bytes())
        .context("Failed to write to stdout")?;
    if !timed.value.text.ends_with('\n') {
        handle.write_all(b"\n").ok();
    }

    if !quiet {
        eprintln!(
            "{} {}  {}",
            green("✔"),
            dim(&format!("model {}", timed.value.model)),
            dim(&format!("{:.2} seconds", timed.elapsed_secs())),
        );
    }
    Ok(())
}

// ── models ───────────────────────────────────────────────────────────────────

async fn cmd_models() -> Result<()> {
    let client = GeminiClient::from_env(60).context("Gemini client unavailable")?;
    let timed = time_async(client.list_models()).await;
    let elapsed = timed.elapsed;
    let models = timed.value.context("Model listing failed")?;

    let mut generative: Vec<_> = models.iter().filter(|m| m.supports_generation()).collect();
    generative.sort_by(|a, b| a.name.cmp(&b.name));

    if generative.is_empty() {
        eprintln!("{} no generation-capable models reported", red("✘"));
    }
    for model in &generative {
        println!("{}", model.name);
    }
    eprintln!(
        "{} {} model(s)  {}",
        cyan("◆"),
        bold(&generative.len().to_string()),
        dim(&format!("{:.2} seconds", elapsed.as_secs_f64())),
    );
    Ok(())
}
