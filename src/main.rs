//! Headless entrypoint for wrapping and searching plain-text documents.

use anyhow::Context;
use clap::{Parser, Subcommand};
use gapedit::{EditorConfig, GapBuffer, MonospaceMeasure, SearchEngine};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "gapedit", about = "Gap-buffer text engine", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a file word-wrapped the way the editor lays it out
    Wrap {
        file: PathBuf,
        /// Wrap width in pixels (defaults to GAPEDIT_WRAP_WIDTH)
        #[arg(short, long)]
        width: Option<f32>,
        /// Font size used for measurement (defaults to GAPEDIT_FONT_SIZE)
        #[arg(short, long)]
        font_size: Option<f32>,
    },
    /// Print the char offset of every case-insensitive match
    Find { file: PathBuf, query: String },
}

fn load_buffer(path: &Path, config: &EditorConfig) -> anyhow::Result<GapBuffer> {
    let mut buffer = GapBuffer::with_capacity(config.initial_capacity);
    gapedit::files::load_file(&mut buffer, path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    Ok(buffer)
}

fn wrap_document(text: &str, config: &EditorConfig) -> String {
    let measure = MonospaceMeasure::new(config.char_advance_ratio);
    gapedit::wrap(text, 0, config.wrap_width, &measure, config.font_size).content
}

fn find_offsets(text: &str, query: &str) -> Vec<usize> {
    let mut search = SearchEngine::default();
    search.set_query(query);
    search.recompute(text);
    search.matches().to_vec()
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gapedit=info,gapedit_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config = EditorConfig::from_env();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Commands::Wrap {
            file,
            width,
            font_size,
        } => {
            if let Some(width) = width {
                config.wrap_width = width;
            }
            if let Some(font_size) = font_size {
                config.font_size = font_size;
            }
            config.validate()?;
            let buffer = load_buffer(&file, &config)?;
            writeln!(out, "{}", wrap_document(&buffer.to_string(), &config))?;
        }
        Commands::Find { file, query } => {
            config.validate()?;
            let buffer = load_buffer(&file, &config)?;
            let offsets = find_offsets(&buffer.to_string(), &query);
            if offsets.is_empty() {
                tracing::info!("No matches for {:?}", query);
            }
            for offset in offsets {
                writeln!(out, "{}", offset)?;
            }
        }
    }
    Ok(())
}
