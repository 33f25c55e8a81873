//! Command-line batch extraction.
//!
//! Builds one batch from the given files (directories are walked recursively), runs it through
//! the same pipeline as the HTTP server, and prints the result mapping as JSON on stdout.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use unredactor::{
    config::{ExtractionConfig, parse_formats},
    extraction::{Document, ExtractionService},
    logging,
};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(
    name = "unredactor-cli",
    about = "Extract bounded text previews from a batch of documents"
)]
struct Cli {
    /// Files or directories to include in the batch.
    paths: Vec<PathBuf>,
    /// Maximum characters kept per snippet.
    #[arg(long)]
    snippet_chars: Option<usize>,
    /// Worker pool size.
    #[arg(long)]
    workers: Option<usize>,
    /// Comma-separated formats to extract (pdf,docx,txt,csv,xlsx).
    #[arg(long)]
    formats: Option<String>,
    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
    /// Log per-document progress to stderr.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_cli_tracing(cli.verbose);

    let mut extraction =
        ExtractionConfig::load().context("Failed to load config from environment")?;
    if let Some(chars) = cli.snippet_chars {
        if chars == 0 {
            bail!("--snippet-chars must be greater than zero");
        }
        extraction.snippet_chars = chars;
    }
    if let Some(workers) = cli.workers {
        extraction.max_workers = workers.max(1);
    }
    if let Some(formats) = cli.formats.as_deref() {
        extraction.allowed_formats = parse_formats(formats).context("Invalid --formats")?;
    }

    let documents = collect_documents(&cli.paths)?;
    let service = ExtractionService::new(extraction);
    let results = service.extract_batch(documents).await?;

    let output = if cli.pretty {
        serde_json::to_string_pretty(&results)?
    } else {
        serde_json::to_string(&results)?
    };
    println!("{output}");
    Ok(())
}

fn collect_documents(paths: &[PathBuf]) -> Result<Vec<Document>> {
    let mut documents = Vec::new();
    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path).sort_by_file_name() {
                let entry =
                    entry.with_context(|| format!("Failed to walk {}", path.display()))?;
                if entry.file_type().is_file() {
                    documents.push(document_for(entry.path()));
                }
            }
        } else {
            documents.push(document_for(path));
        }
    }
    Ok(documents)
}

fn document_for(path: &Path) -> Document {
    let id = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    Document::from_path(id, path)
}
