//! `lectio` command line.
//!
//! Every invocation runs the full load phase (as configured) before answering
//! a single command. Results are printed to stdout as JSON; logs go to stderr
//! and are filtered with `RUST_LOG` (default `info`).

mod cli;

use crate::cli::{Cli, Command};
use clap::Parser;
use lectio_cache::TranslationCache;
use lectio_config::Config;
use lectio_library::Library;
use miette::{IntoDiagnostic, Result, miette};
use serde::Serialize;
use std::io::Write;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// `exn` trees render through their `Debug` output, which includes every
/// layer and its location.
fn report<E>(err: exn::Exn<E>) -> miette::Report
where
    E: std::error::Error + Send + Sync + 'static,
{
    miette!("{err:?}")
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_json(value: &impl Serialize) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value).into_diagnostic()?;
    writeln!(stdout).into_diagnostic()
}

async fn load(config: &Config) -> Result<Library> {
    let source = config.source.build().map_err(report)?;
    tracing::info!(source = config.source.kind(), concurrency = config.concurrency, "loading translations");
    let (cache, load_report) = TranslationCache::populate(source.as_ref(), config.concurrency)
        .await
        .map_err(report)?;
    if !load_report.is_complete() {
        tracing::warn!(
            failed = ?load_report.failed_identifiers().collect::<Vec<_>>(),
            "some translations are unavailable"
        );
    }
    Ok(Library::new(Arc::new(cache)))
}

async fn run(library: Library, command: Command) -> Result<()> {
    match command {
        Command::List { ids: true } => print_json(&library.list_identifiers()),
        Command::List { ids: false } => print_json(&library.list_translations()),
        Command::Show {
            identifier,
            book: None,
            ..
        } => print_json(&*library.get_translation(&identifier).map_err(report)?),
        Command::Show {
            identifier,
            book: Some(book),
            chapter: None,
        } => print_json(&library.get_book(&identifier, &book).map_err(report)?),
        Command::Show {
            identifier,
            book: Some(book),
            chapter: Some(chapter),
        } => print_json(&library.get_chapter(&identifier, &book, &chapter).map_err(report)?),
        Command::Search { identifier, query } => {
            print_json(&library.search(&identifier, Some(&query)).map_err(report)?)
        },
        Command::Export { identifier, output } => {
            let archive = library.export_archive(&identifier).map_err(report)?;
            let path = output.join(&archive.file_name);
            tokio::fs::write(&path, &archive.bytes).await.into_diagnostic()?;
            tracing::info!(path = %path.display(), bytes = archive.bytes.len(), "wrote archive");
            print_json(&path)
        },
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();
    let config = Config::load(cli.config.as_deref()).map_err(report)?;
    let library = load(&config).await?;
    run(library, cli.command).await
}
