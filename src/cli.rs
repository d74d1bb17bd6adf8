use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Browse, search and export scripture translations.
#[derive(Debug, Parser)]
#[command(name = "lectio", version, about)]
pub struct Cli {
    /// Config file (TOML, YAML or JSON); defaults to `lectio.toml` in the
    /// platform config directory.
    #[arg(short, long, global = true, env = "LECTIO_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List loaded translations.
    List {
        /// Print identifiers only.
        #[arg(long)]
        ids: bool,
    },
    /// Print a translation, one of its books, or a single chapter as JSON.
    Show {
        identifier: String,
        book: Option<String>,
        chapter: Option<String>,
    },
    /// Find verses containing a (case-sensitive) substring.
    Search { identifier: String, query: String },
    /// Write `{identifier}.zip` holding the translation as JSON.
    Export {
        identifier: String,
        /// Directory to write the archive into.
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },
}
