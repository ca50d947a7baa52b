//! Canonical pretty-printer for Python syntax trees.
//!
//! [`pretty_print`] takes a [`Document`] produced by an external parser and
//! renders it in one fixed style: four-space blocks, single-spaced binary
//! operators, minimal parentheses, and a fixed number of blank lines between
//! top-level statements depending on their kinds. Comments are re-inserted
//! above the statement they precede.

pub mod buffer;
pub mod error;
pub mod layout;
pub mod print;
pub mod program;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use prettypy_lang::document::{Document, LoadError};
use thiserror::Error;

pub use error::FormatError;
pub use program::pretty;

/// What to do with comments that come after the last statement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TrailingComments {
    /// Append them at the end of the output.
    #[default]
    Flush,
    Drop,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub indent_size: usize,
    pub trailing_comments: TrailingComments,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            indent_size: 4,
            trailing_comments: TrailingComments::default(),
        }
    }
}

pub fn pretty_print(doc: &Document, config: &Config) -> Result<String, FormatError> {
    pretty(&doc.module, &doc.comments, config)
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Syntax tree document to format (if not specified, reads from stdin)
    #[clap(value_parser)]
    pub file: Option<PathBuf>,
    /// Indentation size
    #[arg(
        long,
        default_value = "4",
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..)
    )]
    pub indent_size: usize,
    /// Discard comments that come after the last statement
    #[arg(long)]
    pub drop_trailing_comments: bool,
    /// Write the result to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl Args {
    pub fn config(&self) -> Config {
        Config {
            indent_size: self.indent_size,
            trailing_comments: if self.drop_trailing_comments {
                TrailingComments::Drop
            } else {
                TrailingComments::Flush
            },
        }
    }
}

pub fn run(args: &Args) -> Result<(), Error> {
    let path = args.file.as_ref().map(|p| p.to_string_lossy());
    if path.is_none() {
        log::info!("No file specified. Reading from stdin...");
    }
    let doc = Document::load(path.as_deref())?;
    let rendered = pretty_print(&doc, &args.config())?;
    match &args.output {
        Some(out) => std::fs::write(out, rendered).map_err(|source| Error::Write {
            path: out.clone(),
            source,
        })?,
        None => print!("{rendered}"),
    }
    Ok(())
}

pub fn lib_main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
