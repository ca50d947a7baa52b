//! Syntax tree, comments and input loading for **prettypy**, a canonical pretty-printer for Python source.
//!
//! The tree and the comment list are produced by an external parser and handed
//! over as a JSON [`document::Document`]. Everything in this crate is read-only
//! data; the formatting pass itself lives in `prettypy-fmt`.

pub mod ast;
pub mod comment;
pub mod document;
pub mod utils;

pub use log;
