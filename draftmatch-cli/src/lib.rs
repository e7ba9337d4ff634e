//! draftmatch CLI library
//!
//! This library provides the `compare` command: PDF text extraction, color
//! lookup in the source PDFs and report writing around `draftmatch-core`.

pub mod commands;
pub mod config;
pub mod error;
pub mod extract;
pub mod pdf_colors;
pub mod progress;

pub use error::{CliError, CliResult};
