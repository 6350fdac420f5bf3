//! Command-line interface definitions for enumgen.

use clap::Parser;

/// enumgen - generate typed Rust enums from a JSON enum table
///
/// Reads `enumgen.toml` from the current directory or its ancestors (or uses
/// `enums.json` → `enums.rs` in the current directory) and regenerates the
/// output file.
#[derive(Parser, Debug)]
#[command(name = "enumgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {}
