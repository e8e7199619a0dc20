//! Command-line argument definitions for the Fazor CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, the export format,
//! configuration file selection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Fazor phasor diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input diagram description (JSON)
    #[arg(help = "Path to the input JSON file")]
    pub input: String,

    /// Path to the output file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Export format (svg, png, jpeg); inferred from the output
    /// extension when omitted
    #[arg(short, long)]
    pub format: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
