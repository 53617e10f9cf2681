//! Command-line argument definitions for the Maquette CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the subcommand to run, configuration
//! file, and logging verbosity.

use clap::{Parser, Subcommand};

/// Command-line arguments for the Maquette type-model tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

/// Maquette subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the type model from a JSON schema and write XML documents
    Generate {
        /// Path to the JSON type schema
        #[arg(help = "Path to the JSON type schema")]
        schema: String,

        /// Directory the XML documents are written to
        #[arg(short, long, default_value = "generated")]
        out: String,
    },

    /// Decode an XML document and re-encode it in canonical form
    Roundtrip {
        /// Path to the input XML document
        #[arg(help = "Path to the input XML document")]
        input: String,

        /// Path for the re-encoded document; printed to stdout when omitted
        #[arg(short, long)]
        out: Option<String>,
    },
}
