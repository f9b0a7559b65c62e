//! Command-line argument definitions for the ArchiMate CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Global options select the configuration file and logging
//! verbosity; each subcommand works on one `.archimate` document.

use clap::{Parser, Subcommand};

use archimate::layout::LayoutAlgorithm;

/// Command-line arguments for the ArchiMate model tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print folder, relationship and view statistics of a model
    Inspect {
        /// Path to the input .archimate file
        input: String,
    },

    /// Read a model and write it back out in canonical form
    Roundtrip {
        /// Path to the input .archimate file
        input: String,

        /// Path to the output .archimate file
        #[arg(short, long, default_value = "out.archimate")]
        output: String,
    },

    /// Add a view drawing the given elements, laid out automatically
    GenerateView {
        /// Path to the input .archimate file
        input: String,

        /// Name of the new view
        #[arg(short, long)]
        name: String,

        /// Id of an element to draw; repeat for several elements
        #[arg(short, long = "element", required = true)]
        elements: Vec<String>,

        /// Layout algorithm (grid, circular, hierarchical); defaults to the
        /// configured one
        #[arg(short, long)]
        layout: Option<LayoutAlgorithm>,

        /// Do not draw relationships between the elements
        #[arg(long)]
        no_relationships: bool,

        /// Path to the output file; defaults to overwriting the input
        #[arg(short, long)]
        output: Option<String>,
    },
}
