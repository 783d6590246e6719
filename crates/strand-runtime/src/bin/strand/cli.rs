//! CLI definitions for strand.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "strand",
    version,
    about = "Strand script compiler and interpreter",
    after_help = "Examples:\n  strand graph model.strand enum_comp\n  strand --enable-enums run model.strand enum_comp Color.RED Color.GREEN\n\nSet STRAND_EXPERIMENTAL_ENUM_SUPPORT=1 to enable enums without a flag."
)]
pub struct Cli {
    /// Compiler configuration file (TOML).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Module name used in qualified type names.
    #[arg(long, global = true)]
    pub module: Option<String>,
    /// Enable experimental enum support.
    #[arg(long, global = true)]
    pub enable_enums: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the compiled graph of a function or module method.
    Graph {
        /// Script source file.
        file: PathBuf,
        /// Function name, or `Module.method`.
        function: String,
    },
    /// Run a function and print its result.
    #[command(
        after_help = "Arguments are literals (1, 2.5, True, None, 'text', [1, 2]) or enum members (Color.RED)."
    )]
    Run {
        /// Script source file.
        file: PathBuf,
        /// Function name.
        function: String,
        /// Call arguments.
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// List the enums, functions and modules declared in a script.
    Items {
        /// Script source file.
        file: PathBuf,
    },
}
