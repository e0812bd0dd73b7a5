use crate::types::{LogLevel, OutputFormat};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "recview")]
#[command(about = "Browse recorded program executions", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: $RECVIEW_CONFIG, then the user config directory)
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Print the call tree of a recording bundle")]
    Tree {
        bundle: PathBuf,

        /// Expand this many levels below the root (default: everything)
        #[arg(long)]
        depth: Option<usize>,

        #[arg(long)]
        full_type_names: bool,
    },

    #[command(about = "Show the source code behind one recorded call")]
    Source {
        bundle: PathBuf,

        /// Call record id, as printed by `tree`
        call: u64,
    },

    #[command(about = "Print the call tree font style sheet")]
    Styles {
        #[arg(long)]
        font_size: Option<f64>,

        #[arg(long)]
        font_name: Option<String>,
    },

    #[command(about = "Browse a recording bundle interactively")]
    View { bundle: PathBuf },
}
