use clap::{ Parser, Subcommand };
use std::path::PathBuf;

pub mod commands;
pub mod ui;

#[derive(Parser)]
#[command(
    name = "mathsnap",
    about = "Photograph a math equation and get a step-by-step solution",
    version,
    author,
    long_about = None
)]
pub struct MathSnapCli {
    /// Sets the log level (error, warn, info, debug, trace)
    #[arg(short, long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(long, global = true, default_value = "text")]
    pub output_format: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Solve an equation from an image or typed text
    Solve {
        /// Image containing the equation
        #[arg(short, long, conflicts_with = "equation", required_unless_present = "equation")]
        image: Option<PathBuf>,

        /// Equation text, e.g. "2x + 3 = 7"
        #[arg(short, long)]
        equation: Option<String>,

        /// Do not save the solution to history
        #[arg(long, default_value = "false")]
        no_history: bool,
    },

    /// Extract the equation from an image without solving it
    Extract {
        /// Image containing the equation
        #[arg(short, long)]
        image: PathBuf,
    },

    /// Sample points of an equation for graphing
    Graph {
        /// Image containing the equation
        #[arg(short, long, conflicts_with = "equation", required_unless_present = "equation")]
        image: Option<PathBuf>,

        /// Equation text, e.g. "y = x^2 - 1"
        #[arg(short, long)]
        equation: Option<String>,

        /// Smallest x value
        #[arg(long, default_value = "-10", allow_hyphen_values = true)]
        min: i32,

        /// Largest x value
        #[arg(long, default_value = "10", allow_hyphen_values = true)]
        max: i32,
    },

    /// Show or clear previously solved equations
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List saved solutions, newest first
    List,

    /// Show one saved solution by its list number
    Show {
        index: usize,
    },

    /// Delete all saved solutions
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long, default_value = "false")]
        yes: bool,
    },
}

/// How results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Text,
        }
    }
}
