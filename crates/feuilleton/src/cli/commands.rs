//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};
use feuilleton_core::PromptKind;
use std::path::PathBuf;

/// Feuilleton - serialized web-novel generation with self-review
#[derive(Parser, Debug)]
#[command(name = "feuilleton")]
#[command(about = "Serialized web-novel generation with self-review", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file replacing the layered lookup
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a novel project
    Create {
        /// Project title
        #[arg(long)]
        title: String,

        /// Genre label
        #[arg(long)]
        genre: Option<String>,

        /// World-setting as a JSON object
        #[arg(long)]
        world: Option<String>,

        /// Rules as a JSON object
        #[arg(long)]
        rules: Option<String>,

        /// Opening summary
        #[arg(long)]
        summary: Option<String>,
    },

    /// Show a project's story bible
    Show {
        /// Project ID
        id: i32,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Search projects
    Search {
        /// Title substring
        #[arg(long)]
        title: Option<String>,

        /// Genre substring
        #[arg(long)]
        genre: Option<String>,

        /// Keyword matched against title, summary and world-setting
        #[arg(long)]
        keyword: Option<String>,

        /// Maximum number of projects to display
        #[arg(long, default_value = "20")]
        limit: usize,

        /// Number of projects to skip
        #[arg(long, default_value = "0")]
        offset: usize,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Prompt template management
    #[command(subcommand)]
    Prompts(PromptCommands),

    /// Generate the next chapter and wait for the result
    Generate {
        /// Project ID
        id: i32,

        /// Write/review cycles before giving up (overrides configuration)
        #[arg(long)]
        max_attempts: Option<u32>,

        /// Acceptance threshold (overrides configuration)
        #[arg(long)]
        min_score: Option<i32>,

        /// Previous chapters given to the writer (overrides configuration)
        #[arg(long)]
        context_window: Option<usize>,
    },

    /// List accepted chapters
    Chapters {
        /// Project ID
        id: i32,

        /// Print chapter bodies
        #[arg(long)]
        full: bool,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Show the attempt log, most recent first
    History {
        /// Project ID
        id: i32,

        /// Maximum number of entries to display
        #[arg(long, default_value = "20")]
        limit: usize,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },
}

/// Prompt template subcommands
#[derive(Subcommand, Debug)]
pub enum PromptCommands {
    /// Print a project's templates
    Show {
        /// Project ID
        id: i32,

        /// Only this stage
        #[arg(long)]
        kind: Option<PromptKind>,
    },

    /// Replace one template
    Update {
        /// Project ID
        id: i32,

        /// Stage to replace
        #[arg(long)]
        kind: PromptKind,

        /// New template text
        #[arg(long, conflicts_with = "file", required_unless_present = "file")]
        text: Option<String>,

        /// Read the new template from a file
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

/// Output format for listings
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Human,
    /// JSON
    Json,
}
