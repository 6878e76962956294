//! CLI parse: clap types for autoblog. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// autoblog CLI - article generation with quality gating and template fallback
#[derive(Parser)]
#[command(name = "autoblog")]
#[command(about = "Generate blog articles from a topic request using a local text backend")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate an article for the selected topic and write it to the articles directory
    Generate {
        /// Topic request file (default: output.topic_file from config)
        #[arg(long)]
        topic: Option<PathBuf>,
        /// Model to request (overrides backend.model)
        #[arg(long)]
        model: Option<String>,
        /// Backend base URL (overrides backend.base_url)
        #[arg(long)]
        base_url: Option<String>,
        /// Attempt ceiling (overrides generation.max_attempts)
        #[arg(long)]
        max_attempts: Option<u32>,
        /// Delay between attempts in milliseconds (overrides generation.backoff_ms)
        #[arg(long)]
        backoff_ms: Option<u64>,
        /// Quality profile: lenient, standard, strict
        #[arg(long)]
        profile: Option<String>,
        /// Fail instead of falling back to the template when the backend is unreachable
        #[arg(long)]
        require_backend: bool,
        /// Skip generation when an article with a similar name already exists
        #[arg(long)]
        skip_similar: bool,
        /// Delete the topic file after the article is written
        #[arg(long)]
        consume_topic: bool,
        /// Print the article body instead of writing a file
        #[arg(long)]
        dry_run: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Run the quality gate over an existing article file
    Validate {
        /// Article file (frontmatter is ignored)
        file: PathBuf,
        /// Quality profile: lenient, standard, strict
        #[arg(long)]
        profile: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the template fallback article for a topic
    Template {
        /// Topic request file (default: output.topic_file from config)
        #[arg(long)]
        topic: Option<PathBuf>,
    },
    /// Probe the backend and list its models
    Status {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Write a default config/config.toml into the workspace
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
        /// Print the default configuration without writing it
        #[arg(long)]
        print: bool,
    },
}
