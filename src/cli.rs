//! Command-line interface

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::insertion::InsertionMode;

/// SEO assistant - keyword insertion, readability and sentiment
#[derive(Parser, Debug)]
#[command(name = "seo-assistant")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short, long, env = "SEO_ASSISTANT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, env = "SEO_ASSISTANT_PORT")]
    pub port: Option<u16>,

    /// Host to bind to
    #[arg(long, env = "SEO_ASSISTANT_HOST")]
    pub host: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        long,
        default_value = "info",
        env = "SEO_ASSISTANT_LOG_LEVEL",
        global = true
    )]
    pub log_level: String,

    /// Log format (text, json)
    #[arg(long, env = "SEO_ASSISTANT_LOG_FORMAT", global = true)]
    pub log_format: Option<String>,

    /// Subcommand (optional - defaults to server mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server (default)
    Serve,

    /// Insert a keyword into text and print the result
    Insert {
        /// Keyword to insert
        #[arg(short, long)]
        keyword: String,

        /// Text to insert into
        #[command(flatten)]
        input: TextInput,

        /// Insertion mode
        #[arg(short, long, value_enum)]
        mode: Option<ModeArg>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print keywords, readability and sentiment for text
    Analyze {
        /// Text to analyze
        #[command(flatten)]
        input: TextInput,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
}

/// Where the text comes from; stdin when neither is given
#[derive(clap::Args, Debug)]
#[group(multiple = false)]
pub struct TextInput {
    /// Text to process
    #[arg(short, long)]
    pub text: Option<String>,

    /// File containing the text
    #[arg(long)]
    pub file: Option<PathBuf>,
}

/// Output format for one-shot commands
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human readable
    Text,
    /// JSON document
    Json,
}

/// Insertion mode flag
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeArg {
    /// Local fuzzy engine
    Fuzzy,
    /// Generative model, degrading to the fuzzy engine
    Generative,
}

impl From<ModeArg> for InsertionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Fuzzy => Self::Fuzzy,
            ModeArg::Generative => Self::Generative,
        }
    }
}
