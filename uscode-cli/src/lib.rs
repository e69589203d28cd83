//! `uscode-cli`: command-line front end over `uscode-pipeline::Engine`.

pub mod commands;
pub mod config;

use clap::{Parser, Subcommand};

/// US Code chronological reconstruction engine.
#[derive(Parser)]
#[command(name = "uscode")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Path to config file (defaults to uscode.toml or ~/.config/uscode/config.toml)
    #[arg(long)]
    pub config: Option<String>,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Table,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Create a fresh, empty bootstrap revision and write the initial state file.
    Init {
        /// Titles to track (comma-separated, e.g. "1,2,26,42"); defaults to
        /// the `titles` list in config when omitted.
        #[arg(long, value_delimiter = ',')]
        titles: Option<Vec<u32>>,

        /// Bootstrap effective date, YYYY-MM-DD
        #[arg(long)]
        bootstrap_date: String,
    },

    /// Drive the play-forward engine across the merged timeline.
    Advance {
        /// Number of timeline events to process
        #[arg(long, conflicts_with = "until_tag")]
        count: Option<usize>,

        /// Release-point tag to advance through (inclusive), e.g. "113-22"
        #[arg(long)]
        until_tag: Option<String>,
    },

    /// Re-run the checkpoint comparison for an already-ingested ground-truth tag.
    Validate {
        /// Release-point tag, e.g. "113-22"
        #[arg(long)]
        tag: String,
    },

    /// Print one section's resolved content.
    Section {
        #[arg(long)]
        title: u32,

        #[arg(long)]
        section: String,

        /// Resolve against this revision's sequence number instead of head
        #[arg(long)]
        at_revision: Option<u64>,
    },

    /// Print every snapshot ever written for one section, newest first.
    History {
        #[arg(long)]
        title: u32,

        #[arg(long)]
        section: String,
    },

    /// Pairwise section diff between two revisions, by sequence number.
    Diff {
        #[arg(long)]
        old: u64,

        #[arg(long)]
        new: u64,
    },

    /// Print the merged release-point/enacted-law event stream.
    Timeline {
        #[arg(long)]
        from_congress: Option<u32>,

        #[arg(long)]
        to_congress: Option<u32>,
    },
}
