//! Command-line argument parsing for mdd-screener
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// mdd-screener - DSM-5 depression screening over NLP and narrative services
#[derive(Parser, Debug)]
#[command(name = "mdd-screener")]
#[command(author = "Jerome (Kubashen) Naidoo")]
#[command(version)]
#[command(about = "Screen free-text symptom narratives against DSM-5 Major Depressive Disorder criteria", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (warnings and errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API
    Serve {
        /// Override the listen port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Run one assessment and print the report
    Analyze {
        /// Narrative text (reads --file when omitted)
        #[arg(value_name = "TEXT")]
        text: Option<String>,

        /// Read the narrative from a file
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Probe both collaborator services
    Health {
        /// Print the health report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the criteria table, severity bands and exclusions
    Criteria,

    /// Display current configuration
    Config,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }
}

impl Verbosity {
    /// Default tracing directive for this level; `configured` applies at normal verbosity
    pub fn log_directive(&self, configured: &str) -> String {
        let level = match self {
            Verbosity::Quiet => "warn",
            Verbosity::Normal => configured,
            Verbosity::Verbose => "debug",
            Verbosity::VeryVerbose => "trace",
        };
        format!("mdd_screener={}", level)
    }

    /// Log filter for this level
    ///
    /// At normal verbosity a non-empty `RUST_LOG` value wins over the configured level;
    /// `-q`, `-v` and `-vv` always apply their own directive.
    pub fn env_filter(&self, configured: &str, rust_log: Option<&str>) -> EnvFilter {
        let directive = self.log_directive(configured);
        match (self, rust_log.map(str::trim)) {
            (Verbosity::Normal, Some(env)) if !env.is_empty() => {
                EnvFilter::try_new(env).unwrap_or_else(|_| EnvFilter::new(directive))
            }
            _ => EnvFilter::new(directive),
        }
    }

    /// Check if should show progress spinners
    pub fn show_progress(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }
}
