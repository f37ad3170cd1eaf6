//! CLI argument definitions for depot.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "depot",
    version,
    about = "Maven dependency graph resolution",
    long_about = "depot builds the dependency graph of Maven artifacts from a local repository, \
                  mediates version conflicts nearest-first, and filters the result by scope."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve the dependency graph of one or more artifacts
    Resolve {
        /// Root coordinates: group:artifact[:type[:classifier]]:version
        #[arg(required = true)]
        coordinates: Vec<String>,
        /// Resolution scope: compile, runtime, test, provided, system
        #[arg(short, long)]
        scope: Option<String>,
        /// Local repository root (defaults to the configured one)
        #[arg(long, env = "DEPOT_REPOSITORY")]
        repo: Option<PathBuf>,
        /// Configuration file to use instead of the discovered depot.toml
        #[arg(long)]
        config: Option<PathBuf>,
        /// Keep optional dependencies of dependencies
        #[arg(long)]
        include_optional: bool,
        /// Maximum tree depth to display
        #[arg(short, long)]
        depth: Option<usize>,
        /// Print the resolved graph as JSON
        #[arg(long)]
        json: bool,
        /// Show version conflicts
        #[arg(long)]
        conflicts: bool,
        /// Show disabled edges with the reason they were dropped
        #[arg(long)]
        disabled: bool,
        /// Show the path from the root to a dependency
        #[arg(long)]
        why: Option<String>,
    },

    /// Compare two version strings
    Compare {
        left: String,
        right: String,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}
