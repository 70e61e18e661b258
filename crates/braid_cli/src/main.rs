//! Braid CLI — the command-line interface for the braid asset pipeline.
//!
//! Provides `braid init` for project scaffolding, `braid build` for compiling
//! asset bundles through the version cache, `braid status` for freshness
//! reporting, and `braid clean` for removing built artifacts.

#![warn(missing_docs)]

mod build;
mod clean;
mod init;
mod pipeline;
mod status;

use std::process;

use clap::{Parser, Subcommand};

/// Braid — an asset bundler with a build-version cache.
#[derive(Parser, Debug)]
#[command(name = "braid", version, about = "Braid Asset Bundler")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a custom `braid.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new braid project.
    Init {
        /// Project name (creates a subdirectory). If omitted, initializes in
        /// the current directory.
        name: Option<String>,
    },
    /// Compile stale bundles and stamp fresh versions.
    Build(BuildArgs),
    /// Report per-bundle freshness without building anything.
    Status(StatusArgs),
    /// Remove built artifacts and drop their version entries.
    Clean(CleanArgs),
}

/// Arguments for the `braid build` subcommand.
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Bundle name to build (e.g., `libs.js`). If omitted, builds every
    /// bundle in `braid.toml`.
    pub bundle: Option<String>,

    /// Rebuild even when the cached artifact is still fresh.
    #[arg(short, long)]
    pub force: bool,
}

/// Arguments for the `braid status` subcommand.
#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Bundle name to report on. If omitted, reports on every bundle.
    pub bundle: Option<String>,
}

/// Arguments for the `braid clean` subcommand.
#[derive(Parser, Debug)]
pub struct CleanArgs {
    /// Bundle name to clean. If omitted, cleans every bundle.
    pub bundle: Option<String>,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Init { name } => init::run(name),
        Command::Build(ref args) => build::run(args, &global),
        Command::Status(ref args) => status::run(args, &global),
        Command::Clean(ref args) => clean::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
