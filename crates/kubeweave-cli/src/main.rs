//! Kubeweave CLI - declarative Kubernetes manifest compiler

use clap::{Parser, Subcommand};
use miette::Result;
use std::path::PathBuf;

mod commands;
mod exit_codes;
mod loading;

#[derive(Parser)]
#[command(name = "kubeweave")]
#[command(author = "Kubeweave Contributors")]
#[command(version)]
#[command(about = "Compile declarative node trees into Kubernetes manifests", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile node sources into manifests
    Build {
        /// Node source file(s)
        #[arg(required = true)]
        sources: Vec<PathBuf>,

        /// Registry extension file(s) with additional kinds and contexts
        #[arg(short = 'r', long = "registry")]
        registries: Vec<PathBuf>,

        /// Output file (if not set, outputs to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit JSON instead of YAML
        #[arg(long)]
        json: bool,

        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },

    /// Validate registry files and node sources without emitting manifests
    Check {
        /// Node source file(s)
        #[arg(required = true)]
        sources: Vec<PathBuf>,

        /// Registry extension file(s)
        #[arg(short = 'r', long = "registry")]
        registries: Vec<PathBuf>,

        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },

    /// Show where a kind can be placed and what it accepts
    Explain {
        /// Kind name or full type identity
        kind: String,

        /// Registry extension file(s)
        #[arg(short = 'r', long = "registry")]
        registries: Vec<PathBuf>,
    },

    /// List registered type identities
    Kinds {
        /// Registry extension file(s)
        #[arg(short = 'r', long = "registry")]
        registries: Vec<PathBuf>,

        /// Only list resource roots
        #[arg(long)]
        resources: bool,
    },
}

fn main() -> Result<()> {
    // Setup miette for nice error display
    miette::set_panic_hook();

    let cli = Cli::parse();

    // Set debug level
    if cli.debug {
        // SAFETY: We're the only thread at this point (start of main)
        unsafe { std::env::set_var("RUST_BACKTRACE", "1") };
    }

    match cli.command {
        Commands::Build {
            sources,
            registries,
            output,
            json,
            strict,
        } => commands::build::run(
            &sources,
            &registries,
            output.as_deref(),
            json,
            strict,
            cli.debug,
        ),

        Commands::Check {
            sources,
            registries,
            strict,
        } => commands::check::run(&sources, &registries, strict),

        Commands::Explain { kind, registries } => commands::explain::run(&kind, &registries),

        Commands::Kinds {
            registries,
            resources,
        } => commands::kinds::run(&registries, resources),
    }
}
