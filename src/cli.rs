use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the modpack patcher.
#[derive(Parser, Debug)]
#[command(name = "modpatcher", about = "Instance-local modpack patcher", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Path to a local manifest JSON file (takes precedence over --remote)
    #[arg(short, long, global = true)]
    pub local: Option<std::path::PathBuf>,

    /// URL of the remote manifest JSON (overrides the built-in default)
    #[arg(short, long, global = true)]
    pub remote: Option<String>,

    /// Instance directory to patch (default: current directory)
    #[arg(long, global = true)]
    pub instance_dir: Option<std::path::PathBuf>,

    /// Preview changes without applying
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Apply the manifest to the instance directory
    Apply(ApplyOpts),
    /// Print version information
    Version,
}

/// Options for the `apply` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ApplyOpts {
    /// Skip specific tasks
    #[arg(long, value_delimiter = ',')]
    pub skip: Vec<String>,

    /// Run only specific tasks
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,
}
