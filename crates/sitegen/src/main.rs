//! markdown-sitegen CLI - generate a static website from markdown.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "markdown-sitegen")]
#[command(about = "Generate a static website from a directory of markdown files")]
#[command(version)]
pub struct Cli {
    /// Directory containing the markdown sources
    directory: PathBuf,

    /// Theme directory with post.html, index.html and static/
    /// (defaults to the bundled theme)
    #[arg(short, long)]
    theme: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    commands::build::run(cli.directory, cli.theme)
}
