//! Site build command.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use sitegen_static::{BuildConfig, SiteBuilder};

/// Output directory, relative to the working directory.
pub const BUILD_DIR: &str = "build";

/// Run the build command.
pub fn run(directory: PathBuf, theme: Option<PathBuf>) -> Result<()> {
    if !directory.is_dir() {
        bail!("not a directory - {}", directory.display());
    }

    tracing::info!("Building site from {}...", directory.display());

    let config = BuildConfig {
        source_dir: directory,
        output_dir: PathBuf::from(BUILD_DIR),
        theme_dir: theme,
    };

    let result = SiteBuilder::new(config)
        .context("Failed to load templates")?
        .build()
        .context("Build failed")?;

    tracing::info!(
        "Built {} pages ({} skipped, {} static files) in {}ms",
        result.pages,
        result.skipped,
        result.assets,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
