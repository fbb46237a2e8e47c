//! Static asset copying.

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::builder::BuildError;

/// Name of the static asset directory, both in a theme and in the output.
pub const STATIC_DIR_NAME: &str = "static";

/// Assets of the built-in theme, as `(file name, contents)`.
const BUNDLED_ASSETS: &[(&str, &[u8])] =
    &[("style.css", include_bytes!("../web/static/style.css"))];

/// Copy a theme's static assets to `dest`.
///
/// Without a theme directory the built-in assets are written. `dest` must not
/// exist yet; nothing is merged or overwritten. Returns the number of files
/// written.
pub fn copy_static(theme_dir: Option<&Path>, dest: &Path) -> Result<usize, BuildError> {
    match theme_dir {
        Some(theme) => copy_tree(&theme.join(STATIC_DIR_NAME), dest),
        None => write_bundled(dest),
    }
}

fn write_bundled(dest: &Path) -> Result<usize, BuildError> {
    create_dest(dest)?;

    for (name, contents) in BUNDLED_ASSETS {
        fs::write(dest.join(name), contents)
            .map_err(|e| BuildError::WriteError(format!("{}: {}", dest.join(name).display(), e)))?;
    }

    Ok(BUNDLED_ASSETS.len())
}

/// Recursively copy the directory `src` to `dest`.
pub fn copy_tree(src: &Path, dest: &Path) -> Result<usize, BuildError> {
    if !src.is_dir() {
        return Err(BuildError::ReadError(format!(
            "Static directory not found: {}",
            src.display()
        )));
    }

    create_dest(dest)?;

    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| BuildError::ReadError(e.to_string()))?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| BuildError::ReadError(e.to_string()))?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir(&target)
                .map_err(|e| BuildError::WriteError(format!("{}: {}", target.display(), e)))?;
        } else {
            fs::copy(entry.path(), &target)
                .map_err(|e| BuildError::WriteError(format!("{}: {}", target.display(), e)))?;
            copied += 1;
        }
    }

    tracing::debug!("Copied {} static files from {}", copied, src.display());

    Ok(copied)
}

fn create_dest(dest: &Path) -> Result<(), BuildError> {
    fs::create_dir(dest).map_err(|e| BuildError::WriteError(format!("{}: {}", dest.display(), e)))
}
