//! Output path computation.
//!
//! Output paths are kept as `/`-separated strings relative to the build
//! directory. They are exposed to templates as-is and only converted to
//! filesystem paths when a page is written.

use std::path::{Path, PathBuf};

use crate::builder::BuildError;

/// File name every published page is written to.
pub const PAGE_FILE: &str = "index.html";

/// Compute the build-relative output path for a declared site path.
///
/// `/foo/bar` becomes `foo/bar/index.html`. A single leading `/` is stripped
/// so declared paths are always relative to the site root.
pub fn output_relpath(declared: &str) -> Result<String, BuildError> {
    let relpath = format!("{}/{}", declared, PAGE_FILE);
    let relpath = match relpath.strip_prefix('/') {
        Some(stripped) => stripped.to_string(),
        None => relpath,
    };

    // Anything still absolute, or climbing out with `..`, would land outside
    // the build directory.
    if relpath.starts_with('/') || relpath.split('/').any(|segment| segment == "..") {
        return Err(BuildError::InvalidPath(format!(
            "`{}` does not resolve inside the build directory",
            declared
        )));
    }

    Ok(relpath)
}

/// Relative prefix leading from `relpath` back to the build root.
///
/// One `../` per directory level; the final segment is the file itself.
pub fn root_path(relpath: &str) -> String {
    let depth = segments(relpath).count().saturating_sub(1);
    "../".repeat(depth)
}

/// Join a `/`-separated relative path onto `base`.
pub fn to_fs_path(base: &Path, relpath: &str) -> PathBuf {
    segments(relpath).fold(base.to_path_buf(), |path, segment| path.join(segment))
}

fn segments(relpath: &str) -> impl Iterator<Item = &str> {
    relpath
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
}
