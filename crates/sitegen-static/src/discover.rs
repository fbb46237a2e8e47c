//! Source file discovery.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::builder::BuildError;

/// Name of the ignore file looked up in the source directory.
pub const IGNORE_FILE: &str = ".sitegenignore";

/// Directory names excluded from discovery.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreList {
    names: Vec<String>,
}

impl IgnoreList {
    /// Create an ignore list from directory names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse ignore file contents: one directory name per line.
    pub fn parse(text: &str) -> Self {
        Self::new(
            text.lines()
                .map(str::trim_end)
                .filter(|line| !line.is_empty()),
        )
    }

    /// Load `.sitegenignore` from the source directory.
    ///
    /// A missing file yields an empty list.
    pub fn load(source_dir: &Path) -> Result<Self, BuildError> {
        let path = source_dir.join(IGNORE_FILE);

        match fs::read_to_string(&path) {
            Ok(text) => {
                let list = Self::parse(&text);
                tracing::debug!("Loaded {} ignore entries from {}", list.len(), path.display());
                Ok(list)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(BuildError::ReadError(format!("{}: {}", path.display(), e))),
        }
    }

    /// Whether a directory name is ignored. Exact match only.
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Find all markdown files under `source_dir`.
///
/// Directories whose name is on the ignore list are not descended into, at
/// any depth. Files are matched on a case-insensitive `.md` extension and
/// returned in walk order, with each directory's entries sorted by name.
pub fn discover(source_dir: &Path, ignore: &IgnoreList) -> Result<Vec<PathBuf>, BuildError> {
    let mut files = Vec::new();

    let walker = WalkDir::new(source_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_ignored_dir(entry, ignore));

    for entry in walker {
        let entry = entry.map_err(|e| BuildError::ReadError(e.to_string()))?;
        let path = entry.path();

        if path.is_file() && is_markdown(path) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

fn is_ignored_dir(entry: &DirEntry, ignore: &IgnoreList) -> bool {
    // The source directory itself is always walked.
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| ignore.contains(name))
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "# test").unwrap();
    }

    fn relative(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|f| {
                f.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn parses_ignore_file() {
        let list = IgnoreList::parse("drafts\r\n\nnode_modules  \n");

        assert_eq!(list, IgnoreList::new(["drafts", "node_modules"]));
        assert!(list.contains("drafts"));
        assert!(!list.contains("draft"));
        assert!(!list.contains(""));
    }

    #[test]
    fn missing_ignore_file_is_empty() {
        let temp = tempdir().unwrap();

        let list = IgnoreList::load(temp.path()).unwrap();

        assert!(list.is_empty());
    }

    #[test]
    fn finds_markdown_case_insensitively() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        touch(&root.join("a.md"));
        touch(&root.join("B.MD"));
        touch(&root.join("nested/deeper/c.Md"));
        touch(&root.join("notes.txt"));
        touch(&root.join("md"));

        let files = discover(root, &IgnoreList::default()).unwrap();

        assert_eq!(
            relative(root, &files),
            vec!["B.MD", "a.md", "nested/deeper/c.Md"]
        );
    }

    #[test]
    fn prunes_ignored_directories_at_any_depth() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        touch(&root.join("keep.md"));
        touch(&root.join("drafts/secret.md"));
        touch(&root.join("drafts/inner/deep.md"));
        touch(&root.join("blog/drafts/also-secret.md"));
        touch(&root.join("blog/post.md"));
        touch(&root.join("drafts-old/kept.md"));

        let files = discover(root, &IgnoreList::new(["drafts"])).unwrap();

        assert_eq!(
            relative(root, &files),
            vec!["blog/post.md", "drafts-old/kept.md", "keep.md"]
        );
    }

    #[test]
    fn ignore_list_does_not_apply_to_files() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        touch(&root.join("drafts.md"));

        let files = discover(root, &IgnoreList::new(["drafts.md"])).unwrap();

        assert_eq!(relative(root, &files), vec!["drafts.md"]);
    }

    #[test]
    fn source_directory_itself_is_never_pruned() {
        let temp = tempdir().unwrap();
        let root = temp.path().join("site");
        touch(&root.join("index.md"));

        let files = discover(&root, &IgnoreList::new(["site"])).unwrap();

        assert_eq!(files.len(), 1);
    }
}
