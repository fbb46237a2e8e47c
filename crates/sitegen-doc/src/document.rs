//! Source documents.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;

use crate::frontmatter::{extract_frontmatter, FrontmatterError, Metadata};
use crate::markdown::render_html;

/// Metadata key that opts a document into publication.
pub const PATH_KEY: &str = "path";

/// A parsed markdown source file.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// File the document was read from
    pub source_path: PathBuf,

    /// Frontmatter metadata (empty if the file has none)
    pub metadata: Metadata,

    /// Markdown body (without frontmatter)
    pub body: String,
}

/// Errors that can occur when loading a document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("{path}: {source}")]
    Frontmatter {
        path: String,
        #[source]
        source: FrontmatterError,
    },

    #[error("{path}: `path` must be a string")]
    NonStringPath { path: String },
}

impl Document {
    /// Parse a document from its source text.
    pub fn parse(source_path: impl Into<PathBuf>, text: &str) -> Result<Self, DocumentError> {
        let source_path = source_path.into();

        let (metadata, body) =
            extract_frontmatter(text).map_err(|source| DocumentError::Frontmatter {
                path: source_path.display().to_string(),
                source,
            })?;

        Ok(Self {
            metadata,
            body: body.to_string(),
            source_path,
        })
    }

    /// Read and parse a document from disk.
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let text = fs::read_to_string(path).map_err(|e| DocumentError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Self::parse(path, &text)
    }

    /// Whether the document declares a `path` and should be published.
    pub fn is_published(&self) -> bool {
        self.metadata.contains_key(PATH_KEY)
    }

    /// The site path declared in the frontmatter, if any.
    pub fn declared_path(&self) -> Result<Option<&str>, DocumentError> {
        match self.metadata.get(PATH_KEY) {
            None => Ok(None),
            Some(Value::String(path)) => Ok(Some(path.as_str())),
            Some(_) => Err(DocumentError::NonStringPath {
                path: self.source_path.display().to_string(),
            }),
        }
    }

    /// The `title` metadata value, when it is a string.
    pub fn title(&self) -> Option<&str> {
        self.metadata.get("title").and_then(Value::as_str)
    }

    /// Render the markdown body to HTML.
    pub fn to_html(&self) -> String {
        render_html(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn parses_published_document() {
        let doc = Document::parse("a.md", "---\npath: /hello\ntitle: Hi\n---\n# Hi\n").unwrap();

        assert!(doc.is_published());
        assert_eq!(doc.declared_path().unwrap(), Some("/hello"));
        assert_eq!(doc.title(), Some("Hi"));
        assert_eq!(doc.body, "# Hi\n");
        assert_eq!(doc.to_html(), "<h1>Hi</h1>\n");
    }

    #[test]
    fn document_without_path_is_unpublished() {
        let doc = Document::parse("draft.md", "---\ntitle: Draft\n---\nWork in progress").unwrap();

        assert!(!doc.is_published());
        assert_eq!(doc.declared_path().unwrap(), None);
    }

    #[test]
    fn document_without_frontmatter_is_unpublished() {
        let doc = Document::parse("notes.md", "# Notes").unwrap();

        assert!(doc.metadata.is_empty());
        assert!(!doc.is_published());
    }

    #[test]
    fn rejects_non_string_path() {
        let doc = Document::parse("n.md", "---\npath: 42\n---\n").unwrap();

        assert!(doc.is_published());
        assert!(matches!(
            doc.declared_path(),
            Err(DocumentError::NonStringPath { .. })
        ));
    }

    #[test]
    fn frontmatter_errors_name_the_file() {
        let err = Document::parse("broken.md", "---\npath: /x\n").unwrap_err();

        assert!(err.to_string().starts_with("broken.md:"));
    }

    #[test]
    fn loads_from_disk() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("post.md");
        fs::write(&file, "---\npath: /post\n---\nBody").unwrap();

        let doc = Document::load(&file).unwrap();

        assert_eq!(doc.source_path, file);
        assert_eq!(doc.body, "Body");
    }

    #[test]
    fn missing_file_is_read_error() {
        let temp = tempdir().unwrap();

        let result = Document::load(&temp.path().join("missing.md"));

        assert!(matches!(result, Err(DocumentError::Read { .. })));
    }
}
