//! Static site builder.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use sitegen_doc::{Document, DocumentError};

use crate::assets::{copy_static, STATIC_DIR_NAME};
use crate::config::SiteConfig;
use crate::discover::{discover, IgnoreList};
use crate::paths::{output_relpath, root_path, to_fs_path};
use crate::templates::{IndexContext, PageSummary, PostContext, TemplateEngine};

/// Configuration for building a static site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory containing the markdown sources
    pub source_dir: PathBuf,

    /// Output directory, wiped and regenerated on every build
    pub output_dir: PathBuf,

    /// Theme directory with `post.html`, `index.html` and `static/`.
    /// The built-in theme is used when unset.
    pub theme_dir: Option<PathBuf>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("."),
            output_dir: PathBuf::from("build"),
            theme_dir: None,
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages generated, excluding the index
    pub pages: usize,

    /// Number of markdown files skipped for lack of a `path`
    pub skipped: usize,

    /// Number of static files copied
    pub assets: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Failed to read: {0}")]
    ReadError(String),

    #[error("Failed to parse document: {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Failed to load config: {0}")]
    ConfigError(String),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// A published document with its resolved output location.
#[derive(Debug)]
struct PageInfo {
    doc: Document,

    /// Declared `path` from the frontmatter
    declared: String,

    /// Output file relative to the build root
    output_path: String,
}

/// Static site builder.
pub struct SiteBuilder {
    config: BuildConfig,
    templates: TemplateEngine,
}

impl SiteBuilder {
    /// Create a new builder, loading the theme templates.
    pub fn new(config: BuildConfig) -> Result<Self, BuildError> {
        let templates = TemplateEngine::for_theme(config.theme_dir.as_deref())
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;

        Ok(Self { config, templates })
    }

    /// Build the site.
    ///
    /// Stages run strictly in order and the first error aborts the build.
    /// Output written before the failure is left in place.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();
        let source_dir = &self.config.source_dir;

        if !source_dir.is_dir() {
            return Err(BuildError::NotADirectory(source_dir.display().to_string()));
        }

        let ignore = IgnoreList::load(source_dir)?;
        let files = discover(source_dir, &ignore)?;
        tracing::info!("Found {} markdown files in {}", files.len(), source_dir.display());

        let site = SiteConfig::resolve(source_dir)?;

        let (pages, skipped) = self.load_pages(&files)?;

        self.clean_output()?;

        for page in &pages {
            self.write_page(page, &site)?;
        }

        self.write_index(&pages, &site)?;

        let assets = copy_static(
            self.config.theme_dir.as_deref(),
            &self.config.output_dir.join(STATIC_DIR_NAME),
        )?;

        let duration = start.elapsed();

        Ok(BuildResult {
            pages: pages.len(),
            skipped,
            assets,
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Parse every discovered file and keep the published ones.
    fn load_pages(&self, files: &[PathBuf]) -> Result<(Vec<PageInfo>, usize), BuildError> {
        let mut pages = Vec::new();
        let mut skipped = 0;
        let mut seen = HashSet::new();

        for path in files {
            let doc = Document::load(path).map_err(document_error)?;

            let declared = match doc.declared_path().map_err(document_error)? {
                Some(declared) => declared.to_string(),
                None => {
                    tracing::debug!("Skipping {} (no path in frontmatter)", path.display());
                    skipped += 1;
                    continue;
                }
            };

            let output_path = output_relpath(&declared)?;
            if !seen.insert(output_path.clone()) {
                tracing::warn!(
                    "{} overwrites an earlier page at {}",
                    path.display(),
                    output_path
                );
            }

            pages.push(PageInfo {
                doc,
                declared,
                output_path,
            });
        }

        Ok((pages, skipped))
    }

    /// Remove the previous build, if any.
    fn clean_output(&self) -> Result<(), BuildError> {
        let output_dir = &self.config.output_dir;

        match fs::canonicalize(output_dir) {
            Ok(output) => {
                let source = fs::canonicalize(&self.config.source_dir)
                    .map_err(|e| BuildError::ReadError(e.to_string()))?;
                if source.starts_with(&output) {
                    return Err(BuildError::InvalidPath(format!(
                        "output directory {} contains the source directory",
                        output_dir.display()
                    )));
                }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(BuildError::ReadError(e.to_string())),
        }

        match fs::remove_dir_all(output_dir) {
            Ok(()) => tracing::debug!("Removed previous build at {}", output_dir.display()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(write_error(output_dir, e)),
        }

        fs::create_dir_all(output_dir).map_err(|e| write_error(output_dir, e))
    }

    /// Render and write a single document page.
    fn write_page(&self, page: &PageInfo, site: &SiteConfig) -> Result<(), BuildError> {
        let body = page.doc.to_html();
        let root = root_path(&page.output_path);

        let html = self
            .templates
            .render_post(&PostContext {
                body: &body,
                root_path: &root,
                output_path: &page.output_path,
                page: &page.doc.metadata,
                config: &site.values,
            })
            .map_err(|e| {
                BuildError::TemplateError(format!("{}: {}", page.doc.source_path.display(), e))
            })?;

        let target = to_fs_path(&self.config.output_dir, &page.output_path);
        write_file(&target, &html)?;

        tracing::debug!("Wrote {}", target.display());

        Ok(())
    }

    /// Render and write the index page listing every published document.
    fn write_index(&self, pages: &[PageInfo], site: &SiteConfig) -> Result<(), BuildError> {
        let documents: Vec<PageSummary> = pages
            .iter()
            .map(|page| PageSummary {
                path: page.declared.clone(),
                output_path: page.output_path.clone(),
                title: page.doc.title().map(str::to_string),
                metadata: page.doc.metadata.clone(),
            })
            .collect();

        let html = self
            .templates
            .render_index(&IndexContext {
                documents: &documents,
                config: &site.values,
            })
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;

        write_file(&self.config.output_dir.join("index.html"), &html)
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), BuildError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| write_error(parent, e))?;
    }

    fs::write(path, contents).map_err(|e| write_error(path, e))
}

fn write_error(path: &Path, e: io::Error) -> BuildError {
    BuildError::WriteError(format!("{}: {}", path.display(), e))
}

fn document_error(e: DocumentError) -> BuildError {
    match e {
        DocumentError::Read { .. } => BuildError::ReadError(e.to_string()),
        DocumentError::Frontmatter { path, source } => BuildError::ParseError {
            path,
            message: source.to_string(),
        },
        DocumentError::NonStringPath { path } => BuildError::ParseError {
            path,
            message: "`path` must be a string".to_string(),
        },
    }
}
