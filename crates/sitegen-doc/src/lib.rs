//! Markdown documents with YAML front-matter.
//!
//! This crate splits a source file into its metadata block and markdown body,
//! and renders the body to HTML.

pub mod document;
pub mod frontmatter;
pub mod markdown;

pub use document::{Document, DocumentError};
pub use frontmatter::{extract_frontmatter, parse_mapping, FrontmatterError, Metadata};
pub use markdown::render_html;
