//! Static site generator for markdown-sitegen.
//!
//! Builds a static website from a directory of markdown files with YAML
//! frontmatter.

pub mod assets;
pub mod builder;
pub mod config;
pub mod discover;
pub mod paths;
pub mod templates;

pub use builder::{BuildConfig, BuildError, BuildResult, SiteBuilder};
pub use config::{ConfigSource, SiteConfig};
pub use discover::{discover, IgnoreList};
pub use templates::{PageSummary, TemplateEngine};
