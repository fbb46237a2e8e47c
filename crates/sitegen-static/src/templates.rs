//! Template engine for rendering site pages.

use std::path::Path;

use minijinja::{context, Environment};
use serde::Serialize;
use sitegen_doc::Metadata;

/// Template used for every published document.
pub const POST_TEMPLATE_NAME: &str = "post.html";

/// Template used for the site index.
pub const INDEX_TEMPLATE_NAME: &str = "index.html";

const POST_TEMPLATE: &str = include_str!("../web/post.html");
const INDEX_TEMPLATE: &str = include_str!("../web/index.html");

/// A published document as listed on the index page.
#[derive(Debug, Clone, Serialize)]
pub struct PageSummary {
    /// Declared `path` from the frontmatter
    pub path: String,
    /// Output file relative to the build root
    pub output_path: String,
    /// Title from the frontmatter
    pub title: Option<String>,
    /// Full frontmatter
    pub metadata: Metadata,
}

/// Context for rendering a document page.
#[derive(Debug, Clone, Serialize)]
pub struct PostContext<'a> {
    /// Rendered markdown body
    pub body: &'a str,
    /// Prefix leading back to the site root
    pub root_path: &'a str,
    /// Output file relative to the build root
    pub output_path: &'a str,
    /// Document frontmatter
    pub page: &'a Metadata,
    /// Site configuration
    pub config: &'a Metadata,
}

/// Context for rendering the index page.
#[derive(Debug, Clone, Serialize)]
pub struct IndexContext<'a> {
    /// Published documents in discovery order
    pub documents: &'a [PageSummary],
    /// Site configuration
    pub config: &'a Metadata,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a template engine with the built-in templates.
    pub fn bundled() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();

        env.add_template(POST_TEMPLATE_NAME, POST_TEMPLATE)?;
        env.add_template(INDEX_TEMPLATE_NAME, INDEX_TEMPLATE)?;

        Ok(Self { env })
    }

    /// Create a template engine that loads templates from a theme directory.
    ///
    /// Both templates are loaded up front so a broken theme fails before any
    /// output is touched.
    pub fn from_dir(dir: &Path) -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.set_loader(minijinja::path_loader(dir.to_path_buf()));

        env.get_template(POST_TEMPLATE_NAME)?;
        env.get_template(INDEX_TEMPLATE_NAME)?;

        Ok(Self { env })
    }

    /// Theme directory templates if given, otherwise the built-in ones.
    pub fn for_theme(theme_dir: Option<&Path>) -> Result<Self, minijinja::Error> {
        match theme_dir {
            Some(dir) => Self::from_dir(dir),
            None => Self::bundled(),
        }
    }

    /// Render a document page.
    pub fn render_post(&self, context: &PostContext<'_>) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(POST_TEMPLATE_NAME)?;

        tmpl.render(context! {
            body => context.body,
            root_path => context.root_path,
            output_path => context.output_path,
            page => context.page,
            config => context.config,
        })
    }

    /// Render the index page. It always sits at the build root.
    pub fn render_index(&self, context: &IndexContext<'_>) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(INDEX_TEMPLATE_NAME)?;

        tmpl.render(context! {
            documents => context.documents,
            config => context.config,
            root_path => "",
        })
    }
}
