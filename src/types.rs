//! Shared types threaded through the build pipeline.

use serde::Serialize;
use std::path::PathBuf;

/// One published article.
///
/// Built fresh on every run — there is no cache between builds — and
/// discarded once its page is written. The rendered body is deliberately
/// excluded from the serialized manifest, which only carries metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Article {
    /// URL slug: the source path relative to the articles root, extension
    /// stripped, separators normalized to `/`.
    pub id: String,
    /// From the article's first `# ` heading line.
    pub title: String,
    /// Last-modified date from version control, e.g. "August 7, 2026".
    pub updated_on: String,
    /// Rendered HTML body.
    #[serde(skip)]
    pub body: String,
}

/// Read-only configuration for one build invocation.
///
/// Threaded by reference into every stage; nothing in the pipeline reads
/// configuration from anywhere else.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Site name, shown in page headers and `<title>`s.
    pub title: String,
    /// Canonical site URL without a trailing slash, prefixed onto
    /// root-relative links. Empty disables prefixing.
    pub base_url: String,
    /// Directory containing article `.md` files.
    pub articles_dir: PathBuf,
    /// Directory the site is written to.
    pub output_dir: PathBuf,
    /// Root that embed directive paths are resolved against.
    pub project_root: PathBuf,
}
