//! Site building and HTML generation.
//!
//! The final stage of the letterpress pipeline. Enumerates every article
//! under the articles root, runs each through scan → render, attaches the
//! last-modified date from version control, and writes the finished site.
//!
//! ## Output Structure
//!
//! ```text
//! public/
//! ├── index.html                 # Article listing
//! ├── style.css                  # Base styles + highlight token classes
//! ├── articles.json              # Site manifest (id, title, date)
//! ├── intro.html                 # One page per article id
//! └── notes/
//!     └── setup.html             # Nested article directories keep their path
//! ```
//!
//! ## Parallel Processing
//!
//! Articles are independent — no article's processing reads another's state
//! — so they are processed in parallel using
//! [rayon](https://docs.rs/rayon): one task per article, each writing only
//! its own page. Collecting into `Result` is the join barrier; the first
//! failure aborts the build after the fan-in.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping; the
//! rendered article body is the only pre-escaped insertion.

use crate::highlight::Highlighter;
use crate::history::{GitHistory, History, HistoryError};
use crate::render::{self, RenderError};
use crate::scan::{self, ScanError};
use crate::types::{Article, SiteConfig};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    History(#[from] HistoryError),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const STYLESHEET_HREF: &str = "/style.css";

/// Build the whole site using git for last-modified dates.
pub fn build(config: &SiteConfig) -> Result<Vec<Article>, BuildError> {
    let history = GitHistory::new(&config.project_root);
    build_with_history(&history, config)
}

/// Build the whole site using a specific [`History`] (allows testing with a
/// stub).
pub fn build_with_history<H: History>(
    history: &H,
    config: &SiteConfig,
) -> Result<Vec<Article>, BuildError> {
    let files = article_files(&config.articles_dir)?;
    fs::create_dir_all(&config.output_dir)?;

    let highlighter = Highlighter::new();

    // One task per article; each writes only its own page. The collect is
    // the fan-in barrier and surfaces the first failure.
    let mut articles: Vec<Article> = files
        .par_iter()
        .map(|path| build_article(history, &highlighter, config, path))
        .collect::<Result<_, _>>()?;

    // Completion order is scheduling-dependent; the listing is not.
    articles.sort_by(|a, b| a.id.cmp(&b.id));

    let index = render_index(&articles, config);
    fs::write(config.output_dir.join("index.html"), index.into_string())?;
    println!("Generated index.html");

    let manifest = serde_json::to_string_pretty(&articles)?;
    fs::write(config.output_dir.join("articles.json"), manifest)?;

    fs::write(config.output_dir.join("style.css"), CSS_STATIC)?;

    Ok(articles)
}

/// Validate every article — titles, directives, embed resolution — without
/// writing any output. Returns the number of articles checked.
pub fn check(config: &SiteConfig) -> Result<usize, BuildError> {
    let files = article_files(&config.articles_dir)?;
    files
        .par_iter()
        .map(|path| scan::scan_article(&config.project_root, path).map(drop))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(files.len())
}

/// Process one article end to end and write its page.
fn build_article<H: History>(
    history: &H,
    highlighter: &Highlighter,
    config: &SiteConfig,
    path: &Path,
) -> Result<Article, BuildError> {
    let id = article_id(&config.articles_dir, path);

    let scanned = scan::scan_article(&config.project_root, path)?;
    let body = render::render_markdown(&scanned.body, &config.base_url, highlighter)?;
    let updated_on = history.last_updated(path)?;

    let article = Article {
        id,
        title: scanned.title,
        updated_on,
        body,
    };

    let out_path = config.output_dir.join(format!("{}.html", article.id));
    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let page = render_article_page(&article, config);
    fs::write(&out_path, page.into_string())?;
    println!("Generated {}.html", article.id);

    Ok(article)
}

/// All `.md` files under `dir`, sorted for deterministic processing order.
/// Hidden files are skipped.
fn article_files(dir: &Path) -> Result<Vec<PathBuf>, BuildError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(|e| BuildError::Io(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let is_md = entry
            .path()
            .extension()
            .map(|e| e.eq_ignore_ascii_case("md"))
            .unwrap_or(false);
        if is_md {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Derive the article id from its path: relative to the articles root,
/// extension stripped, separators normalized to `/`.
fn article_id(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.with_extension("")
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

// ============================================================================
// Page Templates
// ============================================================================

/// The base HTML document structure shared by every page.
fn base_document(page_title: &str, stylesheet: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (page_title) }
                link rel="stylesheet" href=(stylesheet);
            }
            body {
                (content)
            }
        }
    }
}

fn site_header(config: &SiteConfig) -> Markup {
    html! {
        header.site-header {
            nav {
                a href="/" { (config.title) }
            }
        }
    }
}

/// One article page. The body is rendered HTML from the pipeline and is the
/// only pre-escaped insertion.
fn render_article_page(article: &Article, config: &SiteConfig) -> Markup {
    let content = html! {
        (site_header(config))
        main.article-page {
            article {
                h1 { (article.title) }
                p.updated-on { "Last updated " (article.updated_on) }
                (PreEscaped(&article.body))
            }
        }
    };
    base_document(&article.title, STYLESHEET_HREF, content)
}

/// The index page: a dated listing of every article.
fn render_index(articles: &[Article], config: &SiteConfig) -> Markup {
    let content = html! {
        (site_header(config))
        main.index-page {
            ul.article-list {
                @for article in articles {
                    li {
                        a href={ "/" (article.id) ".html" } { (article.title) }
                        span.updated-on { (article.updated_on) }
                    }
                }
            }
        }
    };
    base_document(&config.title, STYLESHEET_HREF, content)
}
