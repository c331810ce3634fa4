//! Source-code embedding for articles.
//!
//! An article can pull a region of any source file in the project into its
//! body as a fenced code block. The author marks the region in the source
//! file with a pair of magic comments:
//!
//! ```text
//! # begindoc: greet
//! puts "here"
//! # enddoc: greet
//! ```
//!
//! and references it from the article with an embed directive (see
//! [`crate::scan`]). The lines between the markers are extracted, dedented
//! ([`crate::dedent`]), and tagged with the file's extension so the code
//! block is syntax highlighted like any other.
//!
//! Markers are matched as literal substrings — including the trailing id, so
//! `begindoc: x` never matches `begindoc: xy` — which makes them work under
//! any language's line-comment syntax without knowing it.

use crate::dedent::dedent;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EmbedError {
    #[error("cannot read embed source {path}: {source}")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("missing marker \"begindoc: {id}\" in {path}")]
    MissingBeginMarker { id: String, path: PathBuf },
    #[error("missing marker \"enddoc: {id}\" in {path}")]
    MissingEndMarker { id: String, path: PathBuf },
    #[error("marker \"enddoc: {id}\" in {path} has no preceding line to end the region at")]
    RegionFormat { id: String, path: PathBuf },
}

/// An embed instruction parsed from an article.
///
/// `code/sample.rb greet` embeds the `greet` region of `code/sample.rb`;
/// a bare `code/sample.rb` embeds the whole file.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbedDirective {
    /// Path of the source file, relative to the project root.
    pub file_path: String,
    /// Region id; the whole file when absent.
    pub region: Option<String>,
}

/// A resolved embed, ready to be re-fenced by the scanner.
#[derive(Debug, PartialEq)]
pub struct ResolvedEmbed {
    /// Fence language tag: the source file's extension without the dot,
    /// empty when the file has none.
    pub language: String,
    /// Dedented region lines.
    pub lines: Vec<String>,
}

/// Load `directive.file_path` under `root` and extract the requested region.
pub fn resolve(root: &Path, directive: &EmbedDirective) -> Result<ResolvedEmbed, EmbedError> {
    let path = root.join(&directive.file_path);
    let content = fs::read_to_string(&path).map_err(|source| EmbedError::Unreadable {
        path: path.clone(),
        source,
    })?;

    let region = match &directive.region {
        Some(id) => extract_region(&content, id, &path)?,
        None => content.strip_suffix('\n').unwrap_or(&content).to_string(),
    };

    let language = Path::new(&directive.file_path)
        .extension()
        .map(|e| e.to_string_lossy().to_string())
        .unwrap_or_default();

    let raw_lines: Vec<&str> = if region.is_empty() {
        Vec::new()
    } else {
        region.split('\n').collect()
    };

    Ok(ResolvedEmbed {
        language,
        lines: dedent(&raw_lines),
    })
}

/// Extract the text between `begindoc: <id>` and `enddoc: <id>`.
///
/// The region starts immediately after the begin marker's line terminator
/// and ends at the line terminator preceding the end marker, so the comment
/// characters on both marker lines stay out of the region. Adjacent markers
/// yield an empty region.
fn extract_region(content: &str, id: &str, path: &Path) -> Result<String, EmbedError> {
    let begin_marker = format!("begindoc: {id}\n");
    let begin = content
        .find(&begin_marker)
        .ok_or_else(|| EmbedError::MissingBeginMarker {
            id: id.to_string(),
            path: path.to_path_buf(),
        })?;
    let start = begin + begin_marker.len();

    let end_marker = format!("enddoc: {id}");
    let end_at = content
        .find(&end_marker)
        .ok_or_else(|| EmbedError::MissingEndMarker {
            id: id.to_string(),
            path: path.to_path_buf(),
        })?;

    // Backtrack to the newline before the end marker to cut the comment
    // prefix off the region.
    let end = content[..end_at]
        .rfind('\n')
        .ok_or_else(|| EmbedError::RegionFormat {
            id: id.to_string(),
            path: path.to_path_buf(),
        })?;

    if end <= start {
        return Ok(String::new());
    }

    Ok(content[start..end].to_string())
}
