//! Article scanning and preprocessing.
//!
//! Stage 1 of the letterpress build pipeline. Reads one article line by line,
//! extracts the title from the mandatory `# ` heading, and expands embed
//! directives into fenced code blocks before the body ever reaches the
//! Markdown renderer.
//!
//! ## Article Format
//!
//! ````text
//! # How the Scheduler Works
//!
//! Some prose.
//!
//! ```embed
//! code/scheduler.rb tick
//!
//! More prose.
//! ````
//!
//! The ` ```embed ` fence opener and the directive line that follows it are
//! replaced by the resolved region as a complete fenced code block tagged
//! with the source file's language — the embed supplies its own fencing, so
//! no closing fence follows the directive in the article.
//!
//! ## Scanner States
//!
//! A single pass over the lines drives a small state machine:
//!
//! ```text
//! ExpectingTitle → Scanning → (EmbedPending → Scanning)* → Done
//! ```
//!
//! Bad input anywhere — a missing title, a malformed directive, a marker
//! that cannot be found — aborts the build with an error naming the article
//! and the violated expectation.

use crate::embed::{self, EmbedDirective, EmbedError};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("cannot read article {path}: {source}")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{path}: first line must be an h1 like: # Intro")]
    MissingTitle { path: PathBuf },
    #[error("{path}: embed directive must be \"filepath\" or \"filepath id\", got {line:?}")]
    MalformedDirective { path: PathBuf, line: String },
    #[error("{path}: article ends in the middle of an embed block")]
    TruncatedEmbed { path: PathBuf },
    #[error(transparent)]
    Embed(#[from] EmbedError),
}

/// The fence line that opens an embed block.
const EMBED_FENCE: &str = "```embed";

/// Scanner output: the article's title and its preprocessed Markdown body.
#[derive(Debug, PartialEq)]
pub struct ScannedArticle {
    pub title: String,
    pub body: String,
}

enum State {
    ExpectingTitle,
    Scanning,
    EmbedPending,
}

/// Read and preprocess the article at `path`. Embed targets are resolved
/// relative to `root`.
pub fn scan_article(root: &Path, path: &Path) -> Result<ScannedArticle, ScanError> {
    let text = fs::read_to_string(path).map_err(|source| ScanError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    scan_text(root, path, &text)
}

/// Preprocess article text already in memory. `path` is used only for error
/// reporting.
pub fn scan_text(root: &Path, path: &Path, text: &str) -> Result<ScannedArticle, ScanError> {
    let mut state = State::ExpectingTitle;
    let mut title = String::new();
    let mut body: Vec<String> = Vec::new();

    for line in text.lines() {
        match state {
            State::ExpectingTitle => {
                if line.trim().is_empty() {
                    continue;
                }
                title = line
                    .strip_prefix("# ")
                    .ok_or_else(|| ScanError::MissingTitle {
                        path: path.to_path_buf(),
                    })?
                    .to_string();
                state = State::Scanning;
            }
            State::Scanning => {
                if line == EMBED_FENCE {
                    state = State::EmbedPending;
                } else {
                    body.push(line.to_string());
                }
            }
            State::EmbedPending => {
                let directive =
                    parse_directive(line).ok_or_else(|| ScanError::MalformedDirective {
                        path: path.to_path_buf(),
                        line: line.to_string(),
                    })?;
                let resolved = embed::resolve(root, &directive)?;
                body.push(format!("```{}", resolved.language));
                body.extend(resolved.lines);
                body.push("```".to_string());
                state = State::Scanning;
            }
        }
    }

    match state {
        State::ExpectingTitle => Err(ScanError::MissingTitle {
            path: path.to_path_buf(),
        }),
        State::EmbedPending => Err(ScanError::TruncatedEmbed {
            path: path.to_path_buf(),
        }),
        State::Scanning => Ok(ScannedArticle {
            title,
            body: body.join("\n"),
        }),
    }
}

/// Parse an embed directive line: one token embeds a whole file, two tokens
/// embed a marked region. Any other token count is invalid.
fn parse_directive(line: &str) -> Option<EmbedDirective> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        [file_path] => Some(EmbedDirective {
            file_path: file_path.to_string(),
            region: None,
        }),
        [file_path, region] => Some(EmbedDirective {
            file_path: file_path.to_string(),
            region: Some(region.to_string()),
        }),
        _ => None,
    }
}
