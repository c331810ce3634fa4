//! Lexical syntax highlighting for code blocks.
//!
//! Thin adapter over [syntect](https://docs.rs/syntect). The generated
//! markup uses CSS classes only — no inline colors — so the stylesheet owns
//! the presentation and a theme change never requires a rebuild of the
//! highlighter.
//!
//! ## Language Resolution
//!
//! The language hint on a fenced code block is whatever the embed resolver
//! derived from a file extension (`rb`, `py`, ...) or whatever the author
//! typed. Resolution tries, in order:
//!
//! 1. exact token lookup against syntect's syntax registry
//! 2. a content heuristic on the first line of the block (shebangs, XML
//!    declarations, modelines)
//! 3. the plain-text syntax
//!
//! An unknown language therefore degrades to plain text instead of failing
//! the build. Tokenizer failures, by contrast, are library faults and do
//! abort.

use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HighlightError {
    #[error("syntax highlighting failed: {0}")]
    Syntax(#[from] syntect::Error),
}

/// A loaded syntax registry. Construction is expensive (the default syntax
/// definitions are deserialized once); share one instance across a build.
pub struct Highlighter {
    syntaxes: SyntaxSet,
}

impl Highlighter {
    pub fn new() -> Self {
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
        }
    }

    /// Highlight `source` as class-annotated HTML, wrapped in
    /// `<pre class="highlight"><code>…</code></pre>`.
    ///
    /// `hint` may be empty; see the module docs for the resolution order.
    pub fn highlight(&self, source: &str, hint: &str) -> Result<String, HighlightError> {
        let syntax = self.resolve_syntax(source, hint);

        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, &self.syntaxes, ClassStyle::Spaced);
        for line in LinesWithEndings::from(source) {
            generator.parse_html_for_line_which_includes_newline(line)?;
        }

        Ok(format!(
            "<pre class=\"highlight\"><code>{}</code></pre>",
            generator.finalize()
        ))
    }

    fn resolve_syntax(&self, source: &str, hint: &str) -> &SyntaxReference {
        if !hint.is_empty()
            && let Some(syntax) = self.syntaxes.find_syntax_by_token(hint)
        {
            return syntax;
        }
        let first_line = source.lines().next().unwrap_or_default();
        self.syntaxes
            .find_syntax_by_first_line(first_line)
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text())
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}
