//! Margin removal for embedded code regions.
//!
//! A region pulled out of a source file usually carries the indentation of
//! its surrounding scope. The margin is the leading run of spaces and tabs
//! on the region's *first* line; stripping that exact prefix from every line
//! removes the scope indentation while preserving relative indentation
//! inside the region.
//!
//! ```text
//!     def greet          →  def greet
//!       puts "hi"        →    puts "hi"
//!     end                →  end
//! ```

/// The leading whitespace prefix of `line`, up to the first non-whitespace
/// character. Empty when the line starts with content or contains nothing
/// but whitespace.
pub fn margin_of(line: &str) -> &str {
    let content = line.trim_start_matches([' ', '\t']);
    if content.is_empty() {
        ""
    } else {
        &line[..line.len() - content.len()]
    }
}

/// Remove the first line's margin from every line in the sequence.
///
/// Only a matching leading prefix is stripped: lines that are shorter than
/// the margin or indented differently pass through unchanged. The result has
/// the same number of lines in the same order as the input.
pub fn dedent(lines: &[&str]) -> Vec<String> {
    let margin = lines.first().map(|l| margin_of(l)).unwrap_or_default();
    lines
        .iter()
        .map(|line| line.strip_prefix(margin).unwrap_or(line).to_string())
        .collect()
}
