//! Markdown to HTML conversion.
//!
//! Stage 2 of the letterpress build pipeline. The scanner's output body is
//! plain Markdown — every embed directive has already been expanded into an
//! ordinary fenced code block — so this stage is a single walk over the
//! pulldown-cmark event stream with three rewrites:
//!
//! - **Code blocks**: the default `<pre><code>` rendering is replaced by the
//!   [`Highlighter`](crate::highlight::Highlighter)'s class-annotated markup.
//!   The fence's language tag is passed through as the hint.
//! - **Heading anchors**: every heading gets a stable `id` slugified from
//!   its text, so sections can be deep-linked.
//! - **Absolute links**: root-relative link and image destinations are
//!   prefixed with the site's canonical base URL.
//!
//! Everything else (emphasis, lists, tables, footnotes) is standard
//! pulldown-cmark conversion.

use crate::highlight::{HighlightError, Highlighter};
use pulldown_cmark::{CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd, html};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Highlight(#[from] HighlightError),
}

/// Convert a preprocessed article body to an HTML fragment.
///
/// `base_url` is the site's canonical URL without a trailing slash; it is
/// prepended to root-relative destinations. Pass an empty string to leave
/// destinations untouched.
pub fn render_markdown(
    body: &str,
    base_url: &str,
    highlighter: &Highlighter,
) -> Result<String, RenderError> {
    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES;
    let mut parser = Parser::new_ext(body, options);
    let mut events: Vec<Event> = Vec::new();

    while let Some(event) = parser.next() {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let language = fence_language(&kind);
                let mut code = String::new();
                for inner in parser.by_ref() {
                    match inner {
                        Event::Text(text) => code.push_str(&text),
                        Event::End(TagEnd::CodeBlock) => break,
                        _ => {}
                    }
                }
                let markup = highlighter.highlight(&code, &language)?;
                events.push(Event::Html(markup.into()));
            }
            Event::Start(Tag::Heading {
                level,
                id,
                classes,
                attrs,
            }) => {
                // The id is derived from the heading's text, which is only
                // known once the whole heading has been consumed.
                let mut inner_events: Vec<Event> = Vec::new();
                let mut text = String::new();
                for inner in parser.by_ref() {
                    match inner {
                        Event::End(TagEnd::Heading(_)) => break,
                        Event::Text(t) => {
                            text.push_str(&t);
                            inner_events.push(Event::Text(t));
                        }
                        Event::Code(t) => {
                            text.push_str(&t);
                            inner_events.push(Event::Code(t));
                        }
                        other => inner_events.push(other),
                    }
                }
                let id = id.or_else(|| Some(slugify(&text).into()));
                events.push(Event::Start(Tag::Heading {
                    level,
                    id,
                    classes,
                    attrs,
                }));
                events.extend(inner_events);
                events.push(Event::End(TagEnd::Heading(level)));
            }
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            }) => {
                events.push(Event::Start(Tag::Link {
                    link_type,
                    dest_url: absolutize(dest_url, base_url),
                    title,
                    id,
                }));
            }
            Event::Start(Tag::Image {
                link_type,
                dest_url,
                title,
                id,
            }) => {
                events.push(Event::Start(Tag::Image {
                    link_type,
                    dest_url: absolutize(dest_url, base_url),
                    title,
                    id,
                }));
            }
            other => events.push(other),
        }
    }

    let mut out = String::new();
    html::push_html(&mut out, events.into_iter());
    Ok(out)
}

fn fence_language(kind: &CodeBlockKind) -> String {
    match kind {
        // A fence info string may carry extra words; the language is the
        // first one.
        CodeBlockKind::Fenced(info) => info
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string(),
        CodeBlockKind::Indented => String::new(),
    }
}

fn absolutize<'a>(dest: CowStr<'a>, base_url: &str) -> CowStr<'a> {
    if base_url.is_empty() || !dest.starts_with('/') {
        return dest;
    }
    format!("{}{}", base_url.trim_end_matches('/'), dest).into()
}

/// Derive a stable anchor id from heading text: lowercased, alphanumerics
/// kept, runs of everything else collapsed to single dashes.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            for lower in c.to_lowercase() {
                slug.push(lower);
            }
        } else {
            pending_dash = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(body: &str) -> String {
        render_markdown(body, "", &Highlighter::new()).unwrap()
    }

    // =========================================================================
    // Slug tests
    // =========================================================================

    #[test]
    fn slugify_lowercases_and_dashes() {
        assert_eq!(slugify("How the Scheduler Works"), "how-the-scheduler-works");
    }

    #[test]
    fn slugify_collapses_punctuation_runs() {
        assert_eq!(slugify("What's next?  (part 2)"), "what-s-next-part-2");
    }

    #[test]
    fn slugify_trims_edges() {
        assert_eq!(slugify("  Hello!  "), "hello");
    }

    // =========================================================================
    // Rendering tests
    // =========================================================================

    #[test]
    fn renders_inline_emphasis() {
        let html = render("Hello *world*.");
        assert!(html.contains("<em>world</em>"));
    }

    #[test]
    fn headings_get_anchor_ids() {
        let html = render("## How the Scheduler Works");
        assert!(html.contains(r#"<h2 id="how-the-scheduler-works">"#));
    }

    #[test]
    fn heading_id_includes_code_spans() {
        let html = render("## Using `dedent`");
        assert!(html.contains(r#"id="using-dedent""#));
    }

    #[test]
    fn code_blocks_render_through_highlighter() {
        let html = render("```rb\nputs \"hi\"\n```");
        assert!(html.contains("<pre class=\"highlight\"><code>"));
        assert!(html.contains("<span"));
        assert!(!html.contains("language-rb"));
    }

    #[test]
    fn untagged_code_block_still_renders() {
        let html = render("```\nplain text here\n```");
        assert!(html.contains("<pre class=\"highlight\"><code>"));
        assert!(html.contains("plain text here"));
    }

    #[test]
    fn root_relative_links_get_base_url() {
        let html =
            render_markdown("[about](/about.html)", "https://example.com", &Highlighter::new())
                .unwrap();
        assert!(html.contains(r#"href="https://example.com/about.html""#));
    }

    #[test]
    fn external_links_unchanged() {
        let html =
            render_markdown("[x](https://other.org/p)", "https://example.com", &Highlighter::new())
                .unwrap();
        assert!(html.contains(r#"href="https://other.org/p""#));
    }

    #[test]
    fn relative_links_unchanged() {
        let html =
            render_markdown("[x](other.html)", "https://example.com", &Highlighter::new()).unwrap();
        assert!(html.contains(r#"href="other.html""#));
    }

    #[test]
    fn root_relative_images_get_base_url() {
        let html =
            render_markdown("![alt](/images/a.png)", "https://example.com", &Highlighter::new())
                .unwrap();
        assert!(html.contains(r#"src="https://example.com/images/a.png""#));
    }

    #[test]
    fn tables_are_enabled() {
        let html = render("| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(html.contains("<table>"));
    }

    #[test]
    fn scanner_output_round_trip() {
        // A preprocessed body with an expanded embed renders with no
        // leftover fences or directives.
        let body = "\nHello *world*.\n```rb\nHELLO\n```";
        let html = render(body);
        assert!(html.contains("<em>world</em>"));
        assert!(html.contains("<pre class=\"highlight\">"));
        assert!(!html.contains("```"));
        assert!(!html.contains("embed"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let body = "# T\n\n```rust\nfn main() {}\n```\n";
        assert_eq!(render(body), render(body));
    }
}
