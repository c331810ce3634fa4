//! # Letterpress
//!
//! A minimal static site generator for personal technical blogs. Your
//! filesystem is the data source: Markdown files become articles, git
//! history supplies their dates, and real source files can be embedded into
//! article bodies as highlighted code blocks.
//!
//! # Architecture: The Article Pipeline
//!
//! Every article flows through three independent stages:
//!
//! ```text
//! 1. Scan      articles/*.md  →  (title, body)     (embed directives expanded)
//! 2. Render    body           →  HTML fragment     (highlighted code blocks)
//! 3. Generate  articles       →  public/           (pages + index + manifest)
//! ```
//!
//! The scan stage is where the interesting parsing lives: a line-oriented
//! state machine pulls the title off the mandatory `# ` heading and replaces
//! embed directives with regions extracted from arbitrary source files,
//! dedented and re-fenced for highlighting. The render stage is a single
//! walk over the Markdown event stream that swaps every fenced code block
//! for class-annotated highlighter output, anchors headings, and absolutizes
//! root-relative links.
//!
//! Articles are independent of each other, so the generate stage processes
//! them in parallel — one task per article, each writing only its own page,
//! with the join barrier propagating the first failure.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1 — line scanner: title extraction, embed expansion |
//! | [`embed`] | Marker-delimited region extraction from source files |
//! | [`dedent`] | Margin removal for embedded regions |
//! | [`render`] | Stage 2 — Markdown to HTML with the code-block hook |
//! | [`highlight`] | syntect adapter emitting class-based markup |
//! | [`generate`] | Stage 3 — parallel build, page templates, site manifest |
//! | [`history`] | Last-modified dates from git |
//! | [`types`] | Shared types (`Article`, `SiteConfig`) |
//!
//! # Design Decisions
//!
//! ## Fail-Fast Builds
//!
//! Bad input — a missing title, a malformed embed directive, a marker that
//! doesn't exist — aborts the whole build with a one-line diagnostic naming
//! the file and the violated expectation. A half-broken article never ships
//! silently, and a full rebuild is cheap and idempotent, so there is nothing
//! to recover.
//!
//! ## Class-Based Highlighting
//!
//! The highlighter emits CSS classes, not inline colors. The stylesheet owns
//! the presentation: changing the color scheme is a CSS edit, not a rebuild,
//! and the generated HTML stays readable.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system. Malformed markup is a build error, template variables
//! are Rust expressions, and all interpolation is auto-escaped — the
//! rendered article body is the only deliberate `PreEscaped` insertion.
//!
//! ## Dates From Git, Not mtime
//!
//! An mtime changes on every checkout; a commit date does not. The
//! [`history::History`] trait keeps the git dependency at the edge so tests
//! run against plain temp directories.

pub mod dedent;
pub mod embed;
pub mod generate;
pub mod highlight;
pub mod history;
pub mod render;
pub mod scan;
pub mod types;
