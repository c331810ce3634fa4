//! End-to-end build tests over a realistic content tree.

use letterpress::generate::build_with_history;
use letterpress::history::{History, HistoryError};
use letterpress::types::SiteConfig;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

struct FixedHistory;

impl History for FixedHistory {
    fn last_updated(&self, _path: &Path) -> Result<String, HistoryError> {
        Ok("March 14, 2026".to_string())
    }
}

fn site_config(root: &Path) -> SiteConfig {
    SiteConfig {
        title: "Test Blog".to_string(),
        base_url: "https://blog.example.com".to_string(),
        articles_dir: root.join("articles"),
        output_dir: root.join("public"),
        project_root: root.to_path_buf(),
    }
}

/// A project with three articles — one plain, one with an embed, one nested —
/// plus the embed's source file.
fn setup_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    fs::create_dir_all(root.join("articles/notes")).unwrap();
    fs::create_dir_all(root.join("code")).unwrap();

    fs::write(
        root.join("articles/intro.md"),
        "# Intro\n\nHello *world*.\n\nSee [the setup notes](/notes/setup.html).\n",
    )
    .unwrap();

    fs::write(
        root.join("articles/scheduler.md"),
        "# How the Scheduler Works\n\nThe tick loop:\n\n```embed\ncode/scheduler.rb tick\n\nThat's the whole loop.\n",
    )
    .unwrap();

    fs::write(
        root.join("articles/notes/setup.md"),
        "# Setup\n\n## Install\n\nRun the installer.\n",
    )
    .unwrap();

    fs::write(
        root.join("code/scheduler.rb"),
        "class Scheduler\n  # begindoc: tick\n  def tick\n    @queue.pop.run\n  end\n  # enddoc: tick\nend\n",
    )
    .unwrap();

    tmp
}

#[test]
fn build_produces_one_page_per_article() {
    let tmp = setup_project();
    let config = site_config(tmp.path());

    let articles = build_with_history(&FixedHistory, &config).unwrap();

    assert_eq!(articles.len(), 3);
    assert!(config.output_dir.join("intro.html").exists());
    assert!(config.output_dir.join("scheduler.html").exists());
    assert!(config.output_dir.join("notes/setup.html").exists());
}

#[test]
fn rendered_pages_have_expected_content() {
    let tmp = setup_project();
    let config = site_config(tmp.path());
    build_with_history(&FixedHistory, &config).unwrap();

    let intro = fs::read_to_string(config.output_dir.join("intro.html")).unwrap();
    assert!(intro.contains("<em>world</em>"));
    assert!(intro.contains(r#"href="https://blog.example.com/notes/setup.html""#));
    assert!(intro.contains("March 14, 2026"));

    let setup = fs::read_to_string(config.output_dir.join("notes/setup.html")).unwrap();
    assert!(setup.contains(r#"<h2 id="install">"#));
}

#[test]
fn embedded_region_is_dedented_and_highlighted() {
    let tmp = setup_project();
    let config = site_config(tmp.path());
    build_with_history(&FixedHistory, &config).unwrap();

    let page = fs::read_to_string(config.output_dir.join("scheduler.html")).unwrap();
    assert!(page.contains("<pre class=\"highlight\"><code>"));
    assert!(page.contains("tick"));
    assert!(page.contains("@queue"));
    // No embed machinery leaks into the output.
    assert!(!page.contains("```"));
    assert!(!page.contains("begindoc"));
    assert!(!page.contains("enddoc"));
    assert!(page.contains("whole loop"));
}

#[test]
fn index_and_manifest_cover_all_articles() {
    let tmp = setup_project();
    let config = site_config(tmp.path());
    build_with_history(&FixedHistory, &config).unwrap();

    let index = fs::read_to_string(config.output_dir.join("index.html")).unwrap();
    assert!(index.contains(r#"href="/intro.html""#));
    assert!(index.contains(r#"href="/scheduler.html""#));
    assert!(index.contains(r#"href="/notes/setup.html""#));

    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(config.output_dir.join("articles.json")).unwrap())
            .unwrap();
    let ids: Vec<&str> = manifest
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["intro", "notes/setup", "scheduler"]);
}

#[test]
fn rebuild_is_idempotent() {
    let tmp = setup_project();
    let config = site_config(tmp.path());

    build_with_history(&FixedHistory, &config).unwrap();
    let first = fs::read_to_string(config.output_dir.join("scheduler.html")).unwrap();

    build_with_history(&FixedHistory, &config).unwrap();
    let second = fs::read_to_string(config.output_dir.join("scheduler.html")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn bad_article_aborts_without_its_output() {
    let tmp = setup_project();
    fs::write(
        tmp.path().join("articles/broken.md"),
        "# Broken\n\n```embed\ncode/scheduler.rb nosuchregion\n",
    )
    .unwrap();

    let config = site_config(tmp.path());
    let err = build_with_history(&FixedHistory, &config).unwrap_err();

    let msg = err.to_string();
    assert!(msg.contains("begindoc: nosuchregion"));
    assert!(msg.contains("scheduler.rb"));
    assert!(!config.output_dir.join("broken.html").exists());
}
