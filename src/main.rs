use clap::{Parser, Subcommand};
use letterpress::generate;
use letterpress::types::SiteConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "letterpress")]
#[command(about = "Static site generator for personal technical blogs")]
#[command(long_about = "\
Static site generator for personal technical blogs

Markdown files under the articles directory become HTML pages. An article's
first line is its title (# Intro); its last-modified date comes from git.

Articles can embed regions of real source files as highlighted code blocks:

  ```embed
  code/sample.rb greet

pulls the lines between the \"begindoc: greet\" and \"enddoc: greet\" magic
comments out of code/sample.rb, dedents them, and fences them as Ruby.")]
#[command(version)]
struct Cli {
    /// Articles directory
    #[arg(long, default_value = "articles", global = true)]
    articles: PathBuf,

    /// Output directory
    #[arg(long, default_value = "public", global = true)]
    output: PathBuf,

    /// Project root that embed directive paths are resolved against
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Canonical site URL, prefixed onto root-relative links
    #[arg(long, default_value = "", global = true)]
    base_url: String,

    /// Site title shown in page headers
    #[arg(long, default_value = "Articles", global = true)]
    title: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the site: scan, render, and write every article
    Build,
    /// Validate all articles without writing output
    Check,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = SiteConfig {
        title: cli.title,
        base_url: cli.base_url,
        articles_dir: cli.articles,
        output_dir: cli.output,
        project_root: cli.root,
    };

    match cli.command {
        Command::Build => {
            let articles = generate::build(&config)?;
            println!(
                "Built {} articles at {}",
                articles.len(),
                config.output_dir.display()
            );
        }
        Command::Check => {
            let count = generate::check(&config)?;
            println!("{count} articles OK");
        }
    }

    Ok(())
}
