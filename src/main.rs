//! CLI entry point for folio

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_rs::commands;
use folio_rs::Folio;

#[derive(Parser)]
#[command(name = "folio")]
#[command(author = "Pascal Riemer")]
#[command(version)]
#[command(about = "Blog content tools for a personal portfolio site", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List site information
    #[command(alias = "ls")]
    List {
        /// Type of content to list (post, tag, category)
        #[arg(default_value = "post")]
        r#type: String,

        /// Only list posts with this tag
        #[arg(long)]
        tag: Option<String>,

        /// Only list posts in this category
        #[arg(long)]
        category: Option<String>,
    },

    /// Show the most recent posts
    Recent {
        /// Number of posts (defaults to recent_count)
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },

    /// Show a post with its rendered content
    Show {
        /// Slug of the post
        slug: String,
    },

    /// Show posts related to a post
    Related {
        /// Id of the anchor post
        id: String,

        /// Number of posts (defaults to related_count)
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },

    /// Render a markdown file (or stdin) to markup
    Render {
        /// File to render
        file: Option<PathBuf>,

        /// Escape HTML in the input before rendering
        #[arg(long)]
        untrusted: bool,
    },

    /// Export the blog as JSON
    Export,

    /// Remove the exported blog
    Clean,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio_rs=debug,info"
    } else {
        "folio_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("failed to read current directory")?,
    };

    let load = || Folio::new(&base_dir);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::List {
            r#type,
            tag,
            category,
        } => {
            let filter = commands::list::PostFilter {
                tag: tag.as_deref(),
                category: category.as_deref(),
            };
            commands::list::run(&load()?, &r#type, filter, &mut out)?
        }

        Commands::Recent { count } => commands::query::recent(&load()?, count, &mut out)?,

        Commands::Show { slug } => commands::show::run(&load()?, &slug, &mut out)?,

        Commands::Related { id, count } => {
            commands::query::related(&load()?, &id, count, &mut out)?
        }

        Commands::Render { file, untrusted } => {
            commands::render::run(&load()?, file.as_deref(), untrusted, &mut out)?
        }

        Commands::Export => {
            let folio = load()?;
            tracing::info!("Exporting blog to {:?}", folio.export_dir());
            folio.export()?;
            writeln!(out, "Exported successfully!")?;
        }

        Commands::Clean => {
            let folio = load()?;
            tracing::info!("Cleaning export folder...");
            folio.clean()?;
            writeln!(out, "Cleaned successfully!")?;
        }

        Commands::Version => {
            writeln!(out, "folio version {}", env!("CARGO_PKG_VERSION"))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_filters() {
        let cli = Cli::try_parse_from(["folio", "ls", "post", "--tag", "CSS"]).unwrap();
        match cli.command {
            Commands::List { r#type, tag, category } => {
                assert_eq!(r#type, "post");
                assert_eq!(tag.as_deref(), Some("CSS"));
                assert!(category.is_none());
            }
            _ => panic!("expected list command"),
        }
    }

    #[test]
    fn test_export_has_no_short_alias() {
        assert!(Cli::try_parse_from(["folio", "export"]).is_ok());
        assert!(Cli::try_parse_from(["folio", "g"]).is_err());
    }
}
