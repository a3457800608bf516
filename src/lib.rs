//! folio-rs: blog content for a personal portfolio site
//!
//! This crate provides the read-only post store behind the blog, the
//! queries the site's pages run against it (by slug, newest first, recent,
//! related), and the renderer that turns a post's restricted markdown into
//! markup for display.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use content::{ContentRenderer, PostStore};

/// The main Folio application
#[derive(Debug, Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
    /// Seeded, read-only post store
    pub store: PostStore,
}

impl Folio {
    /// Create a new Folio instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Self::with_config(base_dir, config)
    }

    /// Create a Folio instance from an explicit configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Result<Self> {
        let store = match &config.posts_file {
            Some(file) => {
                let path = base_dir.join(file);
                PostStore::load(&path)
                    .with_context(|| format!("failed to load posts from {:?}", path))?
            }
            None => PostStore::seeded().context("embedded seed is invalid")?,
        };

        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            public_dir,
            store,
        })
    }

    /// Renderer configured with the site's content trust level
    pub fn renderer(&self) -> ContentRenderer {
        ContentRenderer::with_trust(self.config.content_trust)
    }

    /// Directory the blog export is written to
    pub fn export_dir(&self) -> PathBuf {
        self.public_dir.join(self.config.blog_dir.trim_matches('/'))
    }

    /// Export the blog as JSON
    pub fn export(&self) -> Result<()> {
        commands::export::run(self)
    }

    /// Remove the blog export
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_new_without_config_uses_seed() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(folio.store.len(), 3);
        assert_eq!(folio.export_dir(), dir.path().join("public").join("blog"));
    }

    #[test]
    fn test_new_with_posts_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("_config.yml"), "posts_file: posts.yml\n").unwrap();
        fs::write(
            dir.path().join("posts.yml"),
            "- id: \"7\"\n  title: Custom\n  date: \"2024-05-01\"\n",
        )
        .unwrap();

        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(folio.store.len(), 1);
        assert!(folio.store.find_by_slug("custom").is_some());
    }

    #[test]
    fn test_new_rejects_bad_date_format() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("_config.yml"), "date_format: \"100% YYYY\"\n").unwrap();
        assert!(Folio::new(dir.path()).is_err());
    }

    #[test]
    fn test_new_with_missing_posts_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("_config.yml"), "posts_file: nope.yml\n").unwrap();
        assert!(Folio::new(dir.path()).is_err());
    }
}
