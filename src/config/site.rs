//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::content::Trust;
use crate::helpers;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,

    // URL
    pub url: String,
    pub root: String,
    pub blog_dir: String,

    // Directory
    pub public_dir: String,
    /// Seed file with post records; the embedded seed is used when unset
    pub posts_file: Option<String>,

    // Listing
    pub recent_count: usize,
    pub related_count: usize,
    pub date_format: String,

    // Rendering
    pub content_trust: Trust,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            description: String::new(),
            author: "Pascal Riemer".to_string(),

            url: "http://localhost:3000".to_string(),
            root: "/".to_string(),
            blog_dir: "blog".to_string(),

            public_dir: "public".to_string(),
            posts_file: None,

            recent_count: 3,
            related_count: 2,
            date_format: "MMMM D, YYYY".to_string(),

            content_trust: Trust::Trusted,

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {:?}", path))?;
        let config = Self::parse(&content)
            .with_context(|| format!("failed to parse config {:?}", path))?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Parse configuration from YAML text
    pub fn parse(content: &str) -> Result<Self> {
        // An empty file deserializes to unit, which serde_yaml rejects for structs
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content)?;
        if !helpers::is_valid_format(&config.date_format) {
            anyhow::bail!("Invalid date_format: {:?}", config.date_format);
        }
        Ok(config)
    }
}
