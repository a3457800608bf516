//! Post store and the queries over it
//!
//! The store is seeded once and never mutated. Every query recomputes its
//! answer from the seed list; collections are small, so nothing is cached.

use indexmap::IndexMap;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use super::loader::{self, EMBEDDED_SEED};
use super::Post;

/// Errors raised while building a store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Duplicate post id: {0}")]
    DuplicateId(String),

    #[error("Duplicate slug {slug:?} (post {id})")]
    DuplicateSlug { id: String, slug: String },

    #[error("Slug {slug:?} of post {id} is not lowercase kebab-case")]
    InvalidSlug { id: String, slug: String },

    #[error("Invalid seed: {0}")]
    Seed(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Immutable, shared collection of posts
#[derive(Debug, Clone)]
pub struct PostStore {
    posts: Arc<[Post]>,
}

impl PostStore {
    /// Build a store, checking id and slug invariants
    pub fn new(posts: Vec<Post>) -> Result<Self, StoreError> {
        let mut ids = HashSet::new();
        let mut slugs = HashSet::new();

        for post in &posts {
            if !ids.insert(post.id.as_str()) {
                return Err(StoreError::DuplicateId(post.id.clone()));
            }
            if !is_valid_slug(&post.slug) {
                return Err(StoreError::InvalidSlug {
                    id: post.id.clone(),
                    slug: post.slug.clone(),
                });
            }
            if !slugs.insert(post.slug.as_str()) {
                return Err(StoreError::DuplicateSlug {
                    id: post.id.clone(),
                    slug: post.slug.clone(),
                });
            }
        }

        tracing::debug!("Seeded post store with {} posts", posts.len());
        Ok(Self {
            posts: posts.into(),
        })
    }

    /// Store built from the seed embedded in the binary
    pub fn seeded() -> Result<Self, StoreError> {
        Self::from_yaml(EMBEDDED_SEED)
    }

    /// Store built from YAML seed records
    pub fn from_yaml(yaml: &str) -> Result<Self, StoreError> {
        Self::new(loader::parse_posts(yaml)?)
    }

    /// Store built from a YAML seed file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let content = fs::read_to_string(path.as_ref())?;
        tracing::debug!("Loading posts from {:?}", path.as_ref());
        Self::from_yaml(&content)
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Posts in seed order
    pub fn iter(&self) -> impl Iterator<Item = &Post> {
        self.posts.iter()
    }

    /// Look up a post by its slug
    pub fn find_by_slug(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|post| post.slug == slug)
    }

    /// Look up a post by its id
    pub fn find_by_id(&self, id: &str) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }

    /// All posts, newest first
    pub fn list_all(&self) -> Vec<&Post> {
        let mut posts: Vec<&Post> = self.posts.iter().collect();
        // Stable: posts sharing a date keep seed order
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        posts
    }

    /// The `count` newest posts
    pub fn list_recent(&self, count: usize) -> Vec<&Post> {
        let mut posts = self.list_all();
        posts.truncate(count);
        posts
    }

    /// Up to `count` posts related to the post with `id`
    ///
    /// Candidates are ranked by how many tags they share with the anchor,
    /// then by date, newest first. An unknown anchor has no related posts.
    pub fn list_related(&self, id: &str, count: usize) -> Vec<&Post> {
        let Some(anchor) = self.find_by_id(id) else {
            return Vec::new();
        };

        let mut ranked: Vec<(usize, &Post)> = self
            .posts
            .iter()
            .filter(|post| post.id != anchor.id)
            .map(|post| (post.shared_tags(anchor), post))
            .collect();

        ranked.sort_by(|(a_shared, a), (b_shared, b)| {
            b_shared.cmp(a_shared).then_with(|| b.date.cmp(&a.date))
        });

        ranked
            .into_iter()
            .take(count)
            .map(|(_, post)| post)
            .collect()
    }

    /// Newer and older neighbors of the post with `slug`, in `list_all` order
    pub fn neighbors(&self, slug: &str) -> (Option<&Post>, Option<&Post>) {
        let posts = self.list_all();
        let Some(pos) = posts.iter().position(|p| p.slug == slug) else {
            return (None, None);
        };

        let newer = pos.checked_sub(1).map(|i| posts[i]);
        let older = posts.get(pos + 1).copied();
        (newer, older)
    }

    /// Newest-first posts carrying `tag`
    pub fn by_tag(&self, tag: &str) -> Vec<&Post> {
        self.list_all()
            .into_iter()
            .filter(|post| post.has_tag(tag))
            .collect()
    }

    /// Newest-first posts in `category`
    pub fn by_category(&self, category: &str) -> Vec<&Post> {
        self.list_all()
            .into_iter()
            .filter(|post| post.category == category)
            .collect()
    }

    /// Tag usage counts, most used first
    pub fn tags(&self) -> IndexMap<&str, usize> {
        count_labels(self.posts.iter().flat_map(|p| p.tags.iter().map(String::as_str)))
    }

    /// Category usage counts, most used first
    pub fn categories(&self) -> IndexMap<&str, usize> {
        count_labels(
            self.posts
                .iter()
                .map(|p| p.category.as_str())
                .filter(|c| !c.is_empty()),
        )
    }
}

/// Count labels, ordered by count descending then first appearance
fn count_labels<'a>(labels: impl Iterator<Item = &'a str>) -> IndexMap<&'a str, usize> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }
    counts.sort_by(|_, a, _, b| b.cmp(a));
    counts
}

/// A slug is valid when slugifying it is a no-op
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && slug::slugify(slug) == slug
}
