//! Post model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::SiteConfig;
use crate::helpers;

/// A blog post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Stable unique identifier
    pub id: String,

    /// Post title
    pub title: String,

    /// URL-friendly name, unique across the store
    pub slug: String,

    /// Short summary shown in listings
    pub excerpt: String,

    /// Raw restricted-markdown body
    pub content: String,

    /// Author display name
    pub author: String,

    /// Publication date
    pub date: NaiveDate,

    /// Single category label
    pub category: String,

    /// Post tags, in display order
    pub tags: Vec<String>,

    /// Cover image reference
    pub image: String,

    /// Estimated read time in minutes
    pub read_time: u32,
}

impl Post {
    /// Create a new post with minimal required fields
    pub fn new(id: impl Into<String>, title: impl Into<String>, date: NaiveDate) -> Self {
        let title = title.into();
        let slug = slug::slugify(&title);
        Self {
            id: id.into(),
            title,
            slug,
            excerpt: String::new(),
            content: String::new(),
            author: String::new(),
            date,
            category: String::new(),
            tags: Vec::new(),
            image: String::new(),
            read_time: 1,
        }
    }

    /// Number of this post's tags that `other` also carries
    pub fn shared_tags(&self, other: &Post) -> usize {
        self.tags
            .iter()
            .filter(|tag| other.tags.contains(tag))
            .count()
    }

    /// Whether the post carries `tag`
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Site-relative path of the post page
    pub fn permalink(&self, config: &SiteConfig) -> String {
        helpers::post_path(config, &self.slug)
    }
}

/// Listing view of a post, without the body
#[derive(Debug, Clone, Serialize)]
pub struct PostSummary {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub author: String,
    pub date: String,
    pub display_date: String,
    pub category: String,
    pub tags: Vec<String>,
    pub image: String,
    pub read_time: u32,
    pub path: String,
}

impl PostSummary {
    pub fn new(post: &Post, config: &SiteConfig) -> Self {
        Self {
            id: post.id.clone(),
            title: post.title.clone(),
            slug: post.slug.clone(),
            excerpt: post.excerpt.clone(),
            author: post.author.clone(),
            date: helpers::date_xml(&post.date),
            display_date: helpers::format_date(&post.date, &config.date_format),
            category: post.category.clone(),
            tags: post.tags.clone(),
            image: post.image.clone(),
            read_time: post.read_time,
            path: post.permalink(config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_with_tags(id: &str, tags: &[&str]) -> Post {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let mut post = Post::new(id, format!("Post {}", id), date);
        post.tags = tags.iter().map(|t| t.to_string()).collect();
        post
    }

    #[test]
    fn test_new_derives_slug() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        let post = Post::new("1", "Building Responsive UIs with Tailwind CSS", date);
        assert_eq!(post.slug, "building-responsive-uis-with-tailwind-css");
    }

    #[test]
    fn test_shared_tags() {
        let anchor = post_with_tags("1", &["A", "B"]);
        assert_eq!(post_with_tags("2", &["A", "B", "C"]).shared_tags(&anchor), 2);
        assert_eq!(post_with_tags("3", &["B"]).shared_tags(&anchor), 1);
        assert_eq!(post_with_tags("4", &[]).shared_tags(&anchor), 0);
    }

    #[test]
    fn test_summary_formats_dates() {
        let date = NaiveDate::from_ymd_opt(2025, 2, 10).unwrap();
        let post = Post::new("3", "Designing Effective User Experiences", date);
        let summary = PostSummary::new(&post, &SiteConfig::default());
        assert_eq!(summary.date, "2025-02-10");
        assert_eq!(summary.display_date, "February 10, 2025");
        assert_eq!(summary.path, "/blog/designing-effective-user-experiences/");
    }
}
