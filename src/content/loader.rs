//! Seed loader - builds posts from YAML seed records

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use super::stats;
use super::Post;
use crate::helpers::deserialize_date;

/// Seed shipped with the binary
pub const EMBEDDED_SEED: &str = include_str!("../../seed/posts.yml");

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrVec {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<StringOrVec>::deserialize(deserializer)? {
        Some(StringOrVec::One(tag)) => vec![tag],
        Some(StringOrVec::Many(tags)) => tags,
        None => Vec::new(),
    })
}

/// One post as written in a seed file
#[derive(Debug, Clone, Deserialize)]
pub struct PostRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: String,
    #[serde(deserialize_with = "deserialize_date")]
    pub date: NaiveDate,
    #[serde(default)]
    pub category: String,
    #[serde(default, deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image: String,
    #[serde(default, alias = "readTime")]
    pub read_time: Option<u32>,
}

impl PostRecord {
    /// Turn a seed record into a post, filling derived fields
    pub fn into_post(self) -> Post {
        let slug = self.slug.unwrap_or_else(|| {
            let slug = slug::slugify(&self.title);
            tracing::warn!("Post {} has no slug, derived {:?} from title", self.id, slug);
            slug
        });
        let read_time = self
            .read_time
            .unwrap_or_else(|| stats::estimate_read_time(&self.content));

        Post {
            id: self.id,
            title: self.title,
            slug,
            excerpt: self.excerpt,
            content: self.content,
            author: self.author,
            date: self.date,
            category: self.category,
            tags: self.tags,
            image: self.image,
            read_time,
        }
    }
}

/// Parse a YAML list of seed records into posts, in seed order
pub fn parse_posts(yaml: &str) -> Result<Vec<Post>, serde_yaml::Error> {
    let records: Vec<PostRecord> = serde_yaml::from_str(yaml)?;
    Ok(records.into_iter().map(PostRecord::into_post).collect())
}
