//! List site content

use anyhow::Result;
use indexmap::IndexMap;
use std::io::Write;

use crate::content::{stats, Post};
use crate::Folio;

/// Narrows a post listing to one tag or category
#[derive(Debug, Clone, Copy, Default)]
pub struct PostFilter<'a> {
    pub tag: Option<&'a str>,
    pub category: Option<&'a str>,
}

/// List site content by type
pub fn run(
    folio: &Folio,
    content_type: &str,
    filter: PostFilter<'_>,
    out: &mut impl Write,
) -> Result<()> {
    let store = &folio.store;

    match content_type {
        "post" | "posts" => {
            let mut posts = match filter.tag {
                Some(tag) => store.by_tag(tag),
                None => store.list_all(),
            };
            if let Some(category) = filter.category {
                let in_category = store.by_category(category);
                posts.retain(|post| in_category.iter().any(|p| p.id == post.id));
            }
            writeln!(out, "Posts ({}):", posts.len())?;
            for post in posts {
                write_post_line(out, post)?;
                writeln!(
                    out,
                    "      {} min read, {} words",
                    post.read_time,
                    stats::word_count(&post.content)
                )?;
            }
        }
        "tag" | "tags" => write_counts(out, "Tags", &store.tags())?,
        "category" | "categories" => write_counts(out, "Categories", &store.categories())?,
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, tag, category",
                content_type
            );
        }
    }

    Ok(())
}

/// One-line listing of a post: date, title and slug
pub fn write_post_line(out: &mut impl Write, post: &Post) -> Result<()> {
    writeln!(
        out,
        "  {} - {} [{}]",
        post.date.format("%Y-%m-%d"),
        post.title,
        post.slug
    )?;
    Ok(())
}

fn write_counts(out: &mut impl Write, heading: &str, counts: &IndexMap<&str, usize>) -> Result<()> {
    writeln!(out, "{} ({}):", heading, counts.len())?;
    for (label, count) in counts {
        writeln!(out, "  {} ({})", label, count)?;
    }
    Ok(())
}
