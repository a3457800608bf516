//! Show a single post with its rendered content

use anyhow::Result;
use std::io::Write;

use crate::helpers;
use crate::Folio;

/// Print the post with `slug`, its rendered body, neighbors and related posts
pub fn run(folio: &Folio, slug: &str, out: &mut impl Write) -> Result<()> {
    let store = &folio.store;
    let Some(post) = store.find_by_slug(slug) else {
        anyhow::bail!("Post not found: {}", slug);
    };

    let config = &folio.config;
    writeln!(out, "{}", post.title)?;
    writeln!(
        out,
        "{} · {} min read · {}",
        helpers::format_date(&post.date, &config.date_format),
        post.read_time,
        post.category
    )?;
    writeln!(out, "By {}", post.author)?;
    if !post.tags.is_empty() {
        writeln!(out, "Tags: {}", post.tags.join(", "))?;
    }
    writeln!(out, "URL: {}", helpers::full_url_for(config, &post.permalink(config)))?;
    writeln!(out)?;

    let fragment = folio.renderer().render(&post.content);
    writeln!(out, "{}", fragment)?;
    writeln!(out)?;

    let (newer, older) = store.neighbors(slug);
    if let Some(newer) = newer {
        writeln!(out, "Newer: {} [{}]", newer.title, newer.slug)?;
    }
    if let Some(older) = older {
        writeln!(out, "Older: {} [{}]", older.title, older.slug)?;
    }

    let related = store.list_related(&post.id, config.related_count);
    if !related.is_empty() {
        writeln!(out, "Related posts:")?;
        for related_post in related {
            writeln!(
                out,
                "  {} · {} · {} min read [{}]",
                related_post.title,
                helpers::format_date(&related_post.date, &config.date_format),
                related_post.read_time,
                related_post.slug
            )?;
        }
    }

    Ok(())
}
