//! Recent and related post listings

use anyhow::Result;
use std::io::Write;

use super::list::write_post_line;
use crate::Folio;

/// Print the `count` newest posts
pub fn recent(folio: &Folio, count: Option<usize>, out: &mut impl Write) -> Result<()> {
    let count = count.unwrap_or(folio.config.recent_count);
    let posts = folio.store.list_recent(count);

    writeln!(out, "Recent posts ({}):", posts.len())?;
    for post in posts {
        write_post_line(out, post)?;
    }
    Ok(())
}

/// Print posts related to the post with `id`
pub fn related(folio: &Folio, id: &str, count: Option<usize>, out: &mut impl Write) -> Result<()> {
    let count = count.unwrap_or(folio.config.related_count);

    if folio.store.find_by_id(id).is_none() {
        tracing::debug!("No post with id {:?}, nothing is related", id);
    }

    let posts = folio.store.list_related(id, count);
    writeln!(out, "Related to {} ({}):", id, posts.len())?;
    for post in posts {
        write_post_line(out, post)?;
    }
    Ok(())
}
