//! Export the blog as JSON for the presentation layer

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::content::{Fragment, PostSummary};
use crate::Folio;

/// Everything a post page needs
#[derive(Debug, Serialize)]
struct PostPage<'a> {
    #[serde(flatten)]
    summary: PostSummary,
    content: &'a str,
    html: Fragment,
    newer: Option<&'a str>,
    older: Option<&'a str>,
    related: Vec<&'a str>,
}

/// Write index, recent, tag and per-post JSON files
pub fn run(folio: &Folio) -> Result<()> {
    let start = std::time::Instant::now();
    let store = &folio.store;
    let config = &folio.config;
    let out_dir = folio.export_dir();

    fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create {:?}", out_dir))?;

    let summaries: Vec<PostSummary> = store
        .list_all()
        .into_iter()
        .map(|p| PostSummary::new(p, config))
        .collect();
    write_json(&out_dir.join("index.json"), &summaries)?;

    let recent: Vec<PostSummary> = store
        .list_recent(config.recent_count)
        .into_iter()
        .map(|p| PostSummary::new(p, config))
        .collect();
    write_json(&out_dir.join("recent.json"), &recent)?;

    write_json(&out_dir.join("tags.json"), &store.tags())?;

    let renderer = folio.renderer();
    for post in store.list_all() {
        let (newer, older) = store.neighbors(&post.slug);
        let page = PostPage {
            summary: PostSummary::new(post, config),
            content: &post.content,
            html: renderer.render(&post.content),
            newer: newer.map(|p| p.slug.as_str()),
            older: older.map(|p| p.slug.as_str()),
            related: store
                .list_related(&post.id, config.related_count)
                .into_iter()
                .map(|p| p.slug.as_str())
                .collect(),
        };
        write_json(&out_dir.join(format!("{}.json", post.slug)), &page)?;
    }

    tracing::info!(
        "Exported {} posts to {:?} in {:.2}s",
        store.len(),
        out_dir,
        start.elapsed().as_secs_f64()
    );
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("failed to write {:?}", path))?;
    tracing::info!("Generated {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn read(path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_export_writes_all_files() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        folio.export().unwrap();

        let out = folio.export_dir();
        let index = read(&out.join("index.json"));
        let ids: Vec<&str> = index
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(index[0]["display_date"], "March 3, 2025");
        assert!(index[0].get("content").is_none());

        let recent = read(&out.join("recent.json"));
        assert_eq!(recent.as_array().unwrap().len(), 3);

        let tags = read(&out.join("tags.json"));
        assert_eq!(tags["Frontend"], 2);

        let page = read(&out.join("designing-effective-user-experiences.json"));
        assert_eq!(page["id"], "3");
        assert_eq!(page["newer"], "the-future-of-web-development-with-nextjs");
        assert!(page["older"].is_null());
        assert_eq!(
            page["related"],
            serde_json::json!([
                "building-responsive-uis-with-tailwind-css",
                "the-future-of-web-development-with-nextjs"
            ])
        );
        assert!(page["html"]
            .as_str()
            .unwrap()
            .starts_with("<h1 class=\"text-3xl font-bold my-6\">"));
    }
}
