//! Render arbitrary restricted-markdown text

use anyhow::{Context, Result};
use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use crate::content::{ContentRenderer, Trust};
use crate::Folio;

/// Render `file` (or stdin when `None`) and write the fragment to `out`
pub fn run(folio: &Folio, file: Option<&Path>, untrusted: bool, out: &mut impl Write) -> Result<()> {
    let raw = match file {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("failed to read {:?}", path))?
        }
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let renderer = if untrusted {
        ContentRenderer::with_trust(Trust::Untrusted)
    } else {
        folio.renderer()
    };
    tracing::debug!("Rendering with trust level {:?}", renderer.trust());

    writeln!(out, "{}", renderer.render(&raw))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_file() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        let path = dir.path().join("draft.md");
        fs::write(&path, "## Hi\n<b>bold</b>").unwrap();

        let mut out = Vec::new();
        run(&folio, Some(path.as_path()), false, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "<h2 class=\"text-2xl font-bold my-5\">Hi</h2>\n<b>bold</b>\n"
        );

        let mut out = Vec::new();
        run(&folio, Some(path.as_path()), true, &mut out).unwrap();
        assert!(String::from_utf8(out)
            .unwrap()
            .contains("<p class=\"my-4\">&lt;b&gt;bold&lt;/b&gt;</p>"));
    }

    #[test]
    fn test_render_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        let mut out = Vec::new();
        assert!(run(&folio, Some(dir.path().join("nope.md").as_path()), false, &mut out).is_err());
    }
}
