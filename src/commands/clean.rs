//! Clean the blog export

use anyhow::Result;
use std::fs;

use crate::Folio;

/// Remove the exported blog directory
pub fn run(folio: &Folio) -> Result<()> {
    let export_dir = folio.export_dir();
    if export_dir.exists() {
        fs::remove_dir_all(&export_dir)?;
        tracing::info!("Deleted: {:?}", export_dir);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_removes_export() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        folio.export().unwrap();
        assert!(folio.export_dir().join("index.json").exists());

        folio.clean().unwrap();
        assert!(!folio.export_dir().exists());

        // Cleaning twice is fine
        folio.clean().unwrap();
    }
}
