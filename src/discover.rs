//! Candidate file discovery.
//!
//! Produces a lazy walk over the root directory yielding regular files
//! whose extension matches the source format. The walk is restartable:
//! calling [`candidates`] again starts a fresh traversal.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

/// Enumerate candidate files under `root` with the given extension.
///
/// The extension match is case-insensitive (`.html` matches `.HTML`).
/// Validates the root up front so a missing or unreadable root fails
/// before any file is processed; entries that become unreadable mid-walk
/// are logged and skipped.
pub fn candidates(
    root: &Path,
    source_ext: &str,
) -> Result<impl Iterator<Item = PathBuf>> {
    let root = dunce::canonicalize(root)
        .with_context(|| format!("Root directory not found: {}", root.display()))?;
    if !root.is_dir() {
        anyhow::bail!("Root is not a directory: {}", root.display());
    }

    let ext = source_ext.trim_start_matches('.').to_ascii_lowercase();

    let iter = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !e.path_is_symlink())
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                tracing::warn!(error = %err, "Skipping unreadable entry");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter(move |e| {
            e.path()
                .extension()
                .and_then(|x| x.to_str())
                .map(|x| x.eq_ignore_ascii_case(&ext))
                .unwrap_or(false)
        })
        .map(|e| e.into_path());

    Ok(iter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "<p>x</p>").unwrap();
    }

    #[test]
    fn test_finds_nested_html() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a.html"));
        touch(&dir.path().join("sub/b.html"));
        touch(&dir.path().join("sub/deep/c.html"));
        touch(&dir.path().join("sub/notes.txt"));

        let mut found: Vec<String> = candidates(dir.path(), ".html")
            .unwrap()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        found.sort();
        assert_eq!(found, ["a.html", "b.html", "c.html"]);
    }

    #[test]
    fn test_extension_match_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("Upper.HTML"));
        let found: Vec<PathBuf> = candidates(dir.path(), ".html").unwrap().collect();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_empty_tree_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("readme.md"));
        assert_eq!(candidates(dir.path(), ".html").unwrap().count(), 0);
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(candidates(&missing, ".html").is_err());
    }

    #[test]
    fn test_restartable() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("a.html"));
        assert_eq!(candidates(dir.path(), ".html").unwrap().count(), 1);
        assert_eq!(candidates(dir.path(), ".html").unwrap().count(), 1);
    }

    #[test]
    fn test_html_dir_name_is_not_a_candidate() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("assets.html")).unwrap();
        touch(&dir.path().join("assets.html/page.html"));
        let found: Vec<PathBuf> = candidates(dir.path(), ".html").unwrap().collect();
        // Only the file inside, not the directory itself
        assert_eq!(found.len(), 1);
        assert!(found[0].ends_with("page.html"));
    }
}
