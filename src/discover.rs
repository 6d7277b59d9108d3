//! Notebook discovery.
//!
//! Expands the configured glob pattern into a sorted list of notebook files.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Collect every regular file matching `pattern`.
///
/// Relative patterns are resolved against `root`. The result is sorted and
/// free of duplicates, so each notebook is processed exactly once. No match
/// is not an error.
pub fn collect_notebooks(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let full_pattern = if Path::new(pattern).is_absolute() {
        pattern.to_owned()
    } else {
        let root = root.to_string_lossy();
        let escaped_root = glob::Pattern::escape(&root);
        format!("{}/{pattern}", escaped_root.trim_end_matches('/'))
    };

    let matches = glob::glob(&full_pattern)
        .with_context(|| format!("Invalid glob pattern: {pattern}"))?;

    let mut files = Vec::new();
    for entry in matches {
        let path = entry.with_context(|| "Failed to read glob entry")?;
        if path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "{}").unwrap();
    }

    #[test]
    fn test_collect_matches_sorted() {
        let dir = TempDir::new().unwrap();
        let nb_dir = dir.path().join("notebooks");
        touch(&nb_dir.join("b.ipynb"));
        touch(&nb_dir.join("a.ipynb"));
        touch(&nb_dir.join("notes.md"));

        let files = collect_notebooks(dir.path(), "notebooks/*.ipynb").unwrap();
        assert_eq!(files, vec![nb_dir.join("a.ipynb"), nb_dir.join("b.ipynb")]);
    }

    #[test]
    fn test_collect_is_not_recursive_for_single_star() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("notebooks/top.ipynb"));
        touch(&dir.path().join("notebooks/nested/deep.ipynb"));

        let files = collect_notebooks(dir.path(), "notebooks/*.ipynb").unwrap();
        assert_eq!(files.len(), 1);

        let files = collect_notebooks(dir.path(), "notebooks/**/*.ipynb").unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_collect_skips_directories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("notebooks/folder.ipynb")).unwrap();

        let files = collect_notebooks(dir.path(), "notebooks/*.ipynb").unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_collect_no_match() {
        let dir = TempDir::new().unwrap();
        let files = collect_notebooks(dir.path(), "notebooks/*.ipynb").unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_collect_absolute_pattern() {
        let dir = TempDir::new().unwrap();
        touch(&dir.path().join("elsewhere/x.ipynb"));

        let pattern = format!("{}/elsewhere/*.ipynb", dir.path().display());
        let files = collect_notebooks(Path::new("/nonexistent"), &pattern).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_collect_invalid_pattern() {
        let dir = TempDir::new().unwrap();
        assert!(collect_notebooks(dir.path(), "notebooks/[*.ipynb").is_err());
    }
}
