//! Filesystem sink — output-path derivation and writes.
//!
//! The generated file for a source keeps the source's directory structure
//! under the test directory, with the leaf renamed to
//! `test_<stem>-auto-generated.es6.js`. Existing files are overwritten.

use crate::model::strip_source_suffix;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Derive the on-disk path for a source's generated test file.
///
/// Accepts the source name with or without its `.js`/`.es6.js` suffix;
/// `media/js/views/cart.es6.js` under test dir `tests/js/doctests` lands at
/// `tests/js/doctests/media/js/views/test_cart-auto-generated.es6.js`.
/// Absolute source names are treated as relative to the test directory.
pub fn output_path(test_dir: &Path, source_name: &str) -> PathBuf {
    let stripped = strip_source_suffix(source_name);
    let (dirs, stem) = match stripped.rfind('/') {
        Some(idx) => (&stripped[..idx], &stripped[idx + 1..]),
        None => ("", stripped),
    };
    let mut path = test_dir.to_path_buf();
    // `push` would swap the whole path for an absolute segment.
    let dirs = dirs.trim_start_matches('/');
    if !dirs.is_empty() {
        path.push(dirs);
    }
    path.push(format!("test_{stem}-auto-generated.es6.js"));
    path
}

/// Write one generated file, creating intermediate directories as needed.
pub fn write_generated(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory: {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

/// Remove the whole test directory so stale generated files don't linger.
/// A directory that doesn't exist yet is fine.
pub fn clean_dir(test_dir: &Path) -> Result<()> {
    if !test_dir.exists() {
        return Ok(());
    }
    fs::remove_dir_all(test_dir)
        .with_context(|| format!("failed to clean output directory: {}", test_dir.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_keeps_source_directories() {
        let path = output_path(Path::new("tests/js/doctests"), "media/js/views/cart.es6.js");
        assert_eq!(
            path,
            PathBuf::from("tests/js/doctests/media/js/views/test_cart-auto-generated.es6.js")
        );
    }

    #[test]
    fn path_for_bare_filename() {
        let path = output_path(Path::new("out"), "cart.js");
        assert_eq!(path, PathBuf::from("out/test_cart-auto-generated.es6.js"));
    }

    #[test]
    fn path_without_known_suffix_used_whole() {
        let path = output_path(Path::new("out"), "js/cart.jsx");
        assert_eq!(path, PathBuf::from("out/js/test_cart.jsx-auto-generated.es6.js"));
    }

    #[test]
    fn path_for_absolute_source_stays_under_test_dir() {
        let path = output_path(Path::new("out"), "/srv/app/js/cart.js");
        assert_eq!(
            path,
            PathBuf::from("out/srv/app/js/test_cart-auto-generated.es6.js")
        );
    }

    #[test]
    fn write_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/test_x-auto-generated.es6.js");
        write_generated(&path, "// generated\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "// generated\n");
    }

    #[test]
    fn write_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_x-auto-generated.es6.js");
        write_generated(&path, "first\n").unwrap();
        write_generated(&path, "second\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second\n");
    }

    #[test]
    fn clean_removes_directory_and_tolerates_absence() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("doctests");
        write_generated(&target.join("test_a-auto-generated.es6.js"), "x").unwrap();
        clean_dir(&target).unwrap();
        assert!(!target.exists());
        clean_dir(&target).unwrap();
    }
}
