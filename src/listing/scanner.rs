//! Category folder enumeration.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// A category folder under the documents root.
///
/// `label` is for display and may be lossy for names that are not valid
/// UTF-8; `path` is always the folder as found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDir {
    /// Folder name as printed in the listing
    pub label: String,
    /// Folder path
    pub path: PathBuf,
}

/// Lists category folders under the documents root and the files they hold.
#[derive(Debug, Clone)]
pub struct CategoryScanner {
    root: PathBuf,
    excluded_marker: char,
}

impl CategoryScanner {
    /// Create a scanner for a documents root.
    pub fn new(root: impl Into<PathBuf>, excluded_marker: char) -> Self {
        Self {
            root: root.into(),
            excluded_marker,
        }
    }

    /// Documents root being scanned.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Category folders in case-sensitive ascending order of name, without
    /// the excluded ones.
    pub fn list_categories(&self) -> Result<Vec<CategoryDir>> {
        let entries = fs::read_dir(&self.root).map_err(|e| Error::from_listing(&self.root, e))?;

        let mut folders: Vec<(OsString, PathBuf)> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::from_listing(&self.root, e))?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let name = entry.file_name();
            if name.to_string_lossy().starts_with(self.excluded_marker) {
                log::debug!("Skipping excluded category {}", name.to_string_lossy());
                continue;
            }
            if name.to_str().is_none() {
                log::warn!("Category folder name is not valid UTF-8: {}", path.display());
            }
            folders.push((name, path));
        }

        folders.sort();
        log::debug!("Found {} categories in {}", folders.len(), self.root.display());
        Ok(folders
            .into_iter()
            .map(|(name, path)| CategoryDir {
                label: name.to_string_lossy().into_owned(),
                path,
            })
            .collect())
    }

    /// Names of the regular files directly inside a category, sorted.
    pub fn list_files(&self, category: &CategoryDir) -> Result<Vec<String>> {
        let dir = &category.path;
        let entries = fs::read_dir(dir).map_err(|e| Error::from_listing(dir, e))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::from_listing(dir, e))?;
            if entry.path().is_file() {
                files.push(entry.file_name().to_string_lossy().into_owned());
            }
        }

        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b", "A", "#old", "a"] {
            fs::create_dir(dir.path().join(name)).unwrap();
        }
        fs::write(dir.path().join("readme.txt"), b"").unwrap();

        let scanner = CategoryScanner::new(dir.path(), '#');
        let labels: Vec<_> = scanner
            .list_categories()
            .unwrap()
            .into_iter()
            .map(|c| c.label)
            .collect();
        assert_eq!(labels, vec!["A", "a", "b"]);
    }

    #[test]
    fn test_list_files_skips_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        let category = dir.path().join("Plans");
        fs::create_dir_all(category.join("archive")).unwrap();
        fs::write(category.join("2-B-A(1).pdf"), b"").unwrap();
        fs::write(category.join("1-A-A(1).pdf"), b"").unwrap();

        let scanner = CategoryScanner::new(dir.path(), '#');
        let plans = &scanner.list_categories().unwrap()[0];
        assert_eq!(plans.path, category);
        assert_eq!(scanner.list_files(plans).unwrap(), vec!["1-A-A(1).pdf", "2-B-A(1).pdf"]);
    }

    #[test]
    fn test_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let scanner = CategoryScanner::new(dir.path().join("missing"), '#');
        assert!(matches!(scanner.list_categories(), Err(Error::DirectoryMissing(_))));
    }

    #[test]
    fn test_missing_category() {
        let dir = tempfile::tempdir().unwrap();
        let scanner = CategoryScanner::new(dir.path(), '#');
        let gone = CategoryDir {
            label: "nope".to_string(),
            path: dir.path().join("nope"),
        };
        assert!(matches!(scanner.list_files(&gone), Err(Error::DirectoryMissing(_))));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_non_utf8_category_still_listed() {
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let category = dir.path().join(std::ffi::OsStr::from_bytes(b"Plans\xff"));
        fs::create_dir(&category).unwrap();
        fs::write(category.join("1-Massif-A(1).pdf"), b"").unwrap();

        let scanner = CategoryScanner::new(dir.path(), '#');
        let categories = scanner.list_categories().unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].label, "Plans\u{FFFD}");
        assert_eq!(categories[0].path, category);
        assert_eq!(scanner.list_files(&categories[0]).unwrap(), vec!["1-Massif-A(1).pdf"]);
    }
}
