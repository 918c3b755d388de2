//! Integration tests for scanning a BPE folder into the report model.
//!
//! Each test builds a small project tree in a temporary directory and runs
//! the scanner and assembler over it.

use std::fs;
use std::path::Path;

use bpe_listing::listing::{CategoryScanner, ProjectIdentity, ReportAssembler, HEADER_ROW};
use bpe_listing::Error;
use chrono::NaiveDate;

fn touch(dir: &Path, category: &str, files: &[&str]) {
    let category_dir = dir.join(category);
    fs::create_dir_all(&category_dir).unwrap();
    for file in files {
        fs::write(category_dir.join(file), b"%PDF-1.4").unwrap();
    }
}

fn scan(root: &Path) -> bpe_listing::Report {
    let scanner = CategoryScanner::new(root, '#');
    let categories = scanner
        .list_categories()
        .unwrap()
        .into_iter()
        .map(|dir| {
            let files = scanner.list_files(&dir).unwrap();
            (dir.label, files)
        })
        .collect();
    ReportAssembler::new("pdf").assemble(
        ProjectIdentity::default(),
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
        categories,
    )
}

mod scanner_tests {
    use super::*;

    #[test]
    fn test_excluded_categories_never_listed() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "Génie civil", &["1-Massif-A(1).pdf"]);
        touch(dir.path(), "#Archives", &["1-Massif-0(1).pdf"]);
        touch(dir.path(), "#", &[]);

        let report = scan(dir.path());
        let labels: Vec<_> = report.tables.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, ["Génie civil"]);
    }

    #[test]
    fn test_categories_case_sensitive_order() {
        let dir = tempfile::tempdir().unwrap();
        for category in ["electricite", "Génie civil", "Electricite", "BT"] {
            touch(dir.path(), category, &[]);
        }

        let report = scan(dir.path());
        let labels: Vec<_> = report.tables.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, ["BT", "Electricite", "Génie civil", "electricite"]);
    }

    #[test]
    fn test_loose_files_and_nested_dirs_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("1-Loose-A(1).pdf"), b"").unwrap();
        touch(dir.path(), "Plans", &["1-Massif-A(1).pdf"]);
        fs::create_dir(dir.path().join("Plans").join("Sub")).unwrap();

        let scanner = CategoryScanner::new(dir.path(), '#');
        let categories = scanner.list_categories().unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].label, "Plans");
        assert_eq!(categories[0].path, dir.path().join("Plans"));
        assert_eq!(scanner.list_files(&categories[0]).unwrap(), ["1-Massif-A(1).pdf"]);
    }

    #[test]
    fn test_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let scanner = CategoryScanner::new(dir.path().join("12-BPE"), '#');
        assert!(matches!(scanner.list_categories(), Err(Error::DirectoryMissing(_))));
    }
}

mod report_tests {
    use super::*;

    #[test]
    fn test_rows_sorted_as_strings() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "Plans", &["2-AlimBT-B(1).pdf", "10-AlimBT-A(1).pdf"]);

        let report = scan(dir.path());
        let rows = &report.tables[0].rows;
        assert_eq!(rows[0], HEADER_ROW.map(String::from));
        assert_eq!(rows[1], ["10", "A", "AlimBT", "1"].map(String::from));
        assert_eq!(rows[2], ["2", "B", "AlimBT", "1"].map(String::from));
    }

    #[test]
    fn test_sort_key_order() {
        let dir = tempfile::tempdir().unwrap();
        touch(
            dir.path(),
            "Plans",
            &["5-Zeta-A(2).pdf", "5-Alpha-B(1).pdf", "5-Zeta-A(1).pdf", "5-Beta-A(1).pdf"],
        );

        let report = scan(dir.path());
        let names: Vec<_> = report.tables[0].rows[1..]
            .iter()
            .map(|row| format!("{}/{}/{}", row[1], row[2], row[3]))
            .collect();
        assert_eq!(names, ["A/Beta/1", "A/Zeta/1", "A/Zeta/2", "B/Alpha/1"]);
    }

    #[test]
    fn test_empty_category_header_only() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "Vide", &[]);
        touch(dir.path(), "Autres", &["notes.txt", "plan.dwg"]);

        let report = scan(dir.path());
        assert_eq!(report.tables.len(), 2);
        for table in &report.tables {
            assert_eq!(table.rows.len(), 1);
            assert_eq!(table.document_count(), 0);
        }
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_malformed_names_skipped() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "Plans", &["1-Massif-A(1).pdf", "Sommaire.pdf", "2-Dalle-B.pdf"]);

        let report = scan(dir.path());
        assert_eq!(report.document_count(), 1);
        assert_eq!(report.skipped.len(), 2);
        assert!(report.skipped.iter().all(|s| s.category == "Plans"));
    }

    #[test]
    fn test_name_with_dashes() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "Plans", &["12-Poste-HTA-BT-C (3).pdf"]);

        let report = scan(dir.path());
        assert_eq!(report.tables[0].rows[1], ["12", "C", "Poste-HTA-BT", "3"].map(String::from));
    }

    #[test]
    fn test_space_before_extension() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "Plans", &["10-AlimBT-A(1) .pdf"]);

        let report = scan(dir.path());
        assert!(report.skipped.is_empty());
        assert_eq!(report.tables[0].rows[1], ["10", "A", "AlimBT", "1"].map(String::from));
    }
}
