//! Turns scanned file names into the report model.

use std::path::Path;

use chrono::NaiveDate;

use super::filename::{parse_stem, DocumentRecord};
use super::project::ProjectIdentity;

/// Title printed on the cover block.
pub const REPORT_TITLE: &str = "Liste des Plans BPE";

/// First row of every category table.
pub const HEADER_ROW: [&str; 4] = ["N°", "Ind.", "Document", "Envoi"];

/// A category folder and its parsed, sorted documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Folder name
    pub label: String,
    /// Records sorted by number, version, name, dispatch code
    pub records: Vec<DocumentRecord>,
}

/// A document file left out of the listing because its name does not
/// follow the convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    /// Category folder holding the file
    pub category: String,
    /// File name, with extension
    pub file_name: String,
    /// Why the name was rejected
    pub reason: String,
}

/// Table rows for one category, header row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTable {
    /// Category label
    pub label: String,
    /// Header row followed by one row per record
    pub rows: Vec<[String; 4]>,
}

impl CategoryTable {
    /// Number of document rows, excluding the header.
    pub fn document_count(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }
}

impl From<&Category> for CategoryTable {
    fn from(category: &Category) -> Self {
        let mut rows = Vec::with_capacity(category.records.len() + 1);
        rows.push(HEADER_ROW.map(String::from));
        rows.extend(category.records.iter().map(DocumentRecord::to_row));
        Self {
            label: category.label.clone(),
            rows,
        }
    }
}

/// Everything the renderer needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Cover title
    pub title: String,
    /// Date printed as "Edition du ..."
    pub edition_date: NaiveDate,
    /// Project block
    pub project: ProjectIdentity,
    /// Category tables in folder order
    pub tables: Vec<CategoryTable>,
    /// Files whose names were rejected
    pub skipped: Vec<SkippedFile>,
}

impl Report {
    /// Total number of listed documents.
    pub fn document_count(&self) -> usize {
        self.tables.iter().map(CategoryTable::document_count).sum()
    }
}

/// Builds categories and the report from scanned file names.
#[derive(Debug, Clone)]
pub struct ReportAssembler {
    extension: String,
}

impl ReportAssembler {
    /// Create an assembler keeping files with the given extension.
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }

    fn has_extension(&self, file_name: &str) -> bool {
        Path::new(file_name)
            .extension()
            .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(&self.extension))
    }

    /// Parse and sort the documents of one category.
    ///
    /// Files with another extension are ignored; files with a malformed name
    /// are returned as skipped.
    pub fn build_category(&self, label: &str, file_names: &[String]) -> (Category, Vec<SkippedFile>) {
        let mut records = Vec::new();
        let mut skipped = Vec::new();

        for file_name in file_names.iter().filter(|f| self.has_extension(f)) {
            let stem = Path::new(file_name)
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();

            match parse_stem(&stem) {
                Ok(record) => records.push(record),
                Err(e) => {
                    log::warn!("Skipping {}/{}: {}", label, file_name, e);
                    skipped.push(SkippedFile {
                        category: label.to_string(),
                        file_name: file_name.clone(),
                        reason: e.to_string(),
                    });
                },
            }
        }

        records.sort();

        (
            Category {
                label: label.to_string(),
                records,
            },
            skipped,
        )
    }

    /// Compose the report from `(label, file names)` pairs given in folder
    /// order.
    pub fn assemble(
        &self,
        project: ProjectIdentity,
        edition_date: NaiveDate,
        categories: Vec<(String, Vec<String>)>,
    ) -> Report {
        let mut tables = Vec::with_capacity(categories.len());
        let mut skipped = Vec::new();

        for (label, files) in &categories {
            let (category, mut rejected) = self.build_category(label, files);
            tables.push(CategoryTable::from(&category));
            skipped.append(&mut rejected);
        }

        Report {
            title: REPORT_TITLE.to_string(),
            edition_date,
            project,
            tables,
            skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_string_ordering() {
        let assembler = ReportAssembler::new("pdf");
        let (category, skipped) =
            assembler.build_category("Plans", &names(&["2-AlimBT-B(1).pdf", "10-AlimBT-A(1).pdf"]));
        assert!(skipped.is_empty());
        let numbers: Vec<_> = category.records.iter().map(|r| r.number.as_str()).collect();
        assert_eq!(numbers, ["10", "2"]);
    }

    #[test]
    fn test_extension_filter_is_case_insensitive() {
        let assembler = ReportAssembler::new("pdf");
        let (category, skipped) = assembler.build_category(
            "Plans",
            &names(&["1-A-A(1).PDF", "2-B-A(1).dwg", "notes.txt", "3-C-A(1).pdf"]),
        );
        assert!(skipped.is_empty());
        assert_eq!(category.records.len(), 2);
    }

    #[test]
    fn test_malformed_names_are_skipped() {
        let assembler = ReportAssembler::new("pdf");
        let (category, skipped) =
            assembler.build_category("Plans", &names(&["sommaire.pdf", "1-A-A(1).pdf"]));
        assert_eq!(category.records.len(), 1);
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].category, "Plans");
        assert_eq!(skipped[0].file_name, "sommaire.pdf");
        assert!(skipped[0].reason.contains("sommaire"));
    }

    #[test]
    fn test_empty_category_has_header_only() {
        let table = CategoryTable::from(&Category {
            label: "Vide".to_string(),
            records: Vec::new(),
        });
        assert_eq!(table.rows, vec![HEADER_ROW.map(String::from)]);
        assert_eq!(table.document_count(), 0);
    }

    #[test]
    fn test_assemble_report() {
        let assembler = ReportAssembler::new("pdf");
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let report = assembler.assemble(
            ProjectIdentity::default(),
            date,
            vec![
                ("GC".to_string(), names(&["1-Massif-A (2).pdf", "bad.pdf"])),
                ("HT".to_string(), Vec::new()),
            ],
        );

        assert_eq!(report.title, REPORT_TITLE);
        assert_eq!(report.edition_date, date);
        assert_eq!(report.tables.len(), 2);
        assert_eq!(report.tables[0].rows[1], ["1", "A", "Massif", "2"].map(String::from));
        assert_eq!(report.tables[1].rows.len(), 1);
        assert_eq!(report.document_count(), 1);
        assert_eq!(report.skipped.len(), 1);
    }
}
