//! Document file name parsing.
//!
//! Document files are named `NUMBER-NAME-VERSION(DISPATCH)`, for example
//! `10-AlimBT-A (1).pdf`. The number runs up to the first `-`, the version
//! sits between the last `-` and the dispatch code in parentheses, and
//! everything in between is the name.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{Error, Result};

lazy_static! {
    /// Whole-stem document name grammar
    static ref RE_DOCUMENT_NAME: Regex =
        Regex::new(r"^([^-]+)-(.+)-([^-()]+?)\s*\(([^()]+)\)\s*$").unwrap();
}

/// Metadata carried by one document file name.
///
/// Field order defines the sort order of records within a category:
/// number, then version, then name, then dispatch code, compared as plain
/// strings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentRecord {
    /// Document number (first field of the name)
    pub number: String,
    /// Revision index
    pub version: String,
    /// Document title
    pub name: String,
    /// Issue number given in parentheses
    pub dispatch_code: String,
}

impl DocumentRecord {
    /// Create a record from its parts.
    pub fn new(
        number: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
        dispatch_code: impl Into<String>,
    ) -> Self {
        Self {
            number: number.into(),
            version: version.into(),
            name: name.into(),
            dispatch_code: dispatch_code.into(),
        }
    }

    /// Table cells in column order: number, version, name, dispatch code.
    pub fn to_row(&self) -> [String; 4] {
        [
            self.number.clone(),
            self.version.clone(),
            self.name.clone(),
            self.dispatch_code.clone(),
        ]
    }
}

/// Parse a file stem (name without extension) into a record.
pub fn parse_stem(stem: &str) -> Result<DocumentRecord> {
    let malformed = |reason: &str| Error::MalformedFilename {
        file: stem.to_string(),
        reason: reason.to_string(),
    };

    let caps = RE_DOCUMENT_NAME
        .captures(stem)
        .ok_or_else(|| malformed(diagnose(stem)))?;

    let field = |idx: usize, what: &str| -> Result<String> {
        let value = caps.get(idx).map_or("", |m| m.as_str()).trim();
        if value.is_empty() {
            Err(malformed(&format!("empty {}", what)))
        } else {
            Ok(value.to_string())
        }
    };

    Ok(DocumentRecord {
        number: field(1, "document number")?,
        name: field(2, "document name")?,
        version: field(3, "version")?,
        dispatch_code: field(4, "dispatch code")?,
    })
}

/// Explain why a stem does not match the naming convention.
fn diagnose(stem: &str) -> &'static str {
    let trimmed = stem.trim_end();
    if !trimmed.contains('-') {
        "missing '-' separators"
    } else if !trimmed.ends_with(')') {
        "missing dispatch code in parentheses at the end"
    } else if stem.matches('-').count() < 2 {
        "expected NUMBER-NAME-VERSION(DISPATCH)"
    } else if trimmed.rfind('(') < trimmed.rfind('-') {
        "version must not contain '-', '(' or ')'"
    } else {
        "expected NUMBER-NAME-VERSION(DISPATCH)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let record = parse_stem("10-AlimBT-A(1)").unwrap();
        assert_eq!(record, DocumentRecord::new("10", "AlimBT", "A", "1"));
    }

    #[test]
    fn test_parse_space_before_dispatch() {
        let record = parse_stem("10-AlimBT-A (1)").unwrap();
        assert_eq!(record.version, "A");
        assert_eq!(record.dispatch_code, "1");
    }

    #[test]
    fn test_trailing_space_after_dispatch() {
        let record = parse_stem("10-AlimBT-A(1) ").unwrap();
        assert_eq!(record, DocumentRecord::new("10", "AlimBT", "A", "1"));
        assert!(parse_stem("10-AlimBT-A (1)\t").is_ok());
    }

    #[test]
    fn test_name_with_dashes_and_spaces() {
        let record = parse_stem("003-Schéma unifilaire - TGBT (bis)-B2(03)").unwrap();
        assert_eq!(record.number, "003");
        assert_eq!(record.name, "Schéma unifilaire - TGBT (bis)");
        assert_eq!(record.version, "B2");
        assert_eq!(record.dispatch_code, "03");
    }

    #[test]
    fn test_fields_are_trimmed() {
        let record = parse_stem("12 - Plan masse - C ( 2 )").unwrap();
        assert_eq!(record, DocumentRecord::new("12", "Plan masse", "C", "2"));
    }

    #[test]
    fn test_missing_dispatch() {
        let err = parse_stem("10-AlimBT-A").unwrap_err();
        match err {
            Error::MalformedFilename { file, reason } => {
                assert_eq!(file, "10-AlimBT-A");
                assert!(reason.contains("dispatch"));
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejected_stems() {
        for stem in [
            "",
            "notes",
            "10-A(1)",
            "10-AlimBT-A(1)x",
            "-AlimBT-A(1)",
            "10-AlimBT-(1)",
            "10-AlimBT-A()",
            "10- -A(1)",
            "10-AlimBT-A((1))",
        ] {
            assert!(
                matches!(parse_stem(stem), Err(Error::MalformedFilename { .. })),
                "{stem:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_record_ordering() {
        let a = DocumentRecord::new("10", "Z", "A", "1");
        let b = DocumentRecord::new("2", "A", "A", "1");
        assert!(a < b);

        let c = DocumentRecord::new("10", "B", "A", "1");
        let d = DocumentRecord::new("10", "A", "B", "1");
        assert!(c < d, "version is compared before name");
    }

    #[test]
    fn test_to_row_column_order() {
        let record = DocumentRecord::new("10", "AlimBT", "A", "1");
        assert_eq!(record.to_row(), ["10", "A", "AlimBT", "1"].map(String::from));
    }
}
