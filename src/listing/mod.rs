//! Scanning the BPE folder and building the report model.
//!
//! ```text
//! Project Files/12-BPE/
//!     Génie civil/        → Category "Génie civil"
//!         10-AlimBT-A (1).pdf   → DocumentRecord { 10, A, AlimBT, 1 }
//!     #Archives/          → never listed
//! ```

pub mod assembler;
pub mod filename;
pub mod project;
pub mod scanner;

pub use assembler::{
    Category, CategoryTable, Report, ReportAssembler, SkippedFile, HEADER_ROW, REPORT_TITLE,
};
pub use filename::{parse_stem, DocumentRecord};
pub use project::ProjectIdentity;
pub use scanner::{CategoryDir, CategoryScanner};
