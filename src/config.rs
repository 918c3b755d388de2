//! Configuration for a listing run.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Number of directory levels between the executable and the project root.
///
/// The tool is deployed as `{root}/a/b/c/liste_bpe`, so the root is the
/// fourth entry of the executable's ancestor chain.
pub const EXECUTABLE_DEPTH: usize = 3;

/// Logo file names looked up next to the executable, in order.
const LOGO_CANDIDATES: [&str; 3] = ["logo.png", "logo.jpg", "logo.jpeg"];

/// Listing run configuration.
#[derive(Debug, Clone)]
pub struct ListingConfig {
    /// Project root folder; its name encodes rank, name and number.
    pub project_root: PathBuf,

    /// Documents root, relative to the project root.
    pub documents_subdir: PathBuf,

    /// Category folders starting with this character are not listed.
    pub excluded_marker: char,

    /// Document file extension (compared case-insensitively, without dot).
    pub extension: String,

    /// Directory receiving the PDF and the run log.
    pub output_dir: PathBuf,

    /// Output file name prefix, followed by ` - {YYYY-MM-DD}.pdf`.
    pub output_prefix: String,

    /// Run log file name inside `output_dir`.
    pub log_file_name: String,

    /// Logo drawn on the first page.
    pub logo_path: Option<PathBuf>,

    /// Flate-compress page content streams.
    pub compress: bool,
}

impl ListingConfig {
    /// Create a configuration for the given project root, writing its output
    /// into `output_dir`.
    pub fn new(project_root: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            documents_subdir: Path::new("Project Files").join("12-BPE"),
            excluded_marker: '#',
            extension: "pdf".to_string(),
            output_dir: output_dir.into(),
            output_prefix: "Liste BPE".to_string(),
            log_file_name: "info.log".to_string(),
            logo_path: None,
            compress: true,
        }
    }

    /// Derive the configuration from the location of the running executable.
    pub fn from_executable() -> Result<Self> {
        let exe = std::env::current_exe()?;
        let exe = exe.canonicalize().unwrap_or(exe);
        Self::from_executable_path(&exe)
    }

    /// Derive the configuration from an executable path.
    pub fn from_executable_path(exe: &Path) -> Result<Self> {
        let exe_dir = exe
            .parent()
            .ok_or_else(|| Error::Unexpected(format!("{} has no parent", exe.display())))?;
        let root = exe_dir.ancestors().nth(EXECUTABLE_DEPTH).ok_or_else(|| {
            Error::Unexpected(format!(
                "{} is less than {} levels deep; cannot locate the project root",
                exe.display(),
                EXECUTABLE_DEPTH + 1
            ))
        })?;

        let logo = LOGO_CANDIDATES
            .iter()
            .map(|name| exe_dir.join(name))
            .find(|path| path.is_file());

        let mut config = Self::new(root, exe_dir);
        config.logo_path = logo;
        Ok(config)
    }

    /// Set the documents root, relative to the project root.
    pub fn with_documents_subdir(mut self, subdir: impl Into<PathBuf>) -> Self {
        self.documents_subdir = subdir.into();
        self
    }

    /// Set the exclusion marker.
    pub fn with_excluded_marker(mut self, marker: char) -> Self {
        self.excluded_marker = marker;
        self
    }

    /// Set the logo image.
    pub fn with_logo(mut self, path: impl Into<PathBuf>) -> Self {
        self.logo_path = Some(path.into());
        self
    }

    /// Enable or disable content stream compression.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Absolute documents root.
    pub fn documents_dir(&self) -> PathBuf {
        self.project_root.join(&self.documents_subdir)
    }

    /// Output PDF path for the given file date (`YYYY-MM-DD`).
    pub fn output_file(&self, file_date: &str) -> PathBuf {
        self.output_dir
            .join(format!("{} - {}.pdf", self.output_prefix, file_date))
    }

    /// Run log path.
    pub fn log_file(&self) -> PathBuf {
        self.output_dir.join(&self.log_file_name)
    }

    /// Name of the project root folder.
    pub fn project_folder_name(&self) -> String {
        self.project_root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
