//! One listing run, from folder scan to the written PDF.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tempfile::NamedTempFile;

use crate::config::ListingConfig;
use crate::error::{Error, Result};
use crate::listing::{CategoryScanner, ProjectIdentity, ReportAssembler};
use crate::logging::RunLog;
use crate::notify::Notifier;
use crate::report::ReportRenderer;
use crate::writer::ImageData;

/// Title of every error dialog.
const ERROR_TITLE: &str = "Erreur";

/// How a run ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// The listing was written
    Written {
        /// Output file
        path: PathBuf,
        /// Documents listed
        documents: usize,
        /// Files left out because of their names
        skipped: usize,
    },
    /// The operator refused to overwrite an existing listing
    Declined,
    /// The run stopped on an error, already logged and shown
    Failed(Error),
}

impl RunOutcome {
    /// Whether the run ended without error.
    pub fn is_success(&self) -> bool {
        !matches!(self, RunOutcome::Failed(_))
    }
}

/// Generates the BPE listing for one project.
#[derive(Debug, Clone)]
pub struct ListingGenerator {
    config: ListingConfig,
    timestamp: Option<DateTime<Local>>,
}

impl ListingGenerator {
    /// Create a generator.
    pub fn new(config: ListingConfig) -> Self {
        Self {
            config,
            timestamp: None,
        }
    }

    /// Use a fixed time instead of the clock (output name and edition date).
    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Configuration in use.
    pub fn config(&self) -> &ListingConfig {
        &self.config
    }

    /// Run once. Every error is logged and shown before returning.
    pub fn generate(&self, notifier: &mut dyn Notifier) -> RunOutcome {
        let now = self.timestamp.unwrap_or_else(Local::now);

        let output = self.config.output_file(&now.format("%Y-%m-%d").to_string());
        if output.exists() {
            let question = format!(
                "Le fichier {} existe déjà. Voulez-vous le remplacer?",
                output.display()
            );
            if !notifier.ask_yes_no("Fichier existant", &question) {
                // A declined run leaves the output directory untouched, run log included
                log::info!("Remplacement refusé, {} conservé", output.display());
                return RunOutcome::Declined;
            }
        }

        let mut run_log = RunLog::open_or_console(self.config.log_file());

        match self.produce(now, &output, notifier, &mut run_log) {
            Ok((documents, skipped)) => {
                let mut message = format!("Le fichier \"{}\" a été généré.", output.display());
                if skipped > 0 {
                    message.push_str(&format!(
                        " {} fichier(s) ignoré(s), nom non conforme (voir {}).",
                        skipped, self.config.log_file_name
                    ));
                }
                notifier.show_info("Succès", &message);
                run_log.info(&format!(
                    "Document PDF généré avec succès: {}",
                    output.file_name().map(|n| n.to_string_lossy()).unwrap_or_default()
                ));
                RunOutcome::Written {
                    path: output,
                    documents,
                    skipped,
                }
            },
            Err(e) => {
                report_error(&e, notifier, &mut run_log);
                RunOutcome::Failed(e)
            },
        }
    }

    /// Scan, assemble, render and write. Returns listed and skipped counts.
    fn produce(
        &self,
        now: DateTime<Local>,
        output: &Path,
        notifier: &mut dyn Notifier,
        run_log: &mut RunLog,
    ) -> Result<(usize, usize)> {
        let folder = self.config.project_folder_name();
        let (project, parse_error) = ProjectIdentity::parse_or_fallback(&folder);
        if let Some(e) = parse_error {
            run_log.warn_with_cause("Nom de projet non reconnu, nom du dossier utilisé", &e);
        }

        let scanner = CategoryScanner::new(self.config.documents_dir(), self.config.excluded_marker);
        let dirs = scanner.list_categories().unwrap_or_else(|e| {
            report_error(&e, notifier, run_log);
            Vec::new()
        });

        let mut categories = Vec::with_capacity(dirs.len());
        for dir in dirs {
            let files = scanner.list_files(&dir).unwrap_or_else(|e| {
                report_error(&e, notifier, run_log);
                Vec::new()
            });
            categories.push((dir.label, files));
        }

        let report = ReportAssembler::new(&self.config.extension).assemble(
            project,
            now.date_naive(),
            categories,
        );
        for skipped in &report.skipped {
            run_log.warn(&format!(
                "Fichier ignoré {}/{} : {}",
                skipped.category, skipped.file_name, skipped.reason
            ));
        }

        let mut renderer = ReportRenderer::new()
            .with_compress(self.config.compress)
            .with_creation_time(now);
        if let Some(logo) = self.load_logo(run_log) {
            renderer = renderer.with_logo(logo);
        }

        let bytes = renderer.render(&report)?;
        write_atomic(output, &bytes)?;

        Ok((report.document_count(), report.skipped.len()))
    }

    fn load_logo(&self, run_log: &mut RunLog) -> Option<ImageData> {
        let path = self.config.logo_path.as_ref()?;
        match ImageData::from_file(path) {
            Ok(logo) => Some(logo),
            Err(e) => {
                let message = format!("Logo {} ignoré", path.display());
                run_log.warn_with_cause(&message, &Error::Image(e));
                None
            },
        }
    }
}

/// Log an error with its cause and show it to the operator.
fn report_error(err: &Error, notifier: &mut dyn Notifier, run_log: &mut RunLog) {
    run_log.error_with_cause(err.label(), err);
    notifier.show_error(ERROR_TITLE, &format!("{} : {}", err.label(), err));
}

/// Write `bytes` to `path` through a temporary file in the same directory,
/// so `path` is either the previous file or the complete new one.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;

    log::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
