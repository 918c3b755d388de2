//! Per-run log file.
//!
//! Each run appends to `info.log` next to the output:
//!
//! ```text
//! 2024-03-05 14:02:11,417 - INFO - PDF généré avec succès : .../Liste BPE - 2024-03-05.pdf
//! 2024-03-05 14:02:11,419 - ERROR - Erreur d'accès au répertoire: Directory does not exist: ...
//!     caused by: No such file or directory (os error 2)
//! ```
//!
//! Every entry is forwarded to the `log` facade as well, so `RUST_LOG`
//! controls what reaches the console.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::Level;

use crate::error::Result;

/// Append-only log owned by one run. Flushed when dropped.
#[derive(Debug)]
pub struct RunLog {
    writer: Option<BufWriter<File>>,
    path: Option<PathBuf>,
}

impl RunLog {
    /// Open (or create) the log file in append mode.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(file)),
            path: Some(path.to_path_buf()),
        })
    }

    /// Open the log file, falling back to a console-only log when the file
    /// cannot be opened.
    pub fn open_or_console(path: impl AsRef<Path>) -> Self {
        match Self::open(path.as_ref()) {
            Ok(log) => log,
            Err(e) => {
                log::warn!(
                    "Cannot open run log {}, logging to the console only: {}",
                    path.as_ref().display(),
                    e
                );
                Self::console()
            },
        }
    }

    /// Log that only forwards to the `log` facade.
    pub fn console() -> Self {
        Self {
            writer: None,
            path: None,
        }
    }

    /// File backing this log, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Log an informational message.
    pub fn info(&mut self, message: &str) {
        self.record(Level::Info, message, None);
    }

    /// Log a warning.
    pub fn warn(&mut self, message: &str) {
        self.record(Level::Warn, message, None);
    }

    /// Log an error without a cause.
    pub fn error(&mut self, message: &str) {
        self.record(Level::Error, message, None);
    }

    /// Log an error with its cause chain.
    pub fn error_with_cause(&mut self, message: &str, cause: &(dyn std::error::Error + 'static)) {
        self.record(Level::Error, message, Some(cause));
    }

    /// Log a warning with its cause chain.
    pub fn warn_with_cause(&mut self, message: &str, cause: &(dyn std::error::Error + 'static)) {
        self.record(Level::Warn, message, Some(cause));
    }

    fn record(
        &mut self,
        level: Level,
        message: &str,
        cause: Option<&(dyn std::error::Error + 'static)>,
    ) {
        let mut lines = vec![match cause {
            Some(cause) => format!("{}: {}", message, cause),
            None => message.to_string(),
        }];
        let mut source = cause.and_then(|c| c.source());
        while let Some(err) = source {
            lines.push(format!("    caused by: {}", err));
            source = err.source();
        }

        log::log!(level, "{}", lines.join("\n"));

        let Some(writer) = self.writer.as_mut() else {
            return;
        };
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S,%3f");
        let result = writeln!(writer, "{} - {} - {}", timestamp, level_name(level), lines[0])
            .and_then(|_| lines[1..].iter().try_for_each(|line| writeln!(writer, "{}", line)));
        if let Err(e) = result {
            log::debug!("Run log write failed: {}", e);
        }
    }

    /// Flush buffered entries to disk.
    pub fn flush(&mut self) {
        if let Some(writer) = self.writer.as_mut() {
            if let Err(e) = writer.flush() {
                log::debug!("Run log flush failed: {}", e);
            }
        }
    }
}

impl Drop for RunLog {
    fn drop(&mut self) {
        self.flush();
    }
}

/// Level names as they appear in the log file.
fn level_name(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARNING",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}
