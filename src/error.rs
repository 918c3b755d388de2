//! Error types for the BPE listing generator.
//!
//! This module defines every error that can occur while scanning the project
//! tree, parsing document names, rendering the listing and writing it out.

use std::path::PathBuf;

use crate::writer::ImageError;

/// Result type alias for listing operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during a listing run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The documents root (or a category folder) does not exist
    #[error("Directory does not exist: {}", .0.display())]
    DirectoryMissing(PathBuf),

    /// Listing a directory was refused by the operating system
    #[error("Permission denied while reading {}: {source}", path.display())]
    PermissionDenied {
        /// Directory that could not be listed
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// A document file name does not follow `NUMBER-NAME-VERSION(DISPATCH)`
    #[error("Malformed document name '{file}': {reason}")]
    MalformedFilename {
        /// File stem that failed to parse
        file: String,
        /// What part of the convention is violated
        reason: String,
    },

    /// The project root folder name does not carry rank, name and number
    #[error("Malformed project folder name '{folder}': {reason}")]
    MalformedProjectName {
        /// Folder name that failed to parse
        folder: String,
        /// What part of the convention is violated
        reason: String,
    },

    /// Layout or document assembly failure
    #[error("PDF rendering failed: {0}")]
    Rendering(String),

    /// Logo image could not be loaded
    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Anything else
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// Map an IO error raised while listing `path` to the matching variant.
    pub fn from_listing(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            std::io::ErrorKind::NotFound => Error::DirectoryMissing(path),
            std::io::ErrorKind::PermissionDenied => Error::PermissionDenied { path, source: err },
            _ => Error::Io(err),
        }
    }

    /// Short operator-facing label for the error, used as the dialog prefix.
    pub fn label(&self) -> &'static str {
        match self {
            Error::DirectoryMissing(_) => "Erreur d'accès au répertoire",
            Error::PermissionDenied { .. } => "Erreur de permission",
            Error::MalformedFilename { .. } => "Nom de document invalide",
            Error::MalformedProjectName { .. } => "Nom de projet invalide",
            Error::Rendering(_) | Error::Image(_) => "Erreur lors de la génération du PDF",
            Error::Io(_) | Error::Unexpected(_) => "Erreur inattendue",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_missing_error() {
        let err = Error::DirectoryMissing(PathBuf::from("/nowhere/12-BPE"));
        let msg = format!("{}", err);
        assert!(msg.contains("does not exist"));
        assert!(msg.contains("12-BPE"));
    }

    #[test]
    fn test_malformed_filename_error() {
        let err = Error::MalformedFilename {
            file: "notes".to_string(),
            reason: "missing dispatch code".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("'notes'"));
        assert!(msg.contains("missing dispatch code"));
    }

    #[test]
    fn test_from_listing_maps_kinds() {
        let missing = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(matches!(Error::from_listing("/a", missing), Error::DirectoryMissing(_)));

        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "no");
        assert!(matches!(Error::from_listing("/a", denied), Error::PermissionDenied { .. }));

        let other = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        assert!(matches!(Error::from_listing("/a", other), Error::Io(_)));
    }

    #[test]
    fn test_labels() {
        assert_eq!(Error::DirectoryMissing(PathBuf::new()).label(), "Erreur d'accès au répertoire");
        assert_eq!(Error::Unexpected("x".into()).label(), "Erreur inattendue");
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
