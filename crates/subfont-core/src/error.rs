//! Error types for subfont

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SubsetError>;

/// Main error type for subfont
///
/// Every variant is fatal for a run. Compiler diagnostics and unmatched
/// icon names are reported through return values instead.
#[derive(Debug, Error)]
pub enum SubsetError {
    #[error("Icon list could not be read from {path}: {source}")]
    IconList {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("SVG font could not be read from {path}: {source}")]
    FontSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Output directory {path} could not be created: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Subset SVG could not be written to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Serialization failed: {0}")]
    Serialize(String),

    #[error("Font compiler `{program}` could not be started: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Waiting for font compiler `{program}` failed: {source}")]
    Wait {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_path() {
        let err = SubsetError::IconList {
            path: PathBuf::from("icons.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        let msg = err.to_string();
        assert!(msg.contains("icons.txt"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn test_config_message() {
        let err = SubsetError::Config("unknown flavor `otf`".into());
        assert_eq!(err.to_string(), "Configuration error: unknown flavor `otf`");
    }
}
