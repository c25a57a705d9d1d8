//! Error types for the admission gate.
//!
//! These never cross the gate boundary on their own: the verifier turns
//! every [`DocumentError`] into a finding. [`ConfigError`] is raised while
//! the caller resolves configuration, before any document is read.

use std::path::PathBuf;

/// Errors from loading a declaration document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// The document does not exist at the expected path.
    #[error("document not found at `{}`", path.display())]
    NotFound {
        /// The path that was tried.
        path: PathBuf,
    },

    /// The path exists but is a directory or another non-regular file.
    #[error("`{}` is not a regular file", path.display())]
    NotAFile {
        /// The path that was tried.
        path: PathBuf,
    },

    /// The document exists but could not be read as UTF-8 text.
    #[error("failed to read `{}`: {source}", path.display())]
    Unreadable {
        /// The path that was tried.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

impl DocumentError {
    /// The path the failed load was attempting.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::NotFound { path } | Self::NotAFile { path } | Self::Unreadable { path, .. } => {
                path
            }
        }
    }

    /// Whether the failure means the document is simply absent, as
    /// opposed to present but unreadable.
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::NotAFile { .. })
    }
}

/// Errors from resolving gate configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An explicitly requested configuration file does not exist.
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The configuration file could not be read.
    #[error("failed to read config `{}`: {source}", path.display())]
    Io {
        /// Path of the configuration file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`crate::GateConfig`].
    #[error("invalid config `{path}`: {source}")]
    Invalid {
        /// Path of the configuration file.
        path: String,
        /// The underlying TOML parse error.
        source: toml::de::Error,
    },
}
