//! Gate configuration.
//!
//! Configuration is an optional TOML file naming the default declaration
//! paths and overriding the wording and date policy. Every section and
//! key is optional.
//!
//! Resolution order:
//! 1. An explicitly given path (must exist)
//! 2. `vigil.toml` in the working directory
//! 3. XDG config dir (`~/.config/vigil/vigil.toml`)
//! 4. Built-in defaults

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use serde::Deserialize;

use crate::document::DocumentKind;
use crate::error::ConfigError;
use crate::policy::{DEFAULT_ACCEPTED_PHRASES, DEFAULT_DATE_FORMATS, GatePolicy};

/// File name searched for when no config path is given.
pub const CONFIG_FILE_NAME: &str = "vigil.toml";

/// Implicit config locations, resolved lazily.
static DEFAULT_CONFIG_PATHS: LazyLock<Vec<PathBuf>> = LazyLock::new(|| {
    let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(dirs) = directories::ProjectDirs::from("dev", "vigil", "vigil") {
        paths.push(dirs.config_dir().join(CONFIG_FILE_NAME));
    }
    paths
});

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GateConfig {
    /// Default declaration locations.
    pub documents: DocumentPaths,
    /// Accepted acknowledgement wording.
    pub acknowledgement: AcknowledgementConfig,
    /// Accepted date layouts.
    pub dates: DateConfig,
    /// Where this configuration was read from, if anywhere.
    #[serde(skip)]
    pub origin: Option<PathBuf>,
}

/// `[documents]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocumentPaths {
    /// Identity declaration used when the caller gives none.
    pub identity: PathBuf,
    /// Consent declaration used when the caller gives none.
    pub consent: PathBuf,
}

impl Default for DocumentPaths {
    fn default() -> Self {
        Self {
            identity: PathBuf::from(DocumentKind::Identity.default_file_name()),
            consent: PathBuf::from(DocumentKind::Consent.default_file_name()),
        }
    }
}

/// `[acknowledgement]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AcknowledgementConfig {
    /// Phrases accepted as an affirmative acknowledgement.
    pub accepted_phrases: Vec<String>,
}

impl Default for AcknowledgementConfig {
    fn default() -> Self {
        Self {
            accepted_phrases: DEFAULT_ACCEPTED_PHRASES
                .iter()
                .map(|&p| p.to_owned())
                .collect(),
        }
    }
}

/// `[dates]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DateConfig {
    /// chrono `strftime` layouts, tried in order.
    pub formats: Vec<String>,
}

impl Default for DateConfig {
    fn default() -> Self {
        Self {
            formats: DEFAULT_DATE_FORMATS.iter().map(|&f| f.to_owned()).collect(),
        }
    }
}

impl GateConfig {
    /// Resolve configuration, preferring `explicit` when given.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if `explicit` does not exist, or
    /// a read/parse error for whichever file was selected.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            return Self::load(path);
        }

        let Some(found) = DEFAULT_CONFIG_PATHS.iter().find(|p| p.is_file()) else {
            tracing::debug!("no config file found, using defaults");
            return Ok(Self::default());
        };
        Self::load(found)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Invalid`] if it is not valid configuration.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config: Self = toml::from_str(&content).map_err(|source| ConfigError::Invalid {
            path: path.display().to_string(),
            source,
        })?;
        config.origin = Some(path.to_path_buf());
        tracing::info!(path = %path.display(), "loaded gate config");
        Ok(config)
    }

    /// The wording and date policy this configuration describes.
    pub fn policy(&self) -> GatePolicy {
        GatePolicy {
            accepted_phrases: self.acknowledgement.accepted_phrases.clone(),
            date_formats: self.dates.formats.clone(),
        }
    }

    /// Pick the declaration path for `kind`, preferring `explicit`.
    pub fn document_path(&self, kind: DocumentKind, explicit: Option<&Path>) -> PathBuf {
        explicit.map_or_else(
            || match kind {
                DocumentKind::Identity => self.documents.identity.clone(),
                DocumentKind::Consent => self.documents.consent.clone(),
            },
            Path::to_path_buf,
        )
    }
}
