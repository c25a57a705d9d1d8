//! Declaration document parsing.
//!
//! Declarations are line-oriented `key: value` text files. Blank lines,
//! `#` comments, lines without a colon and unrecognized keys are skipped.
//! Whether the captured fields are acceptable is decided by the verifier.

use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::DocumentError;

/// Which of the two declarations a document is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DocumentKind {
    /// The operator's identity declaration (`identity.txt`).
    Identity,
    /// The operator's consent declaration (`consent.txt`).
    Consent,
}

impl DocumentKind {
    /// Both kinds, in evaluation order.
    pub const ALL: [Self; 2] = [Self::Identity, Self::Consent];

    /// Short lowercase name used in findings and summaries.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Consent => "consent",
        }
    }

    /// File name looked up in the working directory when no path is given.
    pub const fn default_file_name(self) -> &'static str {
        match self {
            Self::Identity => "identity.txt",
            Self::Consent => "consent.txt",
        }
    }

    /// Required fields of this document, in declaration order.
    pub const fn fields(self) -> &'static [Field] {
        match self {
            Self::Identity => &[Field::FullName, Field::Email, Field::Date],
            Self::Consent => &[
                Field::Acknowledgement,
                Field::Scope,
                Field::Date,
                Field::FullName,
            ],
        }
    }

    /// Whether `field` belongs to this document's vocabulary.
    pub fn recognizes(self, field: Field) -> bool {
        self.fields().contains(&field)
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recognized declaration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    /// Full legal name of the declarant.
    FullName,
    /// Contact email address.
    Email,
    /// Date the declaration was made.
    Date,
    /// Affirmative acknowledgement statement.
    Acknowledgement,
    /// Statement of the intended scope of use.
    Scope,
}

impl Field {
    /// The key as written in declaration files (lowercase).
    pub const fn key(self) -> &'static str {
        match self {
            Self::FullName => "full_name",
            Self::Email => "email",
            Self::Date => "date",
            Self::Acknowledgement => "acknowledgement",
            Self::Scope => "scope",
        }
    }

    /// Look up a field by its already-lowercased key.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "full_name" => Some(Self::FullName),
            "email" => Some(Self::Email),
            "date" => Some(Self::Date),
            "acknowledgement" => Some(Self::Acknowledgement),
            "scope" => Some(Self::Scope),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The recognized fields captured from one declaration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttestationDocument {
    kind: DocumentKind,
    path: PathBuf,
    fields: BTreeMap<Field, String>,
}

impl AttestationDocument {
    /// Which declaration this is.
    pub const fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Where the document was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The trimmed value of `field`, if it was present.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    /// Number of recognized fields captured.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no recognized field was captured.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Captured fields and their values.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.fields.iter().map(|(field, value)| (*field, value.as_str()))
    }
}

/// Parse declaration text that has already been read.
///
/// Never fails: malformed lines simply leave their field absent. When a
/// key appears more than once the last occurrence wins.
pub fn parse_str(kind: DocumentKind, path: impl Into<PathBuf>, text: &str) -> AttestationDocument {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut fields = BTreeMap::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            tracing::debug!(document = %kind, line = index + 1, "skipping line without a colon");
            continue;
        };

        let key = key.trim().to_lowercase();
        let Some(field) = Field::from_key(&key).filter(|f| kind.recognizes(*f)) else {
            tracing::debug!(document = %kind, line = index + 1, key = %key, "ignoring unrecognized key");
            continue;
        };

        fields.insert(field, value.trim().to_owned());
    }

    AttestationDocument {
        kind,
        path: path.into(),
        fields,
    }
}

/// Read and parse a declaration file.
///
/// # Errors
///
/// Returns [`DocumentError::NotFound`] if nothing exists at `path`,
/// [`DocumentError::NotAFile`] for directories, and
/// [`DocumentError::Unreadable`] for any other read failure (permissions,
/// invalid UTF-8).
pub fn load(kind: DocumentKind, path: &Path) -> Result<AttestationDocument, DocumentError> {
    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(DocumentError::NotFound {
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(DocumentError::Unreadable {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if !metadata.is_file() {
        return Err(DocumentError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    let text = std::fs::read_to_string(path).map_err(|source| DocumentError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let document = parse_str(kind, path, &text);
    tracing::info!(
        document = %kind,
        path = %path.display(),
        fields = document.len(),
        "loaded declaration"
    );
    Ok(document)
}
