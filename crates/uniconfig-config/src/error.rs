//! Loader error taxonomy.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors returned while loading or creating a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file is absent and creating it was not allowed.
    #[error("Configuration file not found: {}", path.display())]
    NotFound {
        /// Resolved configuration path.
        path: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: io::Error,
    },

    /// The loaded document equals the defaults.
    ///
    /// `freshly_created` is set when the file was written from the defaults
    /// during the same load call.
    #[error("{}", unedited_message(path, *freshly_created))]
    Unedited {
        /// Resolved configuration path.
        path: PathBuf,
        /// Whether the file was created by this load call.
        freshly_created: bool,
    },

    /// The document's top-level keys differ from the defaults.
    #[error(
        "Configuration keys in {} differ from defaults (missing: [{}], unexpected: [{}])",
        path.display(),
        missing.join(", "),
        unexpected.join(", ")
    )]
    KeyMismatch {
        /// Resolved configuration path.
        path: PathBuf,
        /// Keys present in the defaults but not in the file.
        missing: Vec<String>,
        /// Keys present in the file but not in the defaults.
        unexpected: Vec<String>,
    },

    /// The existing file is not valid TOML.
    #[error("Failed to parse configuration file {}: {source}", path.display())]
    MalformedDocument {
        /// Resolved configuration path.
        path: PathBuf,
        /// Parser error.
        #[source]
        source: toml::de::Error,
    },

    /// Reading, writing, or creating directories failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path the operation was acting on.
        path: PathBuf,
        /// Underlying filesystem error.
        #[source]
        source: io::Error,
    },

    /// The default document could not be written as TOML.
    #[error("Failed to serialize default configuration for {}: {source}", path.display())]
    Serialize {
        /// Resolved configuration path.
        path: PathBuf,
        /// Serializer error.
        #[source]
        source: toml::ser::Error,
    },

    /// A value could not be converted into a document.
    #[error("Failed to encode value as a configuration document: {0}")]
    Encode(#[source] toml::ser::Error),

    /// A document could not be converted into the requested type.
    #[error("Failed to decode configuration document: {0}")]
    Decode(#[from] toml::de::Error),

    /// A value serialized to something other than a table.
    #[error("Value of type '{0}' cannot be used as a configuration document")]
    NotATable(&'static str),
}

fn unedited_message(path: &Path, freshly_created: bool) -> String {
    if freshly_created {
        format!(
            "Created default configuration at {}; edit it before running again",
            path.display()
        )
    } else {
        format!(
            "Configuration at {} is identical to the defaults; edit it before running again",
            path.display()
        )
    }
}

/// Fieldless view of [`ConfigError`] for branching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`ConfigError::NotFound`].
    NotFound,
    /// Pre-existing file equal to the defaults.
    Unedited,
    /// File written from the defaults during this load.
    FreshlyCreated,
    /// See [`ConfigError::KeyMismatch`].
    KeyMismatch,
    /// See [`ConfigError::MalformedDocument`].
    MalformedDocument,
    /// See [`ConfigError::Io`].
    Io,
    /// See [`ConfigError::Serialize`].
    Serialize,
    /// See [`ConfigError::Encode`].
    Encode,
    /// See [`ConfigError::Decode`].
    Decode,
    /// See [`ConfigError::NotATable`].
    NotATable,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NotFound => "not found",
            Self::Unedited => "unedited",
            Self::FreshlyCreated => "freshly created",
            Self::KeyMismatch => "key mismatch",
            Self::MalformedDocument => "malformed document",
            Self::Io => "i/o",
            Self::Serialize => "serialize",
            Self::Encode => "encode",
            Self::Decode => "decode",
            Self::NotATable => "not a table",
        };
        f.write_str(name)
    }
}

impl ConfigError {
    /// Returns the kind of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Unedited {
                freshly_created: true,
                ..
            } => ErrorKind::FreshlyCreated,
            Self::Unedited { .. } => ErrorKind::Unedited,
            Self::KeyMismatch { .. } => ErrorKind::KeyMismatch,
            Self::MalformedDocument { .. } => ErrorKind::MalformedDocument,
            Self::Io { .. } => ErrorKind::Io,
            Self::Serialize { .. } => ErrorKind::Serialize,
            Self::Encode(_) => ErrorKind::Encode,
            Self::Decode(_) => ErrorKind::Decode,
            Self::NotATable(_) => ErrorKind::NotATable,
        }
    }

    /// True for both the unedited and the freshly created condition.
    pub const fn is_unedited(&self) -> bool {
        matches!(self, Self::Unedited { .. })
    }

    /// True only when the defaults were written during this load.
    pub const fn is_freshly_created(&self) -> bool {
        matches!(
            self,
            Self::Unedited {
                freshly_created: true,
                ..
            }
        )
    }

    /// The configuration path this error refers to, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::NotFound { path, .. }
            | Self::Unedited { path, .. }
            | Self::KeyMismatch { path, .. }
            | Self::MalformedDocument { path, .. }
            | Self::Io { path, .. }
            | Self::Serialize { path, .. } => Some(path),
            Self::Encode(_) | Self::Decode(_) | Self::NotATable(_) => None,
        }
    }

    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unedited(freshly_created: bool) -> ConfigError {
        ConfigError::Unedited {
            path: PathBuf::from("/tmp/app.toml"),
            freshly_created,
        }
    }

    #[test]
    fn test_unedited_kinds() {
        assert_eq!(unedited(true).kind(), ErrorKind::FreshlyCreated);
        assert_eq!(unedited(false).kind(), ErrorKind::Unedited);

        assert!(unedited(true).is_unedited());
        assert!(unedited(false).is_unedited());
        assert!(unedited(true).is_freshly_created());
        assert!(!unedited(false).is_freshly_created());
    }

    #[test]
    fn test_unedited_messages_differ() {
        let fresh = unedited(true).to_string();
        let stale = unedited(false).to_string();

        assert!(fresh.starts_with("Created default configuration at /tmp/app.toml"));
        assert!(stale.contains("identical to the defaults"));
    }

    #[test]
    fn test_key_mismatch_message_lists_keys() {
        let err = ConfigError::KeyMismatch {
            path: PathBuf::from("app.toml"),
            missing: vec!["debug".to_string()],
            unexpected: vec!["color".to_string(), "verbose".to_string()],
        };

        assert_eq!(
            err.to_string(),
            "Configuration keys in app.toml differ from defaults (missing: [debug], unexpected: [color, verbose])"
        );
        assert_eq!(err.path(), Some(Path::new("app.toml")));
    }

    #[test]
    fn test_not_found_keeps_source() {
        let err = ConfigError::NotFound {
            path: PathBuf::from("missing.toml"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };

        let source = std::error::Error::source(&err).expect("source");
        assert_eq!(
            source.downcast_ref::<io::Error>().map(io::Error::kind),
            Some(io::ErrorKind::NotFound)
        );
        assert_eq!(err.kind().to_string(), "not found");
    }

    #[test]
    fn test_not_a_table_has_no_path() {
        assert!(ConfigError::NotATable("integer").path().is_none());
    }
}
