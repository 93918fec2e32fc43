//! Configuration loading with default-file bootstrapping.

use crate::cache::DocumentCache;
use crate::codec::{self, ReadOutcome};
use crate::document::ConfigDocument;
use crate::error::{ConfigError, Result};
use crate::options::LoaderOptions;
use crate::paths::expand_home;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Loads a TOML configuration file against a default document.
///
/// Construction resolves the path and performs the first [`load`]; a loader
/// only exists once a document has been accepted.
///
/// The file is assumed to have a single writer. Nothing guards against
/// another process editing it during a call.
///
/// [`load`]: ConfigLoader::load
#[derive(Debug)]
pub struct ConfigLoader {
    path: PathBuf,
    default_config: ConfigDocument,
    options: LoaderOptions,
    current: DocumentCache,
}

impl ConfigLoader {
    /// Creates a loader with every option enabled and loads the file.
    pub fn new(path: impl AsRef<Path>, default_config: ConfigDocument) -> Result<Self> {
        Self::with_options(path, default_config, LoaderOptions::default())
    }

    /// Creates a loader with explicit options and loads the file.
    pub fn with_options(
        path: impl AsRef<Path>,
        default_config: ConfigDocument,
        options: LoaderOptions,
    ) -> Result<Self> {
        let loader = Self {
            path: expand_home(path.as_ref()),
            default_config,
            options,
            current: DocumentCache::default(),
        };

        debug!(path = %loader.path.display(), ?options, "initializing configuration loader");
        loader.load()?;
        Ok(loader)
    }

    /// Writes the default document to the configuration path, creating
    /// parent directories and replacing any existing file.
    pub fn create_default(&self) -> Result<()> {
        codec::write_document(&self.path, &self.default_config)?;
        info!(path = %self.path.display(), "created default configuration file");
        Ok(())
    }

    /// Reads the file, applies the policy checks, and on success stores and
    /// returns the accepted document.
    ///
    /// A failed call leaves the previously accepted document in place.
    pub fn load(&self) -> Result<Arc<ConfigDocument>> {
        let (document, freshly_created) = match codec::read_document(&self.path)? {
            ReadOutcome::Loaded(document) => (document, false),
            ReadOutcome::Missing(source) => {
                if !self.options.create_if_missing {
                    return Err(ConfigError::NotFound {
                        path: self.path.clone(),
                        source,
                    });
                }
                self.create_default()?;
                (self.default_config.clone(), true)
            }
        };

        self.check(&document, freshly_created)?;

        debug!(
            path = %self.path.display(),
            keys = document.len(),
            "accepted configuration"
        );
        Ok(self.current.update(document))
    }

    fn check(&self, document: &ConfigDocument, freshly_created: bool) -> Result<()> {
        // A freshly created document is a copy of the defaults.
        let unedited = freshly_created || *document == self.default_config;
        if self.options.reject_if_unedited && unedited {
            return Err(ConfigError::Unedited {
                path: self.path.clone(),
                freshly_created,
            });
        }

        if self.options.reject_on_key_mismatch {
            let drift = document.key_drift(&self.default_config);
            if !drift.is_empty() {
                return Err(ConfigError::KeyMismatch {
                    path: self.path.clone(),
                    missing: drift.missing,
                    unexpected: drift.unexpected,
                });
            }
        }

        Ok(())
    }

    /// The current accepted document.
    pub fn config(&self) -> Arc<ConfigDocument> {
        self.current.get()
    }

    /// Converts the current document into a typed value.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        self.current.get().deserialize()
    }

    /// The resolved configuration path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The default document.
    pub const fn default_config(&self) -> &ConfigDocument {
        &self.default_config
    }

    /// The policy this loader was built with.
    pub const fn options(&self) -> LoaderOptions {
        self.options
    }
}
