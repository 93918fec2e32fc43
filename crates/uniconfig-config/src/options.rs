//! Loader policy flags and their defaults.

/// Policy applied by [`crate::ConfigLoader`]. Fixed for the loader's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoaderOptions {
    /// Write the defaults to disk when the file is missing instead of failing.
    pub create_if_missing: bool,
    /// Reject a document that is structurally equal to the defaults.
    pub reject_if_unedited: bool,
    /// Reject a document whose top-level keys differ from the defaults.
    pub reject_on_key_mismatch: bool,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            create_if_missing: true,
            reject_if_unedited: true,
            reject_on_key_mismatch: true,
        }
    }
}

impl LoaderOptions {
    /// All checks disabled and no file creation.
    pub const fn permissive() -> Self {
        Self {
            create_if_missing: false,
            reject_if_unedited: false,
            reject_on_key_mismatch: false,
        }
    }

    /// Sets [`Self::create_if_missing`].
    #[must_use]
    pub const fn create_if_missing(mut self, enabled: bool) -> Self {
        self.create_if_missing = enabled;
        self
    }

    /// Sets [`Self::reject_if_unedited`].
    #[must_use]
    pub const fn reject_if_unedited(mut self, enabled: bool) -> Self {
        self.reject_if_unedited = enabled;
        self
    }

    /// Sets [`Self::reject_on_key_mismatch`].
    #[must_use]
    pub const fn reject_on_key_mismatch(mut self, enabled: bool) -> Self {
        self.reject_on_key_mismatch = enabled;
        self
    }
}
