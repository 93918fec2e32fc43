//! Test utilities and shared fixtures for the UniConfig workspace.
//!
//! Enabled for in-crate tests and, through the `testing` feature, for the
//! integration tests of dependent crates.

use std::path::Path;
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt()
            .with_test_writer()
            .with_env_filter(filter)
            .try_init();
    });
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(any(test, feature = "tempfile"))]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Write `contents` to `path`, creating parent directories as needed.
pub fn write_file(path: &Path, contents: impl AsRef<[u8]>) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directories");
    }
    std::fs::write(path, contents).expect("Failed to write fixture file");
}

/// Document fixtures shared by loader tests.
#[cfg(any(test, feature = "toml"))]
pub mod document_fixtures {
    /// The `port`/`debug` default used throughout the loader tests.
    pub fn server_defaults() -> toml::Table {
        server_table(8080, false)
    }

    /// A `port`/`debug` table with the given values.
    pub fn server_table(port: i64, debug: bool) -> toml::Table {
        let mut table = toml::Table::new();
        table.insert("port".to_string(), toml::Value::Integer(port));
        table.insert("debug".to_string(), toml::Value::Boolean(debug));
        table
    }

    /// A default document with nested tables and arrays.
    pub fn nested_defaults_toml() -> &'static str {
        r#"
name = "service"
tags = ["alpha", "beta"]

[database]
host = "localhost"
port = 5432

[database.pool]
max = 16
idle_timeout_secs = 30
"#
    }

    /// Same shape as [`nested_defaults_toml`] with edited nested values.
    pub fn nested_edited_toml() -> &'static str {
        r#"
name = "service"
tags = ["alpha", "beta", "gamma"]

[database]
host = "db.internal"
port = 5432
replica = true

[database.pool]
max = 64
"#
    }
}
