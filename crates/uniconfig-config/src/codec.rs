//! Reading and writing configuration files on disk.
//!
//! Reads tolerate invalid UTF-8 by dropping the offending bytes. Writes go
//! through a temporary file in the target directory that is renamed over
//! the destination, so readers never observe a half-written file.

use crate::document::ConfigDocument;
use crate::error::{ConfigError, Result};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Outcome of reading a configuration file.
#[derive(Debug)]
pub enum ReadOutcome {
    /// The file does not exist.
    Missing(io::Error),
    /// The file existed and parsed.
    Loaded(ConfigDocument),
}

/// Decodes `bytes` as UTF-8, skipping invalid sequences.
///
/// Returns the decoded text and the number of bytes dropped.
pub fn decode_lossy(bytes: &[u8]) -> (String, usize) {
    let mut text = String::with_capacity(bytes.len());
    let mut dropped = 0;

    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
        dropped += chunk.invalid().len();
    }

    (text, dropped)
}

/// Reads and parses the document at `path`.
pub fn read_document(path: &Path) -> Result<ReadOutcome> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "configuration file does not exist");
            return Ok(ReadOutcome::Missing(err));
        }
        Err(err) => return Err(ConfigError::io(path, err)),
    };

    let (text, dropped) = decode_lossy(&bytes);
    if dropped > 0 {
        warn!(
            path = %path.display(),
            dropped,
            "dropped invalid UTF-8 bytes while reading configuration"
        );
    }

    ConfigDocument::from_toml_str(&text)
        .map(ReadOutcome::Loaded)
        .map_err(|source| ConfigError::MalformedDocument {
            path: path.to_path_buf(),
            source,
        })
}

/// Symbolic link hops followed before giving up on a config path.
const MAX_SYMLINK_HOPS: usize = 40;

/// Follows `path` through any symbolic links to the file that should
/// actually be written. Dangling links resolve to their (missing) target.
pub fn resolve_write_target(path: &Path) -> Result<PathBuf> {
    let mut target = path.to_path_buf();

    for _ in 0..MAX_SYMLINK_HOPS {
        match std::fs::symlink_metadata(&target) {
            Ok(meta) if meta.file_type().is_symlink() => {
                let link = std::fs::read_link(&target).map_err(|err| ConfigError::io(&target, err))?;
                target = match target.parent() {
                    Some(parent) if link.is_relative() => parent.join(link),
                    _ => link,
                };
            }
            _ => return Ok(target),
        }
    }

    Err(ConfigError::io(
        path,
        io::Error::new(io::ErrorKind::Other, "too many levels of symbolic links"),
    ))
}

/// Creates the staging file next to `target`.
///
/// An existing target's permissions are carried over; a new file gets the
/// default creation mode filtered through the process umask.
fn stage_next_to(target: &Path, dir: &Path) -> io::Result<NamedTempFile> {
    let existing = std::fs::metadata(target).ok().map(|meta| meta.permissions());

    let mut builder = tempfile::Builder::new();
    builder.prefix(".uniconfig-");
    #[cfg(unix)]
    {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(Permissions::from_mode(0o666));
    }

    let staged = builder.tempfile_in(dir)?;
    if let Some(permissions) = existing {
        staged.as_file().set_permissions(permissions)?;
    }
    Ok(staged)
}

/// Serializes `document` to `path`, creating parent directories and
/// replacing any existing file.
///
/// Symbolic links are written through rather than replaced, and an existing
/// file keeps its permissions.
pub fn write_document(path: &Path, document: &ConfigDocument) -> Result<()> {
    let text = document
        .to_toml_string()
        .map_err(|source| ConfigError::Serialize {
            path: path.to_path_buf(),
            source,
        })?;

    let target = resolve_write_target(path)?;
    let parent = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|err| ConfigError::io(parent, err))?;

    let mut staged = stage_next_to(&target, parent).map_err(|err| ConfigError::io(parent, err))?;
    staged
        .write_all(text.as_bytes())
        .and_then(|()| staged.as_file().sync_all())
        .map_err(|err| ConfigError::io(staged.path(), err))?;

    staged
        .persist(&target)
        .map_err(|err| ConfigError::io(&target, err.error))?;

    debug!(
        path = %path.display(),
        target = %target.display(),
        bytes = text.len(),
        "wrote configuration file"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uniconfig_common::test_utils::{create_temp_dir, write_file};

    #[test]
    fn test_decode_drops_invalid_bytes() {
        let (text, dropped) = decode_lossy(b"name = \"a\xffb\"\n");
        assert_eq!(text, "name = \"ab\"\n");
        assert_eq!(dropped, 1);
    }

    #[test]
    fn test_decode_valid_input_untouched() {
        let (text, dropped) = decode_lossy("title = \"żółw\"".as_bytes());
        assert_eq!(text, "title = \"żółw\"");
        assert_eq!(dropped, 0);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = create_temp_dir();
        let outcome = read_document(&dir.path().join("absent.toml")).unwrap();
        assert!(matches!(outcome, ReadOutcome::Missing(_)));
    }

    #[test]
    fn test_read_malformed_file() {
        let dir = create_temp_dir();
        let path = dir.path().join("broken.toml");
        write_file(&path, "port = [unclosed");

        let err = read_document(&path).unwrap_err();
        assert!(matches!(err, ConfigError::MalformedDocument { .. }));
        assert_eq!(err.path(), Some(path.as_path()));
    }

    #[test]
    fn test_write_creates_parents_and_leaves_no_temp_files() {
        let dir = create_temp_dir();
        let path = dir.path().join("nested").join("deeper").join("app.toml");
        let document = ConfigDocument::from_toml_str("port = 8080\n").unwrap();

        write_document(&path, &document).unwrap();

        let entries: Vec<_> = std::fs::read_dir(path.parent().unwrap())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("app.toml")]);

        match read_document(&path).unwrap() {
            ReadOutcome::Loaded(loaded) => assert_eq!(loaded, document),
            ReadOutcome::Missing(err) => panic!("file should exist: {err}"),
        }
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = create_temp_dir();
        let path = dir.path().join("app.toml");
        write_file(&path, "old = true\nextra = 1\n");

        let document = ConfigDocument::from_toml_str("new = true\n").unwrap();
        write_document(&path, &document).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new = true\n");
    }

    #[cfg(unix)]
    mod unix {
        use super::*;
        use std::os::unix::fs::{symlink, PermissionsExt};

        fn mode(path: &Path) -> u32 {
            std::fs::metadata(path).unwrap().permissions().mode() & 0o777
        }

        #[test]
        fn test_new_file_gets_umask_mode() {
            let dir = create_temp_dir();
            let reference = dir.path().join("reference");
            std::fs::File::create(&reference).unwrap();

            let path = dir.path().join("app.toml");
            write_document(&path, &ConfigDocument::new()).unwrap();

            assert_eq!(mode(&path), mode(&reference));
        }

        #[test]
        fn test_existing_file_keeps_mode() {
            let dir = create_temp_dir();
            let path = dir.path().join("app.toml");
            write_file(&path, "old = 1\n");
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o640)).unwrap();

            write_document(&path, &ConfigDocument::from_toml_str("new = 1\n").unwrap()).unwrap();

            assert_eq!(mode(&path), 0o640);
        }

        #[test]
        fn test_dangling_link_is_written_through() {
            let dir = create_temp_dir();
            let link = dir.path().join("link.toml");
            symlink("real.toml", &link).unwrap();

            write_document(&link, &ConfigDocument::from_toml_str("port = 1\n").unwrap()).unwrap();

            assert!(std::fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
            assert_eq!(
                std::fs::read_to_string(dir.path().join("real.toml")).unwrap(),
                "port = 1\n"
            );
        }

        #[test]
        fn test_link_to_existing_file_is_kept() {
            let dir = create_temp_dir();
            let real = dir.path().join("shared").join("real.toml");
            write_file(&real, "old = 1\n");
            let link = dir.path().join("link.toml");
            symlink(&real, &link).unwrap();

            assert_eq!(resolve_write_target(&link).unwrap(), real);
            write_document(&link, &ConfigDocument::from_toml_str("new = 1\n").unwrap()).unwrap();

            assert!(std::fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
            assert_eq!(std::fs::read_to_string(&real).unwrap(), "new = 1\n");
        }

        #[test]
        fn test_link_loop_is_an_error() {
            let dir = create_temp_dir();
            let a = dir.path().join("a.toml");
            let b = dir.path().join("b.toml");
            symlink(&b, &a).unwrap();
            symlink(&a, &b).unwrap();

            let err = resolve_write_target(&a).unwrap_err();
            assert!(matches!(err, ConfigError::Io { .. }));
        }
    }
}
