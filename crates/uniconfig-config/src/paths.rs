//! Home-directory expansion for configuration paths.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};
use tracing::warn;

/// Expands a leading `~` to the current user's home directory.
///
/// Only the bare `~` component is recognized; `~user` forms and paths
/// without a leading tilde are returned unchanged. When no home directory
/// can be determined the path is returned as given.
pub fn expand_home(path: &Path) -> PathBuf {
    expand_home_with(path, dirs::home_dir())
}

fn expand_home_with(path: &Path, home: Option<PathBuf>) -> PathBuf {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == OsStr::new("~") => match home {
            Some(home) if components.as_path().as_os_str().is_empty() => home,
            Some(home) => home.join(components.as_path()),
            None => {
                warn!(path = %path.display(), "cannot expand '~': home directory is unknown");
                path.to_path_buf()
            }
        },
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn home() -> Option<PathBuf> {
        Some(PathBuf::from("/home/tester"))
    }

    #[test]
    fn test_expands_tilde_prefix() {
        assert_eq!(
            expand_home_with(Path::new("~/.config/app/config.toml"), home()),
            PathBuf::from("/home/tester/.config/app/config.toml")
        );
    }

    #[test]
    fn test_expands_bare_tilde() {
        assert_eq!(expand_home_with(Path::new("~"), home()), PathBuf::from("/home/tester"));
    }

    #[test]
    fn test_leaves_other_paths_alone() {
        for raw in ["/etc/app.toml", "relative/app.toml", "~user/app.toml", "dir/~/app.toml"] {
            assert_eq!(expand_home_with(Path::new(raw), home()), PathBuf::from(raw));
        }
    }

    #[test]
    fn test_unknown_home_keeps_path() {
        assert_eq!(
            expand_home_with(Path::new("~/app.toml"), None),
            PathBuf::from("~/app.toml")
        );
    }
}
