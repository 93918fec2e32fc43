//! # UniConfig Config
//!
//! Bootstraps TOML configuration files from a default document.
//!
//! A [`ConfigLoader`] reads the file at a given path, writes the defaults
//! there if it is missing, and refuses documents that were never edited or
//! whose top-level keys drifted away from the defaults.
//!
//! ```no_run
//! use uniconfig_config::{ConfigDocument, ConfigLoader, ErrorKind};
//!
//! let defaults = ConfigDocument::from_toml_str("port = 8080\ndebug = false\n")?;
//!
//! match ConfigLoader::new("~/.config/app/config.toml", defaults) {
//!     Ok(loader) => println!("port = {:?}", loader.config().get("port")),
//!     Err(err) if err.kind() == ErrorKind::FreshlyCreated => {
//!         println!("wrote defaults, edit the file and restart");
//!     }
//!     Err(err) => return Err(err.into()),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod codec;
pub mod document;
pub mod error;
pub mod loader;
pub mod options;
pub mod paths;

pub use cache::*;
pub use document::*;
pub use error::*;
pub use loader::*;
pub use options::*;
