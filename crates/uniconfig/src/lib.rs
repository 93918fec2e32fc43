//! # UniConfig
//!
//! Bootstrap TOML configuration files from defaults and refuse configs
//! nobody edited.
//!
//! This crate is the facade over the workspace: it re-exports the loader
//! from `uniconfig-config` and hosts the interactive entry point that prints
//! the package banner.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod error;

pub use app::*;
pub use error::*;
pub use uniconfig_config::{
    ConfigDocument, ConfigError, ConfigLoader, ErrorKind, KeyDrift, LoaderOptions,
};
