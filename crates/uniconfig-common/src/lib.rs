//! # UniConfig Common
//!
//! Package metadata, logging setup, and shared test helpers for UniConfig.
//!
//! Everything here is read-only or process-wide setup used by the other
//! crates in the workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod logging;
pub mod metadata;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use logging::*;
pub use metadata::*;
