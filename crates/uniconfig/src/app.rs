//! Interactive entry point.

use crate::error::AppResult;
use std::io::Write;
use tracing::debug;
use uniconfig_common::{banner, PACKAGE_NAME, VERSION};

/// Prints the package banner to `out`.
pub fn run(out: &mut impl Write) -> AppResult<()> {
    debug!(package = PACKAGE_NAME, version = VERSION, "printing banner");
    out.write_all(banner().as_bytes())?;
    out.flush()?;
    Ok(())
}
