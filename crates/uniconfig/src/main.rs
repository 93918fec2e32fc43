//! Main entry point for UniConfig.

use uniconfig::{run, AppResult};
use uniconfig_common::init_default_logging;

fn main() -> AppResult<()> {
    init_default_logging()?;

    let stdout = std::io::stdout();
    run(&mut stdout.lock())
}
