//! The main entrypoint for grubconf, which edits kernel flags in legacy
//! GRUB configuration files.

use std::process::ExitCode;

use anyhow::Result;

fn run() -> Result<()> {
    grubconf_utils::initialize_tracing();
    tracing::trace!("starting {}", env!("CARGO_PKG_NAME"));
    grubconf_lib::cli::run_from_iter(std::env::args())
}

fn main() -> ExitCode {
    grubconf_utils::run_main(run)
}
