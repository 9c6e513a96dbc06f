//! Helpers shared by the grubconf binaries: error reporting, logging
//! setup and path display.

use std::process::ExitCode;

mod path;
pub use path::*;
mod tracing_util;
pub use tracing_util::*;

/// Run the body of `main`.
///
/// An error is printed to stderr as `error: ` followed by its whole
/// context chain, and turns into a failing exit status.
pub fn run_main<F>(f: F) -> ExitCode
where
    F: FnOnce() -> anyhow::Result<()>,
{
    use std::io::Write as _;

    use owo_colors::OwoColorize;

    match f() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Nothing sensible to do if stderr is gone.
            let _ = writeln!(anstream::stderr(), "{} {e:#}", "error:".red());
            ExitCode::FAILURE
        }
    }
}
