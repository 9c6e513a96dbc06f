//! Integration tests which run the `grubconf` binary against scratch files.

use camino::Utf8PathBuf;
use clap::Parser;

mod cli;

#[derive(Debug, Parser)]
#[clap(name = "tests-integration")]
#[clap(rename_all = "kebab-case")]
pub(crate) enum Opt {
    /// Run the command line tests against a built binary
    RunCli {
        /// Path to the binary under test
        #[clap(long, default_value = "grubconf")]
        bin: Utf8PathBuf,

        #[clap(flatten)]
        testargs: libtest_mimic::Arguments,
    },
}

fn main() {
    let opt = Opt::parse();
    let r = match opt {
        Opt::RunCli { bin, testargs } => cli::run(bin, testargs),
    };
    if let Err(e) = r {
        eprintln!("error: {e:?}");
        std::process::exit(1);
    }
}
