//! # grubconf command line interface
//!
//! Command line tool to edit kernel flags in legacy GRUB configuration.

use std::ffi::OsString;
use std::io::Write;

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use fn_error_context::context;
use grubconf_kernel_cmdline::DesiredState;
use grubconf_utils::PathQuotedDisplay;

use crate::{load, render, update_file, EditOptions, ModuleArgs, Status};

/// Options for editing a kernel flag
#[derive(Debug, Parser, PartialEq, Eq)]
pub struct UpdateOpts {
    /// The kernel flag, as KEY or KEY=VALUE
    pub flag: String,

    /// Value for the flag; the same as passing KEY=VALUE
    #[clap(long)]
    pub value: Option<String>,

    /// Whether the flag should be `present` or `absent` [default: present]
    #[clap(long)]
    pub state: Option<DesiredState>,

    /// The configuration file to edit [default: /etc/grub.conf]
    #[clap(long)]
    pub file: Option<Utf8PathBuf>,

    /// Print the result as a JSON object
    #[clap(long)]
    pub json: bool,
}

/// Options for module mode
#[derive(Debug, Parser, PartialEq, Eq)]
pub struct ModuleOpts {
    /// File holding shell-quoted key=value arguments
    pub args_file: Utf8PathBuf,
}

/// Options for printing the canonical form of a file
#[derive(Debug, Parser, PartialEq, Eq)]
pub struct ShowOpts {
    /// The configuration file to read [default: /etc/grub.conf]
    #[clap(long)]
    pub file: Option<Utf8PathBuf>,
}

/// Edit kernel flags in legacy GRUB configuration files.
///
/// Every `kernel` line of every `title` stanza is updated.
#[derive(Debug, Parser, PartialEq, Eq)]
#[clap(name = "grubconf")]
#[clap(rename_all = "kebab-case")]
#[clap(version)]
pub enum Opt {
    /// Add, update, or remove a kernel flag
    ///
    /// With `--state present` (the default) a missing flag is appended, and
    /// an existing KEY=VALUE flag gets the new value.  An existing bare flag
    /// is left alone even if a value is requested.  With `--state absent`
    /// every flag with the given key is removed.
    ///
    /// The file is only rewritten if something changed.
    Update(UpdateOpts),
    /// Run as an automation module
    ///
    /// Reads `file=`, `flag=` (or `name=`), `state=` and `value=` from the
    /// arguments file and always prints a JSON status object.
    Module(ModuleOpts),
    /// Print a configuration file the way it would be written back
    Show(ShowOpts),
}

/// Parse the provided arguments and execute.
/// Calls [`clap::Error::exit`] on failure, printing the error message and aborting the program.
pub fn run_from_iter<I>(args: I) -> Result<()>
where
    I: IntoIterator,
    I::Item: Into<OsString> + Clone,
{
    run_from_opt(Opt::parse_from(args), &mut std::io::stdout().lock())
}

fn run_from_opt(opt: Opt, out: &mut impl Write) -> Result<()> {
    match opt {
        Opt::Update(opts) => update(opts, out),
        Opt::Module(opts) => module(&opts.args_file, out),
        Opt::Show(opts) => show(opts, out),
    }
}

fn update(opts: UpdateOpts, out: &mut impl Write) -> Result<()> {
    let defaults = EditOptions::load()?;
    let edit = EditOptions {
        path: opts.file.unwrap_or(defaults.path),
        state: opts.state.unwrap_or(defaults.state),
    };
    let spec = match &opts.value {
        Some(value) => format!("{}={value}", opts.flag),
        None => opts.flag.clone(),
    };
    let r = update_file(&edit, &spec)
        .with_context(|| format!("Editing {}", PathQuotedDisplay::new(&edit.path)));
    if opts.json {
        let status = match &r {
            Ok(changed) => Status::ok(&opts.flag, *changed),
            Err(e) => Status::failed(e),
        };
        writeln!(out, "{}", status.to_json()?)?;
    } else if let Ok(changed) = &r {
        writeln!(out, "{}", if *changed { "changed" } else { "unchanged" })?;
    }
    r.map(drop)
}

#[context("Reading module arguments from {}", PathQuotedDisplay::new(path))]
fn read_module_args(path: &Utf8Path) -> Result<ModuleArgs> {
    let contents = std::fs::read_to_string(path)?;
    Ok(ModuleArgs::parse(&contents)?)
}

fn run_module(args_file: &Utf8Path) -> Result<(String, bool)> {
    let args = read_module_args(args_file)?;
    // Validated before touching the configuration file
    let spec = args.flag_spec()?;
    let edit = args.options(EditOptions::load()?);
    let changed = update_file(&edit, &spec)
        .with_context(|| format!("Editing {}", PathQuotedDisplay::new(&edit.path)))?;
    Ok((args.flag.unwrap_or_default(), changed))
}

fn module(args_file: &Utf8Path, out: &mut impl Write) -> Result<()> {
    let r = run_module(args_file);
    let status = match &r {
        Ok((flag, changed)) => Status::ok(flag, *changed),
        Err(e) => Status::failed(e),
    };
    writeln!(out, "{}", status.to_json()?)?;
    r.map(drop)
}

fn show(opts: ShowOpts, out: &mut impl Write) -> Result<()> {
    let path = match opts.file {
        Some(path) => path,
        None => EditOptions::load()?.path,
    };
    let doc = load(&path)?;
    out.write_all(render(&doc).as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use similar_asserts::assert_eq;

    const GRUB_CONF: &str = indoc! { "
        default=0
        title Linux
          root (hd0,0)
          kernel /vmlinuz ro rhgb quiet
    " };

    fn fixture(td: &tempfile::TempDir, name: &str, contents: &str) -> Utf8PathBuf {
        let path = Utf8PathBuf::try_from(td.path().join(name)).unwrap();
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn run(args: &[&str]) -> (Result<()>, String) {
        let opt = Opt::try_parse_from(std::iter::once("grubconf").chain(args.iter().copied()))
            .unwrap();
        let mut out = Vec::new();
        let r = run_from_opt(opt, &mut out);
        (r, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_parse_update() {
        let o = Opt::try_parse_from(["grubconf", "update", "rhgb", "--state", "absent"]).unwrap();
        assert_eq!(
            o,
            Opt::Update(UpdateOpts {
                flag: "rhgb".into(),
                value: None,
                state: Some(DesiredState::Absent),
                file: None,
                json: false,
            })
        );

        let o = Opt::try_parse_from([
            "grubconf",
            "update",
            "transparent_hugepages",
            "--value=never",
            "--file=/boot/grub/menu.lst",
            "--json",
        ])
        .unwrap();
        let Opt::Update(opts) = o else {
            panic!("Expected update, found {o:?}");
        };
        assert_eq!(opts.value.as_deref(), Some("never"));
        assert_eq!(opts.file.as_deref(), Some(Utf8Path::new("/boot/grub/menu.lst")));
        assert!(opts.json);
        assert_eq!(opts.state, None);

        assert!(Opt::try_parse_from(["grubconf", "update", "rhgb", "--state", "gone"]).is_err());
        assert!(Opt::try_parse_from(["grubconf", "update"]).is_err());
    }

    #[test]
    fn test_parse_module_and_show() {
        let o = Opt::try_parse_from(["grubconf", "module", "/tmp/args"]).unwrap();
        assert_eq!(
            o,
            Opt::Module(ModuleOpts {
                args_file: "/tmp/args".into()
            })
        );
        let o = Opt::try_parse_from(["grubconf", "show"]).unwrap();
        assert_eq!(o, Opt::Show(ShowOpts { file: None }));
    }

    #[test]
    fn test_update() {
        let td = tempfile::tempdir().unwrap();
        let path = fixture(&td, "grub.conf", GRUB_CONF);

        let (r, out) = run(&["update", "rhgb", "--state=absent", "--file", path.as_str()]);
        r.unwrap();
        assert_eq!(out, "changed\n");
        let (r, out) = run(&["update", "rhgb", "--state=absent", "--file", path.as_str()]);
        r.unwrap();
        assert_eq!(out, "unchanged\n");

        let (r, out) = run(&[
            "update",
            "elevator",
            "--value",
            "deadline",
            "--json",
            "--file",
            path.as_str(),
        ]);
        r.unwrap();
        assert_eq!(out, "{\"flag\":\"elevator\",\"changed\":true}\n");
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "default=0\ntitle Linux\n\troot (hd0,0)\n\tkernel /vmlinuz ro quiet elevator=deadline\n"
        );
    }

    #[test]
    fn test_update_failure() {
        let td = tempfile::tempdir().unwrap();
        let path = td.path().join("missing.conf");
        let path = path.to_str().unwrap();

        let (r, out) = run(&["update", "quiet", "--file", path]);
        let err = r.unwrap_err();
        assert!(format!("{err:#}").contains("Failed reading"));
        assert_eq!(out, "");

        let (r, out) = run(&["update", "quiet", "--json", "--file", path]);
        assert!(r.is_err());
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["failed"], true);
        assert!(v["msg"].as_str().unwrap().contains("Failed reading"));
    }

    #[test]
    fn test_update_empty_flag() {
        // reported before the (missing) file is opened
        let (r, out) = run(&[
            "update",
            "",
            "--value",
            "x",
            "--json",
            "--file",
            "/nonexistent/grub.conf",
        ]);
        assert!(r.is_err());
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert!(v["msg"]
            .as_str()
            .unwrap()
            .ends_with("No 'flag' parameter provided"));
    }

    #[test]
    fn test_module() {
        let td = tempfile::tempdir().unwrap();
        let conf = fixture(&td, "grub.conf", GRUB_CONF);
        let args = fixture(
            &td,
            "args",
            &format!("flag=transparent_hugepages value=never file={conf}"),
        );

        let (r, out) = run(&["module", args.as_str()]);
        r.unwrap();
        assert_eq!(
            out,
            "{\"flag\":\"transparent_hugepages\",\"changed\":true}\n"
        );
        let (r, out) = run(&["module", args.as_str()]);
        r.unwrap();
        assert_eq!(
            out,
            "{\"flag\":\"transparent_hugepages\",\"changed\":false}\n"
        );
        assert!(std::fs::read_to_string(&conf)
            .unwrap()
            .contains("kernel /vmlinuz ro rhgb quiet transparent_hugepages=never\n"));
    }

    #[test]
    fn test_module_missing_flag() {
        let td = tempfile::tempdir().unwrap();
        // the configuration file does not exist; the missing flag is
        // reported before it is opened
        let args = fixture(&td, "args", "state=absent file=/nonexistent/grub.conf");
        let (r, out) = run(&["module", args.as_str()]);
        assert!(r.is_err());
        assert_eq!(
            out,
            "{\"failed\":true,\"msg\":\"No 'flag' parameter provided\"}\n"
        );
    }

    #[test]
    fn test_module_malformed() {
        let td = tempfile::tempdir().unwrap();
        let conf = fixture(&td, "grub.conf", "title t\n  kernel /vmlinuz A=B=C\n");
        let args = fixture(&td, "args", &format!("flag=quiet file={conf}"));
        let (r, out) = run(&["module", args.as_str()]);
        let err = r.unwrap_err();
        assert!(err
            .downcast_ref::<crate::Error>()
            .is_some_and(|e| e.is_malformed_flag_value()));
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert!(v["msg"].as_str().unwrap().contains("'A=B=C'"));
        // untouched
        assert_eq!(
            std::fs::read_to_string(&conf).unwrap(),
            "title t\n  kernel /vmlinuz A=B=C\n"
        );
    }

    #[test]
    fn test_show() {
        let td = tempfile::tempdir().unwrap();
        let path = fixture(&td, "grub.conf", GRUB_CONF);
        let (r, out) = run(&["show", "--file", path.as_str()]);
        r.unwrap();
        assert_eq!(
            out,
            "default=0\ntitle Linux\n\troot (hd0,0)\n\tkernel /vmlinuz ro rhgb quiet\n"
        );
        // show never writes
        assert_eq!(std::fs::read_to_string(&path).unwrap(), GRUB_CONF);
    }
}
