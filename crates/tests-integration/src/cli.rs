use std::fs;

use anyhow::{ensure, Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use fn_error_context::context;
use indoc::indoc;
use libtest_mimic::Trial;
use serde::Deserialize;
use xshell::{cmd, Shell};

const GRUB_CONF: &str = indoc! { "
    # grub.conf generated by anaconda
    default=0
    timeout=5
    title CentOS (2.6.32-754.el6.x86_64)
            root (hd0,0)
            kernel /vmlinuz-2.6.32-754.el6.x86_64 ro root=/dev/sda1 rhgb quiet
            initrd /initramfs-2.6.32-754.el6.x86_64.img
    title CentOS (2.6.32-696.el6.x86_64)
            root (hd0,0)
            kernel /vmlinuz-2.6.32-696.el6.x86_64 ro root=/dev/sda1 rhgb quiet
            initrd /initramfs-2.6.32-696.el6.x86_64.img
" };

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Status {
    Ok { flag: String, changed: bool },
    Failed { failed: bool, msg: String },
}

/// A scratch directory holding a copy of [`GRUB_CONF`].
struct Fixture {
    // Held for its Drop
    _td: tempfile::TempDir,
    dir: Utf8PathBuf,
    conf: Utf8PathBuf,
}

impl Fixture {
    fn new() -> Result<Self> {
        let td = tempfile::tempdir()?;
        let dir = Utf8PathBuf::try_from(td.path().to_owned())?;
        let conf = dir.join("grub.conf");
        fs::write(&conf, GRUB_CONF)?;
        Ok(Self { _td: td, dir, conf })
    }

    fn write(&self, name: &str, contents: &str) -> Result<Utf8PathBuf> {
        let path = self.dir.join(name);
        fs::write(&path, contents)?;
        Ok(path)
    }

    fn kernel_lines(&self) -> Result<Vec<String>> {
        let contents = fs::read_to_string(&self.conf)?;
        Ok(contents
            .lines()
            .filter(|l| l.trim_start().starts_with("kernel"))
            .map(ToOwned::to_owned)
            .collect())
    }
}

fn parse_status(out: &str) -> Result<Status> {
    serde_json::from_str(out.trim()).with_context(|| format!("Parsing status: {out}"))
}

fn test_update_roundtrip(bin: &Utf8Path) -> Result<()> {
    let sh = Shell::new()?;
    let fx = Fixture::new()?;
    let conf = &fx.conf;

    let out = cmd!(sh, "{bin} update rhgb --state absent --file {conf}").read()?;
    assert_eq!(out, "changed");
    let out = cmd!(sh, "{bin} update rhgb --state absent --file {conf}").read()?;
    assert_eq!(out, "unchanged");

    let out = cmd!(sh, "{bin} update elevator --value deadline --file {conf}").read()?;
    assert_eq!(out, "changed");
    let out = cmd!(sh, "{bin} update elevator=noop --file {conf}").read()?;
    assert_eq!(out, "changed");

    for line in fx.kernel_lines()? {
        assert!(line.starts_with("\tkernel /vmlinuz-"), "{line}");
        assert!(line.ends_with(" ro root=/dev/sda1 quiet elevator=noop"), "{line}");
    }
    Ok(())
}

fn test_update_json(bin: &Utf8Path) -> Result<()> {
    let sh = Shell::new()?;
    let fx = Fixture::new()?;
    let conf = &fx.conf;

    let out = cmd!(sh, "{bin} update quiet --json --file {conf}").read()?;
    match parse_status(&out)? {
        Status::Ok { flag, changed } => {
            assert_eq!(flag, "quiet");
            assert!(!changed);
        }
        o => panic!("Unexpected status: {o:?}"),
    }
    // Nothing changed, so the original layout is kept
    assert_eq!(fs::read_to_string(conf)?, GRUB_CONF);
    Ok(())
}

fn test_malformed(bin: &Utf8Path) -> Result<()> {
    let sh = Shell::new()?;
    let fx = Fixture::new()?;
    let broken = format!("{GRUB_CONF}title broken\n  kernel /vmlinuz A=B=C\n");
    let conf = fx.write("broken.conf", &broken)?;

    let o = cmd!(sh, "{bin} update rhgb --state absent --file {conf}")
        .ignore_status()
        .output()?;
    assert_eq!(o.status.code(), Some(1));
    let stderr = String::from_utf8(o.stderr)?;
    assert!(stderr.contains("error: "), "stderr: {stderr}");
    assert!(stderr.contains("Malformed kernel line 13"), "stderr: {stderr}");
    assert_eq!(fs::read_to_string(&conf)?, broken);
    Ok(())
}

fn test_module(bin: &Utf8Path) -> Result<()> {
    let sh = Shell::new()?;
    let fx = Fixture::new()?;
    let args = fx.write(
        "args",
        &format!("flag=transparent_hugepages value=never file={}", fx.conf),
    )?;

    let out = cmd!(sh, "{bin} module {args}").read()?;
    match parse_status(&out)? {
        Status::Ok { flag, changed } => {
            assert_eq!(flag, "transparent_hugepages");
            assert!(changed);
        }
        o => panic!("Unexpected status: {o:?}"),
    }
    let lines = fx.kernel_lines()?;
    assert_eq!(lines.len(), 2);
    for line in lines {
        assert!(line.ends_with(" rhgb quiet transparent_hugepages=never"), "{line}");
    }
    Ok(())
}

fn test_module_failure(bin: &Utf8Path) -> Result<()> {
    let sh = Shell::new()?;
    let fx = Fixture::new()?;
    let args = fx.write("args", &format!("state=absent file={}", fx.conf))?;

    let o = cmd!(sh, "{bin} module {args}").ignore_status().output()?;
    ensure!(!o.status.success(), "module without a flag succeeded");
    match parse_status(&String::from_utf8(o.stdout)?)? {
        Status::Failed { failed, msg } => {
            assert!(failed);
            assert_eq!(msg, "No 'flag' parameter provided");
        }
        o => panic!("Unexpected status: {o:?}"),
    }
    assert_eq!(fs::read_to_string(&fx.conf)?, GRUB_CONF);
    Ok(())
}

fn test_config_file(bin: &Utf8Path) -> Result<()> {
    let sh = Shell::new()?;
    let fx = Fixture::new()?;
    let config = fx.write(
        "grubconf.toml",
        &format!("file = \"{}\"\nstate = \"absent\"\n", fx.conf),
    )?;

    let out = cmd!(sh, "{bin} update quiet")
        .env("GRUBCONF_CONFIG", &config)
        .read()?;
    assert_eq!(out, "changed");
    for line in fx.kernel_lines()? {
        assert!(line.ends_with(" rhgb"), "{line}");
    }

    // The command line wins over the config file
    let out = cmd!(sh, "{bin} update quiet --state present")
        .env("GRUBCONF_CONFIG", &config)
        .read()?;
    assert_eq!(out, "changed");
    Ok(())
}

fn test_show(bin: &Utf8Path) -> Result<()> {
    let sh = Shell::new()?;
    let fx = Fixture::new()?;
    let conf = &fx.conf;
    let out = cmd!(sh, "{bin} show --file {conf}").read()?;
    assert!(out.starts_with("# grub.conf generated by anaconda\n"));
    assert!(out.contains("\n\tinitrd /initramfs-2.6.32-696.el6.x86_64.img"));
    assert_eq!(fs::read_to_string(conf)?, GRUB_CONF);
    Ok(())
}

fn new_test(
    description: &'static str,
    bin: &Utf8Path,
    f: fn(&Utf8Path) -> Result<()>,
) -> Trial {
    let bin = bin.to_owned();
    Trial::test(description, move || f(&bin).map_err(Into::into))
}

/// Tests of the command line interface.
#[context("Command line tests")]
pub(crate) fn run(bin: Utf8PathBuf, testargs: libtest_mimic::Arguments) -> Result<()> {
    let tests = [
        new_test("update round trip", &bin, test_update_roundtrip),
        new_test("update --json", &bin, test_update_json),
        new_test("malformed kernel line", &bin, test_malformed),
        new_test("module", &bin, test_module),
        new_test("module failure", &bin, test_module_failure),
        new_test("config file", &bin, test_config_file),
        new_test("show", &bin, test_show),
    ];

    libtest_mimic::run(&testargs, tests.into()).exit()
}
