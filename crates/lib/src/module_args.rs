//! Arguments passed by an automation tool in module mode.
//!
//! The tool writes a file holding shell-quoted `key=value` words, e.g.
//! `flag=transparent_hugepages value=never state=present`.

use camino::Utf8PathBuf;
use grubconf_kernel_cmdline::DesiredState;

use crate::{EditOptions, Error};

/// Parsed module arguments.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModuleArgs {
    /// The configuration file to edit.
    pub file: Option<Utf8PathBuf>,
    /// The flag name, or a full `KEY=VALUE`.
    pub flag: Option<String>,
    /// The requested state.
    pub state: Option<DesiredState>,
    /// A value for the flag; combined with `flag` as `flag=value`.
    pub value: Option<String>,
}

impl ModuleArgs {
    /// Parse the contents of an arguments file.
    ///
    /// Words without `=` and unknown keys are ignored.
    pub fn parse(input: &str) -> Result<Self, Error> {
        let words = shlex::split(input)
            .ok_or_else(|| Error::InvalidArgument("Unbalanced quotes in module arguments".into()))?;
        let mut r = Self::default();
        for word in words {
            let Some((key, value)) = word.split_once('=') else {
                tracing::debug!("Ignoring argument without value: {word}");
                continue;
            };
            match key {
                "file" => r.file = Some(value.into()),
                "flag" | "name" => r.flag = Some(value.to_owned()),
                "state" => {
                    let state = value
                        .parse::<DesiredState>()
                        .map_err(|e| Error::InvalidArgument(e.to_string()))?;
                    r.state = Some(state);
                }
                "value" => r.value = Some(value.to_owned()),
                _ => tracing::debug!("Ignoring unknown argument: {key}"),
            }
        }
        Ok(r)
    }

    /// The flag as given to [`crate::update_flag`]: `flag`, or
    /// `flag=value` when a value was supplied.
    pub fn flag_spec(&self) -> Result<String, Error> {
        let flag = self
            .flag
            .as_deref()
            .filter(|f| !f.is_empty())
            .ok_or(Error::MissingParameter)?;
        Ok(match &self.value {
            Some(value) => format!("{flag}={value}"),
            None => flag.to_owned(),
        })
    }

    /// Overlay these arguments onto `defaults`.
    pub fn options(&self, defaults: EditOptions) -> EditOptions {
        EditOptions {
            path: self.file.clone().unwrap_or(defaults.path),
            state: self.state.unwrap_or(defaults.state),
        }
    }
}
