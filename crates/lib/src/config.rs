//! Defaults for which file to edit and how.

use std::env::VarError;

use camino::{Utf8Path, Utf8PathBuf};
use grubconf_kernel_cmdline::DesiredState;
use serde::Deserialize;

use crate::Error;

/// The file edited when none is given.
pub const DEFAULT_PATH: &str = "/etc/grub.conf";

/// The environment variable naming an optional TOML file that overrides
/// the built-in defaults.
pub const CONFIG_VAR: &str = "GRUBCONF_CONFIG";

/// Which file to edit, and the requested state of the flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditOptions {
    /// The configuration file.
    pub path: Utf8PathBuf,
    /// Whether the flag should be present or absent.
    pub state: DesiredState,
}

impl Default for EditOptions {
    fn default() -> Self {
        Self {
            path: DEFAULT_PATH.into(),
            state: DesiredState::default(),
        }
    }
}

/// On-disk form of the defaults; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    file: Option<Utf8PathBuf>,
    state: Option<DesiredState>,
}

impl EditOptions {
    /// The built-in defaults, overridden by the file named in
    /// [`CONFIG_VAR`] if it is set.
    pub fn load() -> Result<Self, Error> {
        Self::from_env_value(std::env::var(CONFIG_VAR))
    }

    fn from_env_value(value: Result<String, VarError>) -> Result<Self, Error> {
        match value {
            Ok(path) => Self::from_config_file(Utf8Path::new(&path)),
            Err(VarError::NotPresent) => Ok(Self::default()),
            Err(VarError::NotUnicode(_)) => Err(Error::InvalidArgument(format!(
                "{CONFIG_VAR} is not valid UTF-8"
            ))),
        }
    }

    /// The built-in defaults, overridden by the TOML file at `path`.
    pub fn from_config_file(path: &Utf8Path) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::read(path, e))?;
        let config: ConfigFile = toml::from_str(&contents).map_err(|e| Error::Config {
            path: path.to_owned(),
            source: Box::new(e),
        })?;
        tracing::debug!("Loaded config from {path}: {config:?}");
        let defaults = Self::default();
        Ok(Self {
            path: config.file.unwrap_or(defaults.path),
            state: config.state.unwrap_or(defaults.state),
        })
    }
}
