//! Errors returned by the editing operations.

use camino::Utf8PathBuf;
use grubconf_kernel_cmdline::ParseError;

/// Whether a file was being read or written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// Opening or reading.
    Read,
    /// Creating or writing.
    Write,
}

impl std::fmt::Display for Access {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read => f.write_str("reading"),
            Self::Write => f.write_str("writing"),
        }
    }
}

/// An error from loading, editing, or saving a configuration.
///
/// None of these are recoverable; the file on disk is only written once
/// parsing and editing have both succeeded.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No flag name was supplied.
    #[error("No 'flag' parameter provided")]
    MissingParameter,
    /// The file could not be read or written.
    #[error("Failed {access} {path}")]
    FileAccess {
        /// What was being done.
        access: Access,
        /// The file.
        path: Utf8PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
    /// A `kernel` line could not be parsed.
    #[error("Malformed kernel line {line}")]
    MalformedKernelLine {
        /// The 1-based line number.
        line: usize,
        /// The underlying error.
        #[source]
        source: ParseError,
    },
    /// The requested flag is not `KEY` or `KEY=VALUE`.
    #[error("Malformed flag")]
    MalformedFlag(#[source] ParseError),
    /// An argument other than the flag itself was invalid.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// The configuration file could not be parsed.
    #[error("Parsing config from {path}")]
    Config {
        /// The configuration file.
        path: Utf8PathBuf,
        /// The underlying error.
        #[source]
        source: Box<toml::de::Error>,
    },
}

impl Error {
    pub(crate) fn read(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::FileAccess {
            access: Access::Read,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::FileAccess {
            access: Access::Write,
            path: path.into(),
            source,
        }
    }

    /// Whether this error was caused by a flag with too many `=`, either
    /// in the file or in the request.
    pub fn is_malformed_flag_value(&self) -> bool {
        matches!(
            self,
            Self::MalformedFlag(ParseError::TooManyEquals(_))
                | Self::MalformedKernelLine {
                    source: ParseError::TooManyEquals(_),
                    ..
                }
        )
    }
}
