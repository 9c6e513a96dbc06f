//! Kernel flag parsing utilities for legacy GRUB `kernel` lines.
//!
//! This crate provides functionality for parsing and working with the
//! arguments of a `kernel` line, supporting both key-only switches and
//! key-value pairs.  Words are split with shell quoting rules, so a quoted
//! value may contain whitespace.
//!
//! Unlike the Linux kernel itself, a flag may contain at most one `=`;
//! anything else is rejected as malformed rather than silently truncated.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

mod flag;
mod list;

pub use flag::Flag;
pub use list::FlagList;

/// The keyword that introduces a kernel line inside a stanza.
pub const KERNEL_KEYWORD: &str = "kernel";

/// Errors produced while parsing kernel flags.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A flag contained more than one `=`.
    #[error("Malformed kernel flag '{0}': expected KEY or KEY=VALUE")]
    TooManyEquals(String),
    /// The kernel line could not be split into words.
    #[error("Unbalanced quotes in kernel flags '{0}'")]
    UnbalancedQuotes(String),
    /// A desired state other than `present` or `absent`.
    #[error("Invalid state '{0}', expected 'present' or 'absent'")]
    InvalidState(String),
}

/// The requested state of a flag on every kernel line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DesiredState {
    /// Add the flag, or update its value.
    #[default]
    Present,
    /// Remove the flag.
    Absent,
}

impl FromStr for DesiredState {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(Self::Present),
            "absent" => Ok(Self::Absent),
            o => Err(ParseError::InvalidState(o.to_owned())),
        }
    }
}

impl std::fmt::Display for DesiredState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Present => f.write_str("present"),
            Self::Absent => f.write_str("absent"),
        }
    }
}

/// The outcome of applying a flag to a [`FlagList`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// The flag was not present and was appended.
    Added,
    /// The flag existed with a different value, which was replaced.
    Modified,
    /// The flag existed and was removed.
    Removed,
    /// The flag already satisfied the request; nothing was modified.
    Existed,
    /// The flag was asked to be absent and already was.
    Missing,
}

impl Action {
    /// Whether the list was modified.
    pub fn changed(self) -> bool {
        matches!(self, Self::Added | Self::Modified | Self::Removed)
    }
}
