//! The ordered flags of one kernel line.

use std::str::FromStr;

use crate::{Action, DesiredState, Flag, ParseError};

/// The ordered flags of a single `kernel` line.
///
/// Order is the on-disk order.  Keys are not required to be unique; lookups
/// and updates operate on the first flag with a matching key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlagList(Vec<Flag>);

impl FlagList {
    /// Parse the arguments of a kernel line, i.e. everything after the
    /// `kernel` keyword.
    ///
    /// Words are split with shell quoting rules; the quotes themselves are
    /// consumed.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let words = shlex::split(input.trim())
            .ok_or_else(|| ParseError::UnbalancedQuotes(input.trim().to_owned()))?;
        words.iter().map(|w| Flag::parse(w)).collect()
    }

    /// Returns an iterator over all flags in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Flag> {
        self.0.iter()
    }

    /// Number of flags on the line.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the line has no flags at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Locate a flag with the given key.
    ///
    /// Returns the first flag matching the given key, or `None` if not found.
    pub fn find(&self, key: &str) -> Option<&Flag> {
        self.position(key).map(|i| &self.0[i])
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.0.iter().position(|f| f.key() == key)
    }

    /// Ensure the flag is present.
    ///
    /// Returns `Action::Added` if no flag with the same key existed; the
    /// flag is appended in the form it was given.
    ///
    /// Returns `Action::Modified` if a key-value flag with the same key
    /// existed with a different value; only its value is replaced.
    ///
    /// Returns `Action::Existed` otherwise.  In particular an existing
    /// switch is never turned into a key-value flag, and a requested switch
    /// is satisfied by an existing key-value flag.
    pub fn add(&mut self, flag: &Flag) -> Action {
        let Some(i) = self.position(flag.key()) else {
            self.0.push(flag.clone());
            return Action::Added;
        };
        let existing = &mut self.0[i];
        match flag.value() {
            Some(wanted) if existing.value().is_some_and(|current| current != wanted) => {
                existing.set_value(wanted);
                Action::Modified
            }
            _ => Action::Existed,
        }
    }

    /// Remove every flag with the given key.
    ///
    /// Returns `true` if any flag was removed.
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|f| f.key() != key);
        self.0.len() != before
    }

    /// Apply an already parsed flag in the desired state.
    pub fn apply(&mut self, flag: &Flag, state: DesiredState) -> Action {
        match state {
            DesiredState::Present => self.add(flag),
            DesiredState::Absent if self.remove(flag.key()) => Action::Removed,
            DesiredState::Absent => Action::Missing,
        }
    }

    /// Parse `spec` (`KEY` or `KEY=VALUE`) and apply it in the desired state.
    ///
    /// Returns whether the list was modified.
    pub fn merge(&mut self, spec: &str, state: DesiredState) -> Result<bool, ParseError> {
        let flag = Flag::parse(spec)?;
        Ok(self.apply(&flag, state).changed())
    }
}

impl FromStr for FlagList {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl FromIterator<Flag> for FlagList {
    fn from_iter<T: IntoIterator<Item = Flag>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a FlagList {
    type Item = &'a Flag;
    type IntoIter = std::slice::Iter<'a, Flag>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl std::fmt::Display for FlagList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut it = self.0.iter();
        if let Some(first) = it.next() {
            write!(f, "{first}")?;
        }
        for flag in it {
            write!(f, " {flag}")?;
        }
        Ok(())
    }
}
