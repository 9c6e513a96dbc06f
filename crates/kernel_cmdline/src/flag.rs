//! A single kernel flag.

use std::str::FromStr;

use crate::ParseError;

/// A single kernel flag, either a bare switch (`quiet`) or a
/// key-value pair (`console=ttyS0`).
///
/// The flag is a key-value pair exactly when it carries a value, so the two
/// forms can never disagree.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Flag {
    key: String,
    value: Option<String>,
}

impl Flag {
    /// Parse a single flag from one word of a kernel line.
    ///
    /// A word without `=` is a switch.  A word with exactly one `=` is split
    /// into key and value.  Any further `=` makes the word malformed.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let trimmed = input.trim();
        let Some((key, value)) = trimmed.split_once('=') else {
            return Ok(Self::switch(trimmed));
        };
        if value.contains('=') {
            return Err(ParseError::TooManyEquals(trimmed.to_owned()));
        }
        Ok(Self::with_value(key, value))
    }

    /// Construct a key-only switch.
    pub fn switch(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
        }
    }

    /// Construct a key-value flag.
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
        }
    }

    /// Returns the key part of the flag
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the optional value part of the flag
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Whether this is a key-value flag rather than a switch.
    pub fn is_kv(&self) -> bool {
        self.value.is_some()
    }

    pub(crate) fn set_value(&mut self, value: &str) {
        self.value = Some(value.to_owned());
    }
}

impl FromStr for Flag {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Flag {
    // Values are written back unquoted.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}={}", self.key, value),
            None => f.write_str(&self.key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // convenience method for tests
    fn flag(s: &str) -> Flag {
        Flag::parse(s).unwrap()
    }

    #[test]
    fn test_flag_simple() {
        let switch = flag("quiet");
        assert_eq!(switch.key(), "quiet");
        assert_eq!(switch.value(), None);
        assert!(!switch.is_kv());

        let kv = flag("console=ttyS0");
        assert_eq!(kv.key(), "console");
        assert_eq!(kv.value(), Some("ttyS0"));
        assert!(kv.is_kv());
    }

    #[test]
    fn test_flag_empty_value() {
        // `KEY=` is still a key-value flag, just with an empty value
        let kv = flag("crashkernel=");
        assert_eq!(kv.key(), "crashkernel");
        assert_eq!(kv.value(), Some(""));
        assert_eq!(kv.to_string(), "crashkernel=");
    }

    #[test]
    fn test_flag_value_with_spaces() {
        // shell splitting already removed the quotes
        let kv = flag("rd.cmdline=ask me");
        assert_eq!(kv.value(), Some("ask me"));
        assert_eq!(kv.to_string(), "rd.cmdline=ask me");
    }

    #[test]
    fn test_flag_too_many_equals() {
        let err = Flag::parse("A=B=C").unwrap_err();
        assert_eq!(err, ParseError::TooManyEquals("A=B=C".into()));
        assert!(err.to_string().contains("'A=B=C'"));

        assert!(Flag::parse("root=UUID=1234").is_err());
        assert!("a==".parse::<Flag>().is_err());
    }

    #[test]
    fn test_flag_display() {
        for s in ["quiet", "ro", "console=tty0", "transparent_hugepages=never"] {
            assert_eq!(flag(s).to_string(), s);
        }
    }

    #[test]
    fn test_flag_equality() {
        // mixed variants are never equal
        assert_ne!(flag("quiet"), flag("quiet=1"));
        assert_eq!(flag("quiet"), Flag::switch("quiet"));
        assert_eq!(flag("a=b"), Flag::with_value("a", "b"));
        // no dash/underscore folding, keys are compared verbatim
        assert_ne!(flag("a-b"), flag("a_b"));
    }
}
