use std::fmt::Display;
use std::path::Path;

/// Display a path quoted in the way a POSIX shell would accept it,
/// so paths with whitespace stay unambiguous in messages.
#[derive(Debug)]
pub struct PathQuotedDisplay<'a> {
    path: &'a Path,
}

impl<'a> PathQuotedDisplay<'a> {
    /// Wrap a path for quoted display.
    pub fn new<P: AsRef<Path> + ?Sized>(path: &'a P) -> Self {
        Self {
            path: path.as_ref(),
        }
    }
}

impl Display for PathQuotedDisplay<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lossy = self.path.to_string_lossy();
        match shlex::try_quote(&lossy) {
            Ok(quoted) => f.write_str(&quoted),
            // Only happens for embedded NUL
            Err(_) => write!(f, "{lossy:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn test_path_quoted_display() {
        for path in ["/etc/grub.conf", "/boot/grub/menu.lst"] {
            assert_eq!(PathQuotedDisplay::new(path).to_string(), path);
        }
        let quoted = PathQuotedDisplay::new("/tmp/with space").to_string();
        assert_ne!(quoted, "/tmp/with space");
        assert!(quoted.contains("/tmp/with space"));
    }
}
