//! Rendering a [`Document`] back to configuration text.

use std::fmt::{self, Display, Formatter};

use crate::document::{Document, Node, Title, TitleChild};

/// The indentation written before every stanza line except comments,
/// whatever the original indentation was.
pub const TITLE_INDENT: &str = "\t";

impl Display for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for node in self.nodes() {
            match node {
                Node::Comment(text) | Node::Property(text) => writeln!(f, "{text}")?,
                Node::Title(title) => write!(f, "{title}")?,
            }
        }
        Ok(())
    }
}

impl Display for Title {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "title {}", self.header())?;
        for child in self.children() {
            match child {
                TitleChild::Comment(text) => writeln!(f, "{text}")?,
                TitleChild::Property(text) => writeln!(f, "{TITLE_INDENT}{text}")?,
                TitleChild::KernelFlags(flags) => writeln!(f, "{TITLE_INDENT}kernel {flags}")?,
            }
        }
        Ok(())
    }
}

/// Render the document as configuration text; every line, including the
/// last, is newline-terminated.
pub fn render(doc: &Document) -> String {
    doc.to_string()
}
