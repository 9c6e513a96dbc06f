//! Line classification for legacy GRUB configuration files.
//!
//! Parsing is a single pass over the lines with two states: at the root
//! of the file, or inside a `title` stanza.  A stanza extends over the
//! following indented lines and ends at the first line with no leading
//! whitespace; note that this includes an empty line.

use grubconf_kernel_cmdline::{FlagList, ParseError, KERNEL_KEYWORD};

use crate::document::{Document, Node, Title, TitleChild};
use crate::Error;

/// The keyword that opens a stanza.
const TITLE_KEYWORD: &str = "title";
const COMMENT_PREFIX: char = '#';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Root,
    InTitle,
}

/// Accumulates classified lines.
///
/// `stack` holds the open stanzas; its top is the current target for
/// stanza lines, and the root nodes are the target when it is empty.
/// Only root-level lines can open a stanza, so it never holds more than
/// one entry.
#[derive(Debug, Default)]
struct Classifier {
    root: Document,
    stack: Vec<Title>,
}

impl Classifier {
    fn state(&self) -> State {
        if self.stack.is_empty() {
            State::Root
        } else {
            State::InTitle
        }
    }

    fn feed(&mut self, line: &str) -> Result<(), ParseError> {
        let stripped = line.trim_start();
        if self.state() == State::InTitle && stripped.len() == line.len() {
            self.close_title();
        }

        let Some(title) = self.stack.last_mut() else {
            self.feed_root(line);
            return Ok(());
        };
        let child = if stripped.starts_with(COMMENT_PREFIX) {
            TitleChild::Comment(line.to_owned())
        } else if let Some(args) = stripped.strip_prefix(KERNEL_KEYWORD) {
            TitleChild::KernelFlags(FlagList::parse(args)?)
        } else {
            TitleChild::Property(stripped.to_owned())
        };
        title.push(child);
        Ok(())
    }

    fn feed_root(&mut self, line: &str) {
        if let Some(header) = line.strip_prefix(TITLE_KEYWORD) {
            let header = header.trim();
            tracing::trace!("Opening stanza '{header}'");
            self.stack.push(Title::new(header));
        } else if line.trim_start().starts_with(COMMENT_PREFIX) {
            self.root.push(Node::Comment(line.to_owned()));
        } else {
            self.root.push(Node::Property(line.to_owned()));
        }
    }

    fn close_title(&mut self) {
        if let Some(title) = self.stack.pop() {
            tracing::trace!(
                "Closing stanza '{}' with {} lines",
                title.header(),
                title.children().len()
            );
            self.root.push(Node::Title(title));
        }
    }

    fn finish(mut self) -> Document {
        self.close_title();
        self.root
    }
}

/// Parse the lines of a configuration file, without line terminators.
///
/// Fails if a `kernel` line contains a malformed flag or unbalanced quotes;
/// no partial document is returned.
pub fn parse<I, S>(lines: I) -> Result<Document, Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut classifier = Classifier::default();
    for (i, line) in lines.into_iter().enumerate() {
        classifier
            .feed(line.as_ref())
            .map_err(|source| Error::MalformedKernelLine { line: i + 1, source })?;
    }
    let doc = classifier.finish();
    tracing::debug!(
        "Parsed {} root nodes, {} stanzas",
        doc.nodes().len(),
        doc.titles().count()
    );
    Ok(doc)
}

/// Parse a whole configuration file held in memory.
pub fn parse_str(input: &str) -> Result<Document, Error> {
    parse(input.lines())
}
