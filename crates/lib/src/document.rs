//! The in-memory form of a legacy GRUB configuration.

use grubconf_kernel_cmdline::FlagList;

/// A parsed configuration file: root-level nodes in file order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    nodes: Vec<Node>,
}

/// A root-level node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// A comment line, stored verbatim.
    Comment(String),
    /// Any other root-level line (e.g. `default=0`), stored verbatim.
    Property(String),
    /// A boot entry stanza.
    Title(Title),
}

/// A line inside a stanza.
///
/// There is no variant for a nested stanza; stanzas are exactly one level
/// deep.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TitleChild {
    /// A comment line, stored verbatim including its indentation.
    Comment(String),
    /// Any other line (e.g. `root (hd0,0)`), stored without its indentation.
    Property(String),
    /// A `kernel` line.
    KernelFlags(FlagList),
}

/// A `title` stanza.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Title {
    header: String,
    children: Vec<TitleChild>,
}

impl Document {
    /// Construct a document from root-level nodes.
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// The root-level nodes in file order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All stanzas in file order.
    pub fn titles(&self) -> impl Iterator<Item = &Title> {
        self.nodes.iter().filter_map(|n| match n {
            Node::Title(t) => Some(t),
            _ => None,
        })
    }

    /// All stanzas in file order, mutably.
    pub fn titles_mut(&mut self) -> impl Iterator<Item = &mut Title> {
        self.nodes.iter_mut().filter_map(|n| match n {
            Node::Title(t) => Some(t),
            _ => None,
        })
    }

    /// Every kernel line of every stanza.
    pub fn kernel_lines(&self) -> impl Iterator<Item = &FlagList> {
        self.titles().flat_map(|t| t.kernel_lines())
    }

    pub(crate) fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }
}

impl Title {
    /// Construct an empty stanza.
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            children: Vec::new(),
        }
    }

    /// The text following the `title` keyword.
    pub fn header(&self) -> &str {
        &self.header
    }

    /// The lines of the stanza in file order.
    pub fn children(&self) -> &[TitleChild] {
        &self.children
    }

    /// Append a line to the stanza.
    pub fn push(&mut self, child: TitleChild) {
        self.children.push(child);
    }

    /// The kernel lines of this stanza.
    pub fn kernel_lines(&self) -> impl Iterator<Item = &FlagList> {
        self.children.iter().filter_map(|c| match c {
            TitleChild::KernelFlags(f) => Some(f),
            _ => None,
        })
    }

    /// The kernel lines of this stanza, mutably.
    pub fn kernel_lines_mut(&mut self) -> impl Iterator<Item = &mut FlagList> {
        self.children.iter_mut().filter_map(|c| match c {
            TitleChild::KernelFlags(f) => Some(f),
            _ => None,
        })
    }
}
