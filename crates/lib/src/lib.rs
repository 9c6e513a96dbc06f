//! # Legacy GRUB configuration editor
//!
//! This crate edits legacy GRUB (`/etc/grub.conf`, `menu.lst`) files
//! in a structure-preserving way.  A file is parsed into a [`Document`],
//! kernel flags are added, updated, or removed on every `kernel` line
//! of every `title` stanza, and the document is rendered back to text.
//!
//! Only the flat `title`/`kernel` stanza format is understood; this is
//! not a GRUB2 `grub.cfg` editor.

pub mod cli;
mod config;
mod document;
mod error;
mod module_args;
mod mutate;
mod parser;
mod render;
mod status;
mod store;

pub use config::{EditOptions, CONFIG_VAR, DEFAULT_PATH};
pub use document::{Document, Node, Title, TitleChild};
pub use error::{Access, Error};
pub use grubconf_kernel_cmdline::{DesiredState, Flag, FlagList};
pub use module_args::ModuleArgs;
pub use mutate::update_flag;
pub use parser::{parse, parse_str};
pub use render::{render, TITLE_INDENT};
pub use status::Status;
pub use store::{load, save, update_file};
