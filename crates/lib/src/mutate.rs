//! Applying a flag change across every stanza.

use grubconf_kernel_cmdline::{DesiredState, Flag};

use crate::document::Document;
use crate::Error;

/// Parse a requested flag, rejecting an empty key before anything is read.
///
/// Values are written back unquoted, so a requested value may not contain
/// whitespace.
pub(crate) fn parse_request(spec: &str) -> Result<Flag, Error> {
    let flag = Flag::parse(spec).map_err(Error::MalformedFlag)?;
    if flag.key().is_empty() {
        return Err(Error::MissingParameter);
    }
    if flag.value().is_some_and(|v| v.contains(char::is_whitespace)) {
        return Err(Error::InvalidArgument(format!(
            "Value of flag '{}' contains whitespace",
            flag.key()
        )));
    }
    Ok(flag)
}

/// Add, update, or remove `spec` (`KEY` or `KEY=VALUE`) on every kernel
/// line of every stanza.
///
/// All stanzas are updated; there is no per-stanza targeting.  Root-level
/// lines are never touched.  Returns whether anything changed.
pub fn update_flag(doc: &mut Document, spec: &str, state: DesiredState) -> Result<bool, Error> {
    let flag = parse_request(spec)?;
    Ok(apply_flag(doc, &flag, state))
}

pub(crate) fn apply_flag(doc: &mut Document, flag: &Flag, state: DesiredState) -> bool {
    let mut changed = false;
    for (i, title) in doc.titles_mut().enumerate() {
        for flags in title.kernel_lines_mut() {
            let action = flags.apply(flag, state);
            tracing::debug!("stanza {i}: {state} {flag}: {action:?}");
            changed |= action.changed();
        }
    }
    changed
}
