//! Reading and writing configuration files.

use std::fs::File;
use std::io::{BufRead, BufReader};

use camino::Utf8Path;

use crate::mutate::{apply_flag, parse_request};
use crate::{parser, render, Document, EditOptions, Error};

/// Read and parse the configuration file at `path`.
pub fn load(path: &Utf8Path) -> Result<Document, Error> {
    let f = File::open(path).map_err(|e| Error::read(path, e))?;
    let lines = BufReader::new(f)
        .lines()
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| Error::read(path, e))?;
    parser::parse(lines)
}

/// Replace the contents of `path` with `text`.
///
/// The file is truncated and rewritten in place.  This is not atomic: if
/// writing fails partway the file may be left truncated.
pub fn save(path: &Utf8Path, text: &str) -> Result<(), Error> {
    std::fs::write(path, text).map_err(|e| Error::write(path, e))?;
    tracing::info!("Wrote {path}");
    Ok(())
}

/// Load the file named by `opts`, apply `spec` in the requested state, and
/// write the result back if anything changed.
///
/// Returns whether anything changed.
pub fn update_file(opts: &EditOptions, spec: &str) -> Result<bool, Error> {
    // Validate the request before touching the file
    let flag = parse_request(spec)?;
    let mut doc = load(&opts.path)?;
    let changed = apply_flag(&mut doc, &flag, opts.state);
    if changed {
        save(&opts.path, &render(&doc))?;
    } else {
        tracing::debug!("No changes to {}", opts.path);
    }
    Ok(changed)
}
