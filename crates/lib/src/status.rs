//! The machine-readable result of an edit.

use serde::Serialize;

/// The JSON object printed in module mode and with `--json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Status {
    /// The edit succeeded.
    Ok {
        /// The flag name as requested.
        flag: String,
        /// Whether the file was modified.
        changed: bool,
    },
    /// The edit failed; nothing was written.
    Failed {
        /// Always `true`.
        failed: bool,
        /// The full error chain.
        msg: String,
    },
}

impl Status {
    /// A successful edit.
    pub fn ok(flag: impl Into<String>, changed: bool) -> Self {
        Self::Ok {
            flag: flag.into(),
            changed,
        }
    }

    /// A failed edit, describing the whole error chain.
    pub fn failed(err: &anyhow::Error) -> Self {
        Self::Failed {
            failed: true,
            msg: format!("{err:#}"),
        }
    }

    /// Serialize as a single line of JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json() {
        let s = Status::ok("rhgb", true).to_json().unwrap();
        assert_eq!(s, r#"{"flag":"rhgb","changed":true}"#);

        let err = anyhow::Error::from(crate::Error::MissingParameter).context("Running module");
        let s = Status::failed(&err).to_json().unwrap();
        assert_eq!(
            s,
            r#"{"failed":true,"msg":"Running module: No 'flag' parameter provided"}"#
        );
    }
}
