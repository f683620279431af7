//! Edit scripts: a TOML list of edit operations
//!
//! ```toml
//! [[edit]]
//! op = "delete-serial"
//! target = "configure,card 1,mda 1,shutdown"
//!
//! [[edit]]
//! op = "replace"
//! old = 'configure,card \d,mda 1'
//! new = "configure,card 1,mda 2"
//! regex = true
//! multiple = true
//! ```
//!
//! A script is applied with
//! [`EditSession::apply_script`](crate::EditSession::apply_script); if any
//! operation fails, none of them take effect.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::matcher::MatchOptions;

/// One edit operation with its match options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum EditOperation {
    AddBefore {
        lines: String,
        anchor: String,
        #[serde(default)]
        regex: bool,
        #[serde(default)]
        multiple: bool,
    },
    AddAfter {
        lines: String,
        anchor: String,
        #[serde(default)]
        regex: bool,
        #[serde(default)]
        multiple: bool,
    },
    DeleteSerial {
        target: String,
        #[serde(default)]
        regex: bool,
        #[serde(default)]
        multiple: bool,
    },
    DeleteBetween {
        start: String,
        end: String,
        #[serde(default)]
        regex: bool,
        #[serde(default)]
        multiple: bool,
    },
    Replace {
        old: String,
        new: String,
        #[serde(default)]
        regex: bool,
        #[serde(default)]
        multiple: bool,
    },
}

impl EditOperation {
    pub fn options(&self) -> MatchOptions {
        let (regex_match, multiple_match) = match self {
            Self::AddBefore { regex, multiple, .. }
            | Self::AddAfter { regex, multiple, .. }
            | Self::DeleteSerial { regex, multiple, .. }
            | Self::DeleteBetween { regex, multiple, .. }
            | Self::Replace { regex, multiple, .. } => (*regex, *multiple),
        };
        MatchOptions {
            regex_match,
            multiple_match,
        }
    }
}

/// An ordered list of edit operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditScript {
    #[serde(default, rename = "edit")]
    pub edits: Vec<EditOperation>,
}

impl EditScript {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_parse_script() {
        let script = EditScript::from_toml_str(
            r#"
[[edit]]
op = "delete-serial"
target = "configure,card 1,mda 1,shutdown"

[[edit]]
op = "add-after"
lines = "configure,card 1,mda 1,no shutdown"
anchor = 'configure,card \d,mda 1'
regex = true
multiple = true
"#,
        )
        .unwrap();

        assert_eq!(script.len(), 2);
        assert_eq!(
            script.edits[0],
            EditOperation::DeleteSerial {
                target: "configure,card 1,mda 1,shutdown".into(),
                regex: false,
                multiple: false,
            }
        );
        assert_eq!(script.edits[1].options(), MatchOptions::regex().all());
    }

    #[test]
    fn test_empty_script() {
        let script = EditScript::from_toml_str("").unwrap();
        assert!(script.is_empty());
    }

    #[test]
    fn test_unknown_op_is_rejected() {
        let err = EditScript::from_toml_str("[[edit]]\nop = \"rename\"\nold = \"a\"").unwrap_err();
        assert!(matches!(err, Error::InvalidScript(_)));
    }
}
