//! Reports of applied edits.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// The kind of edit operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EditKind {
    /// Lines spliced before each match.
    AddBefore,
    /// Lines spliced after each match.
    AddAfter,
    /// Every line of each serial match removed.
    DeleteSerial,
    /// Start line through end line removed.
    DeleteBetween,
    /// A single line's value replaced.
    Replace,
}

/// What a mutating operation did to the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edit {
    /// The kind of edit.
    pub kind: EditKind,
    /// Matched entry ranges, as indices into the sequence before the edit.
    pub spans: Vec<Range<usize>>,
    /// Raw lines taken out, in document order.
    pub removed: Vec<String>,
    /// Raw lines put in, in document order.
    pub inserted: Vec<String>,
}

impl Edit {
    pub(crate) fn new(kind: EditKind, spans: Vec<Range<usize>>) -> Self {
        Self {
            kind,
            spans,
            removed: Vec::new(),
            inserted: Vec::new(),
        }
    }

    /// Number of matches the edit acted on.
    pub fn match_count(&self) -> usize {
        self.spans.len()
    }

    /// Net change in sequence length.
    pub fn line_delta(&self) -> isize {
        self.inserted.len() as isize - self.removed.len() as isize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_delta() {
        let mut edit = Edit::new(EditKind::DeleteSerial, vec![2..4]);
        edit.removed = vec!["a".into(), "b".into()];
        assert_eq!(edit.match_count(), 1);
        assert_eq!(edit.line_delta(), -2);
    }

    #[test]
    fn test_kind_serializes_kebab_case() {
        let edit = Edit::new(EditKind::AddAfter, vec![0..1]);
        let json = serde_json::to_value(&edit).unwrap();
        assert_eq!(json["kind"], "add-after");
        assert_eq!(json["spans"][0]["start"], 0);
    }
}
