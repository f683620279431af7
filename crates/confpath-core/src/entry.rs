//! Config-with-Parents entries

use serde::Serialize;

use crate::target::escape_segment;

/// One non-blank configuration line together with its ancestor path.
///
/// Entries are produced by the parser and by the edit operations of
/// [`EditSession`](crate::EditSession); callers only read them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CwpEntry {
    path: Vec<String>,
    value: String,
    depth: usize,
    comment: bool,
}

impl CwpEntry {
    pub(crate) fn new(path: Vec<String>, value: impl Into<String>, depth: usize, comment: bool) -> Self {
        Self {
            path,
            value: value.into(),
            depth,
            comment,
        }
    }

    /// Stripped values of every ancestor, root first.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// The raw line, indentation included.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The line without its indentation.
    pub fn stripped(&self) -> &str {
        self.value.trim()
    }

    /// Indentation depth in hierarchy levels.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_comment(&self) -> bool {
        self.comment
    }

    /// The path joined with `separator`, empty for root lines.
    pub fn joined_path(&self, separator: &str) -> String {
        self.path.join(separator)
    }

    /// Leading whitespace of the raw line.
    pub fn indent(&self) -> &str {
        &self.value[..self.value.len() - self.value.trim_start().len()]
    }

    /// The entry as one line of CwP-text, separators inside segments escaped.
    ///
    /// ```
    /// use confpath_core::{EditSession, EditSettings};
    ///
    /// let session = EditSession::parse("configure\n    card 1", EditSettings::default()).unwrap();
    /// assert_eq!(session.entries()[1].to_cwp_line(","), "configure,card 1");
    /// ```
    pub fn to_cwp_line(&self, separator: &str) -> String {
        self.path
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.stripped()))
            .map(|segment| escape_segment(segment, separator))
            .collect::<Vec<_>>()
            .join(separator)
    }

    pub(crate) fn path_mut(&mut self) -> &mut Vec<String> {
        &mut self.path
    }

    pub(crate) fn set_value(&mut self, value: String) {
        self.value = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let entry = CwpEntry::new(
            vec!["configure".to_string(), "card 1".to_string()],
            "        mda 1",
            2,
            false,
        );
        assert_eq!(entry.stripped(), "mda 1");
        assert_eq!(entry.indent(), "        ");
        assert_eq!(entry.joined_path(","), "configure,card 1");
        assert_eq!(entry.to_cwp_line(","), "configure,card 1,mda 1");
    }

    #[test]
    fn test_cwp_line_escapes_separator() {
        let entry = CwpEntry::new(
            vec!["configure".to_string()],
            "    description \"uplink, primary\"",
            1,
            false,
        );
        assert_eq!(
            entry.to_cwp_line(","),
            "configure,description \"uplink\\, primary\""
        );
    }
}
