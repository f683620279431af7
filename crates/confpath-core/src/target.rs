//! CwP-text: the separator-joined form of targets and inserted blocks
//!
//! Each non-blank line names one entry: its path segments followed by its
//! stripped value, e.g. `configure,card 1,mda 1,no shutdown`. A separator
//! preceded by a backslash belongs to the segment instead of splitting it.

use crate::error::{Error, Result};
use crate::settings::EditSettings;

/// One parsed line of CwP-text, segments still escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetLine {
    /// Path segments, root first
    pub path: Vec<String>,
    /// The line's own value
    pub value: String,
}

impl TargetLine {
    /// Depth this line claims in the hierarchy.
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Render as a raw configuration line for splicing.
    ///
    /// A value that keeps leading whitespace is used verbatim; otherwise the
    /// value is indented by one step per path segment. Comments are never
    /// indented.
    pub fn to_raw_line(&self, settings: &EditSettings) -> String {
        let value = unescape_segment(&self.value, &settings.separator);
        if value.starts_with(char::is_whitespace) {
            return value;
        }
        if settings.is_comment(&value) {
            return value;
        }
        format!("{}{}", " ".repeat(settings.step_space * self.depth()), value)
    }

    /// Path segments with escapes removed.
    pub fn literal_path(&self, separator: &str) -> Vec<String> {
        self.path
            .iter()
            .map(|segment| unescape_segment(segment, separator))
            .collect()
    }
}

/// Parse a CwP-text block into its lines.
///
/// Lines are trimmed and blank lines skipped. Fails with `EmptyPattern`
/// when nothing remains and with `InvalidPattern` for a line whose value
/// is empty.
pub fn parse_cwp_text(text: &str, separator: &str) -> Result<Vec<TargetLine>> {
    let lines = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let mut segments = split_escaped(line, separator);
            let value = segments.pop().unwrap_or_default();
            if value.trim().is_empty() {
                return Err(Error::invalid_pattern(line, "line has no value after the last separator"));
            }
            Ok(TargetLine {
                path: segments,
                value,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    if lines.is_empty() {
        return Err(Error::EmptyPattern);
    }
    Ok(lines)
}

/// Split `line` on every `separator` not preceded by a backslash.
pub fn split_escaped(line: &str, separator: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut rest = line;

    while let Some(pos) = rest.find(separator) {
        let (head, tail) = rest.split_at(pos);
        if head.ends_with('\\') {
            current.push_str(head);
            current.push_str(separator);
        } else {
            current.push_str(head);
            segments.push(std::mem::take(&mut current));
        }
        rest = &tail[separator.len()..];
    }
    current.push_str(rest);
    segments.push(current);
    segments
}

/// Escape every separator inside a segment.
pub fn escape_segment(segment: &str, separator: &str) -> String {
    segment.replace(separator, &format!("\\{separator}"))
}

/// Undo [`escape_segment`].
pub fn unescape_segment(segment: &str, separator: &str) -> String {
    segment.replace(&format!("\\{separator}"), separator)
}
