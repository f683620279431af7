//! Edit sessions: one live CwP sequence and the operations on it
//!
//! Every mutating operation collects its matches on the current sequence,
//! builds the edited sequence separately, and only swaps it in on success.
//! A failed operation leaves the session exactly as it was.

use std::ops::Range;

use crate::edit::{Edit, EditKind};
use crate::entry::CwpEntry;
use crate::error::{Error, Result};
use crate::matcher::{MatchOptions, SearchPattern, SerialPattern, choose};
use crate::parser;
use crate::script::{EditOperation, EditScript};
use crate::serializer;
use crate::settings::EditSettings;
use crate::target::{TargetLine, parse_cwp_text, unescape_segment};

/// A parsed configuration and the edit operations over it.
///
/// # Examples
///
/// ```
/// use confpath_core::{EditSession, EditSettings, MatchOptions};
///
/// let text = "configure\n    card 1\n        mda 1\n            no shutdown";
/// let mut session = EditSession::parse(text, EditSettings::default()).unwrap();
///
/// session
///     .delete_serial_lines("configure,card 1,mda 1,no shutdown", MatchOptions::literal())
///     .unwrap();
/// assert_eq!(session.serialize(), "configure\n    card 1\n        mda 1");
/// ```
#[derive(Debug, Clone)]
pub struct EditSession {
    settings: EditSettings,
    entries: Vec<CwpEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Before,
    After,
}

impl EditSession {
    /// Parse `text` into a new session.
    pub fn parse(text: &str, settings: EditSettings) -> Result<Self> {
        let entries = parser::parse(text, &settings)?;
        Ok(Self { settings, entries })
    }

    pub fn settings(&self) -> &EditSettings {
        &self.settings
    }

    /// The current CwP sequence, in document order.
    pub fn entries(&self) -> &[CwpEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CwpEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the current sequence as configuration text.
    pub fn serialize(&self) -> String {
        serializer::serialize(&self.entries)
    }

    /// Render the current sequence as CwP-text.
    pub fn to_cwp_text(&self) -> String {
        serializer::to_cwp_text(&self.entries, &self.settings.separator)
    }

    /// Entries whose joined path and stripped value match the patterns.
    ///
    /// An empty pattern matches everything. Never mutates the session.
    pub fn cwp_search(
        &self,
        path: &str,
        value: &str,
        options: MatchOptions,
    ) -> Result<Vec<&CwpEntry>> {
        let pattern =
            SearchPattern::compile(path, value, &self.settings.separator, options.regex_match)?;
        Ok(self.entries.iter().filter(|e| pattern.matches(e)).collect())
    }

    /// Whether `block` has at least one serial match.
    pub fn cwp_serial_check(&self, block: &str, options: MatchOptions) -> Result<bool> {
        let pattern = self.compile(block, options)?;
        Ok(pattern.find_first(&self.entries).is_some())
    }

    /// Splice `new_block` before the first line of each match of `anchor`.
    pub fn add_before_lines(
        &mut self,
        new_block: &str,
        anchor: &str,
        options: MatchOptions,
    ) -> Result<Edit> {
        self.insert(Placement::Before, new_block, anchor, options)
    }

    /// Splice `new_block` after the last line of each match of `anchor`.
    pub fn add_after_lines(
        &mut self,
        new_block: &str,
        anchor: &str,
        options: MatchOptions,
    ) -> Result<Edit> {
        self.insert(Placement::After, new_block, anchor, options)
    }

    /// Remove every line of each serial match of `target`.
    ///
    /// Children of a removed parent are re-attached by their indentation;
    /// under the strict hierarchy policy that fails if they are left
    /// orphaned.
    pub fn delete_serial_lines(&mut self, target: &str, options: MatchOptions) -> Result<Edit> {
        let pattern = self.compile(target, options)?;
        let spans = pattern.select(&self.entries, options, &self.settings)?;
        self.remove(EditKind::DeleteSerial, spans)
    }

    /// Remove everything from a line matching `start` through the next line
    /// matching `end`, both included.
    pub fn delete_between_lines(
        &mut self,
        start: &str,
        end: &str,
        options: MatchOptions,
    ) -> Result<Edit> {
        let start_pattern = self.compile_single(start, options)?;
        let end_pattern = self.compile_single(end, options)?;

        let mut spans = Vec::new();
        let mut index = 0;
        while index < self.entries.len() {
            if !start_pattern.matches_at(&self.entries, index) {
                index += 1;
                continue;
            }
            let Some(last) =
                (index..self.entries.len()).find(|&i| end_pattern.matches_at(&self.entries, i))
            else {
                break;
            };
            spans.push(index..last + 1);
            index = last + 1;
        }

        let source = format!("{} .. {}", start.trim(), end.trim());
        let spans = choose(spans, &source, options, &self.settings)?;
        self.remove(EditKind::DeleteBetween, spans)
    }

    /// Replace the value of each line matching `old` with the value of `new`.
    ///
    /// The replaced line keeps its indentation. Descendants that carried the
    /// old value in their path are re-pathed to the new one.
    pub fn replace_line(&mut self, old: &str, new: &str, options: MatchOptions) -> Result<Edit> {
        let pattern = self.compile_single(old, options)?;
        let replacement = self.single_line(new)?;
        let new_value = unescape_segment(replacement.value.trim(), &self.settings.separator);
        let new_is_comment = self.settings.is_comment(&new_value);

        let spans = pattern.select(&self.entries, options, &self.settings)?;
        let mut entries = self.entries.clone();
        let mut edit = Edit::new(EditKind::Replace, spans.clone());
        let mut rederive = false;

        for span in &spans {
            let index = span.start;
            let old_value = entries[index].stripped().to_string();
            let was_comment = entries[index].is_comment();
            let raw = format!("{}{}", entries[index].indent(), new_value);

            edit.removed.push(entries[index].value().to_string());
            edit.inserted.push(raw.clone());
            entries[index].set_value(raw);

            if was_comment != new_is_comment {
                rederive = true;
            } else if !was_comment {
                repath_descendants(&mut entries, index, &old_value, &new_value);
            }
        }

        if rederive {
            entries = parser::rebuild(entries.iter().map(CwpEntry::value), &self.settings)?;
        }

        tracing::debug!(matches = spans.len(), "replaced lines");
        self.entries = entries;
        Ok(edit)
    }

    /// Apply a single scripted operation.
    pub fn apply(&mut self, operation: &EditOperation) -> Result<Edit> {
        let options = operation.options();
        match operation {
            EditOperation::AddBefore { lines, anchor, .. } => {
                self.add_before_lines(lines, anchor, options)
            }
            EditOperation::AddAfter { lines, anchor, .. } => {
                self.add_after_lines(lines, anchor, options)
            }
            EditOperation::DeleteSerial { target, .. } => self.delete_serial_lines(target, options),
            EditOperation::DeleteBetween { start, end, .. } => {
                self.delete_between_lines(start, end, options)
            }
            EditOperation::Replace { old, new, .. } => self.replace_line(old, new, options),
        }
    }

    /// Apply every operation of `script` in order, all or nothing.
    pub fn apply_script(&mut self, script: &EditScript) -> Result<Vec<Edit>> {
        let snapshot = self.entries.clone();
        let mut edits = Vec::with_capacity(script.len());

        for (index, operation) in script.edits.iter().enumerate() {
            match self.apply(operation) {
                Ok(edit) => edits.push(edit),
                Err(source) => {
                    tracing::warn!(step = index + 1, error = %source, "edit script rolled back");
                    self.entries = snapshot;
                    return Err(Error::ScriptStep {
                        step: index + 1,
                        source: Box::new(source),
                    });
                }
            }
        }

        Ok(edits)
    }

    fn compile(&self, text: &str, options: MatchOptions) -> Result<SerialPattern> {
        SerialPattern::compile(text, &self.settings.separator, options.regex_match)
    }

    fn compile_single(&self, text: &str, options: MatchOptions) -> Result<SerialPattern> {
        let pattern = self.compile(text, options)?;
        if pattern.len() != 1 {
            return Err(Error::invalid_pattern(text.trim(), "expected a single line"));
        }
        Ok(pattern)
    }

    fn single_line(&self, text: &str) -> Result<TargetLine> {
        let mut lines = parse_cwp_text(text, &self.settings.separator)?;
        if lines.len() != 1 {
            return Err(Error::invalid_pattern(text.trim(), "expected a single line"));
        }
        Ok(lines.remove(0))
    }

    fn insert(
        &mut self,
        placement: Placement,
        new_block: &str,
        anchor: &str,
        options: MatchOptions,
    ) -> Result<Edit> {
        let block = parse_cwp_text(new_block, &self.settings.separator)?;
        let new_lines: Vec<String> = block
            .iter()
            .map(|line| line.to_raw_line(&self.settings))
            .collect();

        let pattern = self.compile(anchor, options)?;
        let spans = pattern.select(&self.entries, options, &self.settings)?;
        let points: Vec<usize> = spans
            .iter()
            .map(|span| match placement {
                Placement::Before => span.start,
                Placement::After => span.end,
            })
            .collect();

        let mut values: Vec<&str> =
            Vec::with_capacity(self.entries.len() + points.len() * new_lines.len());
        let mut inserted_at = Vec::with_capacity(points.len());
        let mut pending = points.iter().peekable();
        for (index, entry) in self.entries.iter().enumerate() {
            if pending.next_if(|&&point| point == index).is_some() {
                inserted_at.push(values.len());
                values.extend(new_lines.iter().map(String::as_str));
            }
            values.push(entry.value());
        }
        if pending.next().is_some() {
            inserted_at.push(values.len());
            values.extend(new_lines.iter().map(String::as_str));
        }

        let entries = parser::rebuild(values, &self.settings)?;
        for &start in &inserted_at {
            self.warn_declared_paths(&block, &entries[start..start + block.len()]);
        }

        let mut edit = Edit::new(
            match placement {
                Placement::Before => EditKind::AddBefore,
                Placement::After => EditKind::AddAfter,
            },
            spans,
        );
        for _ in &inserted_at {
            edit.inserted.extend(new_lines.iter().cloned());
        }

        tracing::debug!(matches = edit.match_count(), lines = new_lines.len(), "inserted block");
        self.entries = entries;
        Ok(edit)
    }

    fn remove(&mut self, kind: EditKind, spans: Vec<Range<usize>>) -> Result<Edit> {
        let mut edit = Edit::new(kind, spans);
        let mut kept = Vec::with_capacity(self.entries.len());
        for (index, entry) in self.entries.iter().enumerate() {
            if edit.spans.iter().any(|span| span.contains(&index)) {
                edit.removed.push(entry.value().to_string());
            } else {
                kept.push(entry.value());
            }
        }

        let entries = parser::rebuild(kept, &self.settings)?;
        tracing::debug!(matches = edit.match_count(), lines = edit.removed.len(), "removed lines");
        self.entries = entries;
        Ok(edit)
    }

    fn warn_declared_paths(&self, block: &[TargetLine], spliced: &[CwpEntry]) {
        for (line, entry) in block.iter().zip(spliced) {
            if entry.is_comment() {
                continue;
            }
            let declared = line.literal_path(&self.settings.separator);
            if declared != entry.path() {
                tracing::warn!(
                    line = %entry.stripped(),
                    declared = %declared.join(self.settings.separator.as_str()),
                    actual = %entry.joined_path(&self.settings.separator),
                    "inserted line landed under a different path than declared"
                );
            }
        }
    }
}

impl<'a> IntoIterator for &'a EditSession {
    type Item = &'a CwpEntry;
    type IntoIter = std::slice::Iter<'a, CwpEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Rewrite `old` to `new` at the replaced line's path position in every
/// entry of its subtree.
fn repath_descendants(entries: &mut [CwpEntry], index: usize, old: &str, new: &str) {
    let position = entries[index].path().len();
    for entry in &mut entries[index + 1..] {
        if !entry.is_comment() && entry.path().len() <= position {
            break;
        }
        if let Some(segment) = entry.path_mut().get_mut(position) {
            if segment == old {
                *segment = new.to_string();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::HierarchyPolicy;
    use pretty_assertions::assert_eq;

    const NOKIA: &str = "\
configure
    card 1
        mda 1
            no shutdown";

    fn session(text: &str) -> EditSession {
        EditSession::parse(text, EditSettings::default()).unwrap()
    }

    #[test]
    fn test_parse_validates_settings() {
        let err = EditSession::parse(NOKIA, EditSettings::new(0, ["#"])).unwrap_err();
        assert!(matches!(err, Error::InvalidSettings { .. }));
    }

    #[test]
    fn test_delete_then_rename_scenario() {
        let mut s = session(NOKIA);
        s.delete_serial_lines("configure,card 1,mda 1,no shutdown", MatchOptions::literal())
            .unwrap();
        assert_eq!(s.serialize(), "configure\n    card 1\n        mda 1");

        s.replace_line(
            "configure,card 1,mda 1",
            "configure,card 1,mda 1-renamed",
            MatchOptions::literal(),
        )
        .unwrap();
        assert_eq!(s.entries()[2].value(), "        mda 1-renamed");
    }

    #[test]
    fn test_repath_descendants_stops_at_subtree_end() {
        let mut s = session("a\n    b\n        c\n    d\n        e");
        s.replace_line("a,b", "a,x", MatchOptions::literal()).unwrap();
        assert_eq!(s.entries()[2].path(), ["a", "x"]);
        assert_eq!(s.entries()[4].path(), ["a", "d"]);
    }

    #[test]
    fn test_failed_insert_leaves_session_untouched() {
        let mut s = session(NOKIA);
        let before = s.entries().to_vec();
        let err = s
            .add_after_lines("configure,  card 2", "configure,card 1", MatchOptions::literal())
            .unwrap_err();
        assert!(matches!(err, Error::MalformedIndent { .. }));
        assert_eq!(s.entries(), before.as_slice());
    }

    #[test]
    fn test_delete_parent_only_orphans_children() {
        let mut strict = session(NOKIA);
        let err = strict
            .delete_serial_lines("configure,card 1", MatchOptions::literal())
            .unwrap_err();
        assert!(matches!(err, Error::MalformedHierarchy { .. }));
        assert_eq!(strict.len(), 4);

        let settings = EditSettings::default().with_hierarchy(HierarchyPolicy::Lenient);
        let mut lenient = EditSession::parse(NOKIA, settings).unwrap();
        lenient
            .delete_serial_lines("configure,card 1", MatchOptions::literal())
            .unwrap();
        assert_eq!(lenient.entries()[1].path(), ["configure"]);
        assert_eq!(lenient.entries()[2].path(), ["configure", "mda 1"]);
    }

    #[test]
    fn test_into_iterator() {
        let s = session(NOKIA);
        let values: Vec<&str> = (&s).into_iter().map(CwpEntry::stripped).collect();
        assert_eq!(values, vec!["configure", "card 1", "mda 1", "no shutdown"]);
    }
}
