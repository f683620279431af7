//! Line and serial-block matching over a CwP sequence
//!
//! A serial pattern is a fixed-length window slid over the sequence. The
//! window matches when every target line matches the entry at the same
//! offset. A target line names its full path, so the segment count pins
//! each entry's depth and two same-text lines at unrelated depths are never
//! taken for a parent and its child.

use std::ops::Range;

use regex::Regex;

use crate::entry::CwpEntry;
use crate::error::{Error, Result};
use crate::settings::{AmbiguityPolicy, EditSettings};
use crate::target::{TargetLine, parse_cwp_text, unescape_segment};

/// How a pattern is compared and how many matches an operation acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchOptions {
    /// Compile patterns as regular expressions instead of literal text
    pub regex_match: bool,
    /// Act on every non-overlapping match instead of the first one
    pub multiple_match: bool,
}

impl MatchOptions {
    pub fn literal() -> Self {
        Self::default()
    }

    pub fn regex() -> Self {
        Self {
            regex_match: true,
            multiple_match: false,
        }
    }

    /// Act on every match.
    pub fn all(mut self) -> Self {
        self.multiple_match = true;
        self
    }
}

/// A literal string or a fully anchored regex.
#[derive(Debug, Clone)]
pub enum TextMatcher {
    Literal(String),
    Regex(Regex),
}

impl TextMatcher {
    /// Compile `pattern`. Regexes must match the whole text.
    pub fn compile(pattern: &str, regex_match: bool) -> Result<Self> {
        if !regex_match {
            return Ok(Self::Literal(pattern.to_string()));
        }
        Regex::new(&format!("^(?:{pattern})$"))
            .map(Self::Regex)
            .map_err(|source| Error::InvalidRegex {
                pattern: pattern.to_string(),
                source,
            })
    }

    pub fn is_match(&self, text: &str) -> bool {
        match self {
            Self::Literal(literal) => literal == text,
            Self::Regex(regex) => regex.is_match(text),
        }
    }
}

/// Matcher for one target line: one matcher per path segment plus the value.
#[derive(Debug, Clone)]
pub struct LineMatcher {
    path: Vec<TextMatcher>,
    value: TextMatcher,
}

impl LineMatcher {
    fn compile(line: &TargetLine, separator: &str, regex_match: bool) -> Result<Self> {
        // Regex mode keeps `\<sep>`, which the regex engine reads as the literal separator.
        let prepare = |segment: &str| -> Result<TextMatcher> {
            if regex_match {
                TextMatcher::compile(segment, true)
            } else {
                TextMatcher::compile(&unescape_segment(segment, separator), false)
            }
        };
        let path = line
            .path
            .iter()
            .map(|segment| prepare(segment.as_str()))
            .collect::<Result<Vec<_>>>()?;
        let value = prepare(line.value.trim())?;
        Ok(Self { path, value })
    }

    /// Segment count must equal the entry's path depth.
    pub fn matches(&self, entry: &CwpEntry) -> bool {
        entry.path().len() == self.path.len()
            && self
                .path
                .iter()
                .zip(entry.path())
                .all(|(matcher, segment)| matcher.is_match(segment))
            && self.value.is_match(entry.stripped())
    }
}

/// A compiled multi-line CwP-text target.
#[derive(Debug, Clone)]
pub struct SerialPattern {
    source: String,
    lines: Vec<LineMatcher>,
}

impl SerialPattern {
    pub fn compile(text: &str, separator: &str, regex_match: bool) -> Result<Self> {
        let targets = parse_cwp_text(text, separator)?;
        let lines = targets
            .iter()
            .map(|target| LineMatcher::compile(target, separator, regex_match))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            source: text.trim().to_string(),
            lines,
        })
    }

    /// The pattern text as given, for error messages.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Whether the window starting at `start` is a serial match.
    pub fn matches_at(&self, entries: &[CwpEntry], start: usize) -> bool {
        let Some(window) = entries.get(start..start + self.len()) else {
            return false;
        };
        // Matching stops at the first failing line.
        self.lines
            .iter()
            .zip(window)
            .all(|(matcher, entry)| matcher.matches(entry))
    }

    /// The first serial match in document order.
    pub fn find_first(&self, entries: &[CwpEntry]) -> Option<Range<usize>> {
        (0..entries.len())
            .find(|&start| self.matches_at(entries, start))
            .map(|start| start..start + self.len())
    }

    /// Every non-overlapping serial match, scanning resumes after each one.
    pub fn find_all(&self, entries: &[CwpEntry]) -> Vec<Range<usize>> {
        let mut matches = Vec::new();
        let mut start = 0;
        while start < entries.len() {
            if self.matches_at(entries, start) {
                matches.push(start..start + self.len());
                start += self.len();
            } else {
                start += 1;
            }
        }
        matches
    }

    /// Pick the matches a mutating operation acts on.
    ///
    /// Fails with `NoMatchFound` when there are none. With first-match
    /// options only the first is returned, unless the settings ask for
    /// `AmbiguousPattern` on several matches.
    pub fn select(
        &self,
        entries: &[CwpEntry],
        options: MatchOptions,
        settings: &EditSettings,
    ) -> Result<Vec<Range<usize>>> {
        let matches = self.find_all(entries);
        tracing::debug!(pattern = %self.source, matches = matches.len(), "serial match scan");
        choose(matches, &self.source, options, settings)
    }
}

/// Apply the first/all and ambiguity rules to a list of matches.
pub(crate) fn choose(
    mut matches: Vec<Range<usize>>,
    source: &str,
    options: MatchOptions,
    settings: &EditSettings,
) -> Result<Vec<Range<usize>>> {
    if matches.is_empty() {
        return Err(Error::no_match(source));
    }
    if !options.multiple_match {
        if settings.ambiguity == AmbiguityPolicy::Error && matches.len() > 1 {
            return Err(Error::AmbiguousPattern {
                pattern: source.to_string(),
                count: matches.len(),
            });
        }
        matches.truncate(1);
    }
    Ok(matches)
}

/// Filter for [`EditSession::cwp_search`](crate::EditSession::cwp_search).
///
/// The path pattern is compared with the joined path, the value pattern
/// with the stripped value. An empty pattern matches anything. A literal
/// path may be given as CwP-text, with `\<sep>` inside a segment.
#[derive(Debug, Clone)]
pub struct SearchPattern {
    path: Option<TextMatcher>,
    value: Option<TextMatcher>,
    separator: String,
}

impl SearchPattern {
    pub fn compile(path: &str, value: &str, separator: &str, regex_match: bool) -> Result<Self> {
        let compile = |pattern: &str| -> Result<Option<TextMatcher>> {
            if pattern.is_empty() {
                Ok(None)
            } else {
                TextMatcher::compile(pattern, regex_match).map(Some)
            }
        };
        let path = if regex_match {
            path.to_string()
        } else {
            unescape_segment(path, separator)
        };
        Ok(Self {
            path: compile(&path)?,
            value: compile(value)?,
            separator: separator.to_string(),
        })
    }

    pub fn matches(&self, entry: &CwpEntry) -> bool {
        self.path
            .as_ref()
            .is_none_or(|m| m.is_match(&entry.joined_path(&self.separator)))
            && self.value.as_ref().is_none_or(|m| m.is_match(entry.stripped()))
    }
}
