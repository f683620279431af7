//! Hierarchy parser: indented text to a CwP sequence
//!
//! Ancestors are tracked on a depth-tagged stack. A non-comment line pops
//! every stack entry at its own depth or deeper, takes the remaining stack
//! as its path, and is then pushed. Comment lines read the stack without
//! changing it, so they never become anyone's parent.
//!
//! ```
//! use confpath_core::{parser, EditSettings};
//!
//! let text = "configure\n    card 1\n        mda 1\n            no shutdown";
//! let entries = parser::parse(text, &EditSettings::default()).unwrap();
//! assert_eq!(entries[3].path(), ["configure", "card 1", "mda 1"]);
//! assert_eq!(entries[3].value(), "            no shutdown");
//! ```

use crate::entry::CwpEntry;
use crate::error::{Error, Result};
use crate::line::ConfigLine;
use crate::settings::{EditSettings, HierarchyPolicy};

/// Parse configuration text into its CwP sequence.
///
/// Blank lines are dropped. Errors carry the 1-based line number in `text`.
pub fn parse(text: &str, settings: &EditSettings) -> Result<Vec<CwpEntry>> {
    settings.validate()?;
    let entries = build(text.lines().enumerate().map(|(i, l)| (i + 1, l)), settings)?;
    tracing::debug!(entries = entries.len(), "parsed configuration");
    Ok(entries)
}

/// Re-derive every path from a sequence of raw lines.
///
/// Used after a splice, when the raw lines are the source of truth. Error
/// line numbers are positions in `values`.
pub fn rebuild<'a, I>(values: I, settings: &EditSettings) -> Result<Vec<CwpEntry>>
where
    I: IntoIterator<Item = &'a str>,
{
    settings.validate()?;
    build(values.into_iter().enumerate().map(|(i, l)| (i + 1, l)), settings)
}

fn build<'a, I>(lines: I, settings: &EditSettings) -> Result<Vec<CwpEntry>>
where
    I: IntoIterator<Item = (usize, &'a str)>,
{
    let mut stack: Vec<(usize, &'a str)> = Vec::new();
    let mut entries = Vec::new();

    for (number, raw) in lines {
        let line = ConfigLine::classify(number, raw, settings)?;
        if line.is_blank {
            continue;
        }
        let depth = line.indent_depth;

        if line.is_comment {
            let path = stack
                .iter()
                .take_while(|(d, _)| *d < depth)
                .map(|(_, v)| v.to_string())
                .collect();
            entries.push(CwpEntry::new(path, raw, depth, true));
            continue;
        }

        while stack.last().is_some_and(|(d, _)| *d >= depth) {
            stack.pop();
        }

        let max_depth = stack.last().map_or(0, |(d, _)| d + 1);
        if depth > max_depth {
            match settings.hierarchy {
                HierarchyPolicy::Strict => {
                    return Err(Error::MalformedHierarchy {
                        line: number,
                        depth,
                        max_depth,
                    });
                }
                HierarchyPolicy::Lenient => {
                    tracing::warn!(
                        line = number,
                        depth,
                        max_depth,
                        "over-indented line attached to nearest shallower ancestor"
                    );
                }
            }
        }

        let path = stack.iter().map(|(_, v)| v.to_string()).collect();
        entries.push(CwpEntry::new(path, raw, depth, false));
        stack.push((depth, line.stripped()));
    }

    Ok(entries)
}
