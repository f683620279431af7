//! Classification of physical input lines

use crate::error::{Error, Result};
use crate::settings::EditSettings;

/// One physical line of configuration text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLine<'a> {
    /// The line as written, indentation and trailing content included
    pub raw: &'a str,
    /// Leading space count divided by the step space
    pub indent_depth: usize,
    pub is_comment: bool,
    pub is_blank: bool,
}

impl<'a> ConfigLine<'a> {
    /// Classify `raw`, the 1-based line `number` of its document.
    ///
    /// Every non-blank line, comments included, must be indented by an exact
    /// multiple of the step space.
    pub fn classify(number: usize, raw: &'a str, settings: &EditSettings) -> Result<Self> {
        if settings.step_space == 0 {
            return Err(Error::invalid_settings("step_space must be at least 1"));
        }
        let stripped = raw.trim();
        if stripped.is_empty() {
            return Ok(Self {
                raw,
                indent_depth: 0,
                is_comment: false,
                is_blank: true,
            });
        }

        let indent = &raw[..raw.len() - raw.trim_start().len()];
        if indent.contains('\t') {
            return Err(Error::TabIndent { line: number });
        }
        let spaces = indent.chars().count();

        if spaces % settings.step_space != 0 {
            return Err(Error::MalformedIndent {
                line: number,
                spaces,
                step_space: settings.step_space,
            });
        }

        Ok(Self {
            raw,
            indent_depth: spaces / settings.step_space,
            is_comment: settings.is_comment(stripped),
            is_blank: false,
        })
    }

    /// The line without surrounding whitespace.
    pub fn stripped(&self) -> &'a str {
        self.raw.trim()
    }
}
