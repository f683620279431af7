//! Session settings and dialect presets
//!
//! Settings are fixed when an [`EditSession`](crate::EditSession) is created.
//! They can be built in code, taken from a [`Dialect`] preset, or loaded
//! from a TOML file that names a base dialect and overrides single fields:
//!
//! ```toml
//! dialect = "cisco-ios"
//! step_space = 2
//! hierarchy = "lenient"
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Known configuration dialects with their indentation and comment conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dialect {
    /// Nokia SR OS: four spaces per level, `#` and `echo` comments.
    #[default]
    NokiaSros,
    /// Cisco IOS: one space per level, `!` comments.
    CiscoIos,
}

impl Dialect {
    pub fn step_space(&self) -> usize {
        match self {
            Dialect::NokiaSros => 4,
            Dialect::CiscoIos => 1,
        }
    }

    pub fn comment_prefixes(&self) -> &'static [&'static str] {
        match self {
            Dialect::NokiaSros => &["#", "echo"],
            Dialect::CiscoIos => &["!"],
        }
    }
}

impl FromStr for Dialect {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nokia-sros" | "nokia" | "sros" => Ok(Dialect::NokiaSros),
            "cisco-ios" | "cisco" | "ios" => Ok(Dialect::CiscoIos),
            _ => Err(Error::invalid_settings(format!("unknown dialect '{s}'"))),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::NokiaSros => write!(f, "nokia-sros"),
            Dialect::CiscoIos => write!(f, "cisco-ios"),
        }
    }
}

/// What to do with a line indented more than one level below its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HierarchyPolicy {
    /// Reject the input with `MalformedHierarchy`.
    #[default]
    Strict,
    /// Attach the line to its nearest shallower ancestor and log a warning.
    Lenient,
}

/// What to do when a first-match operation finds more than one match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AmbiguityPolicy {
    /// Act on the first match in document order.
    #[default]
    FirstMatch,
    /// Fail with `AmbiguousPattern`.
    Error,
}

/// Construction parameters of an edit session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditSettings {
    /// Indentation characters per hierarchy level
    pub step_space: usize,
    /// A stripped line starting with any of these is a comment
    pub comment_prefixes: Vec<String>,
    /// Joins path segments in CwP-text
    pub separator: String,
    #[serde(default)]
    pub hierarchy: HierarchyPolicy,
    #[serde(default)]
    pub ambiguity: AmbiguityPolicy,
}

impl EditSettings {
    /// Create settings with the default separator and policies.
    pub fn new<I, S>(step_space: usize, comment_prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            step_space,
            comment_prefixes: comment_prefixes.into_iter().map(Into::into).collect(),
            separator: default_separator(),
            hierarchy: HierarchyPolicy::default(),
            ambiguity: AmbiguityPolicy::default(),
        }
    }

    pub fn for_dialect(dialect: Dialect) -> Self {
        Self::new(dialect.step_space(), dialect.comment_prefixes().iter().copied())
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_hierarchy(mut self, hierarchy: HierarchyPolicy) -> Self {
        self.hierarchy = hierarchy;
        self
    }

    pub fn with_ambiguity(mut self, ambiguity: AmbiguityPolicy) -> Self {
        self.ambiguity = ambiguity;
        self
    }

    /// Load settings from TOML, resolving an optional base `dialect`.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: SettingsFile = toml::from_str(content)
            .map_err(|e| Error::invalid_settings(e.to_string()))?;
        let settings = file.resolve();
        settings.validate()?;
        Ok(settings)
    }

    /// Check the settings can drive a parser.
    pub fn validate(&self) -> Result<()> {
        if self.step_space == 0 {
            return Err(Error::invalid_settings("step_space must be at least 1"));
        }
        if self.separator.is_empty() {
            return Err(Error::invalid_settings("separator must not be empty"));
        }
        if self.separator.contains('\\') || self.separator.chars().any(char::is_whitespace) {
            return Err(Error::invalid_settings(
                "separator must not contain backslashes or whitespace",
            ));
        }
        if self.comment_prefixes.iter().any(|p| p.trim().is_empty()) {
            return Err(Error::invalid_settings("comment prefixes must not be empty"));
        }
        Ok(())
    }

    /// Whether a stripped line is a comment.
    pub fn is_comment(&self, stripped: &str) -> bool {
        self.comment_prefixes
            .iter()
            .any(|prefix| stripped.starts_with(prefix.as_str()))
    }
}

impl Default for EditSettings {
    fn default() -> Self {
        Self::for_dialect(Dialect::default())
    }
}

fn default_separator() -> String {
    ",".to_string()
}

/// On-disk form: every field optional, layered over a dialect preset.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    dialect: Option<Dialect>,
    step_space: Option<usize>,
    comment_prefixes: Option<Vec<String>>,
    separator: Option<String>,
    hierarchy: Option<HierarchyPolicy>,
    ambiguity: Option<AmbiguityPolicy>,
}

impl SettingsFile {
    fn resolve(self) -> EditSettings {
        let mut settings = EditSettings::for_dialect(self.dialect.unwrap_or_default());
        if let Some(step_space) = self.step_space {
            settings.step_space = step_space;
        }
        if let Some(prefixes) = self.comment_prefixes {
            settings.comment_prefixes = prefixes;
        }
        if let Some(separator) = self.separator {
            settings.separator = separator;
        }
        if let Some(hierarchy) = self.hierarchy {
            settings.hierarchy = hierarchy;
        }
        if let Some(ambiguity) = self.ambiguity {
            settings.ambiguity = ambiguity;
        }
        settings
    }
}
