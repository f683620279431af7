//! Error types for confpath-core

/// Result type for confpath-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing or editing a configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(
        "Malformed indent at line {line}: {spaces} leading spaces is not a multiple of {step_space}"
    )]
    MalformedIndent {
        line: usize,
        spaces: usize,
        step_space: usize,
    },

    #[error("Malformed hierarchy at line {line}: depth {depth} exceeds the allowed depth {max_depth}")]
    MalformedHierarchy {
        line: usize,
        depth: usize,
        max_depth: usize,
    },

    #[error("Tab character in the indentation of line {line}; indent with spaces")]
    TabIndent { line: usize },

    #[error("No match found for pattern: {pattern}")]
    NoMatchFound { pattern: String },

    #[error("Pattern matched {count} times where a single match was required: {pattern}")]
    AmbiguousPattern { pattern: String, count: usize },

    #[error("Pattern is empty")]
    EmptyPattern,

    #[error("Invalid pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Invalid regex {pattern:?}: {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid settings: {message}")]
    InvalidSettings { message: String },

    #[error("Invalid edit script: {0}")]
    InvalidScript(#[from] toml::de::Error),

    #[error("Edit {step} of the script failed: {source}")]
    ScriptStep {
        step: usize,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub fn no_match(pattern: impl Into<String>) -> Self {
        Self::NoMatchFound {
            pattern: pattern.into(),
        }
    }

    pub fn invalid_pattern(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_settings(message: impl Into<String>) -> Self {
        Self::InvalidSettings {
            message: message.into(),
        }
    }
}
