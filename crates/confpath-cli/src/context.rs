//! Session settings resolution and input loading

use std::fs;
use std::path::Path;

use confpath_core::{EditSession, EditSettings, HierarchyPolicy};

use crate::cli::SettingsArgs;
use crate::error::{CliError, Result};

/// Build the session settings from the command line.
///
/// Later layers win: built-in default, settings file, `--dialect`, then
/// the single-field flags. A dialect flag replaces the indentation and
/// comment conventions only, so a settings file's separator and policies
/// survive it.
pub fn resolve_settings(args: &SettingsArgs) -> Result<EditSettings> {
    let mut settings = match &args.settings_file {
        Some(path) => {
            let content = read_file(path)?;
            EditSettings::from_toml_str(&content)?
        }
        None => EditSettings::default(),
    };

    if let Some(dialect) = args.dialect {
        settings.step_space = dialect.step_space();
        settings.comment_prefixes = dialect
            .comment_prefixes()
            .iter()
            .map(|prefix| prefix.to_string())
            .collect();
    }
    if let Some(step_space) = args.step_space {
        settings.step_space = step_space;
    }
    if !args.comment_prefixes.is_empty() {
        settings.comment_prefixes = args.comment_prefixes.clone();
    }
    if let Some(separator) = &args.separator {
        settings.separator = separator.clone();
    }
    if args.lenient {
        settings.hierarchy = HierarchyPolicy::Lenient;
    }

    settings.validate()?;
    tracing::debug!(
        step_space = settings.step_space,
        separator = %settings.separator,
        hierarchy = ?settings.hierarchy,
        "resolved settings"
    );
    Ok(settings)
}

/// Read and parse a configuration file.
pub fn load_session(path: &Path, settings: EditSettings) -> Result<EditSession> {
    let text = read_file(path)?;
    EditSession::parse(&text, settings).map_err(|e| CliError::user(format!("{}: {e}", path.display())))
}

pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| CliError::file(path, e))
}
