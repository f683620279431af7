//! Apply command implementation

use std::fs;
use std::path::Path;

use colored::Colorize;
use confpath_core::{Edit, EditScript, EditSettings};

use crate::context::{load_session, read_file};
use crate::error::{CliError, Result};

/// Apply the edit script at `script` to `file`.
///
/// The edited configuration goes to `output` when given, stdout otherwise.
/// Nothing is written when any edit of the script fails.
pub fn run_apply(
    file: &Path,
    script: &Path,
    output: Option<&Path>,
    settings: EditSettings,
) -> Result<()> {
    let mut session = load_session(file, settings)?;
    let script = EditScript::from_toml_str(&read_file(script)?)
        .map_err(|e| CliError::user(format!("{}: {e}", script.display())))?;

    let edits = session.apply_script(&script)?;
    let text = session.serialize();

    match output {
        Some(path) => {
            let content = if text.is_empty() { text } else { format!("{text}\n") };
            fs::write(path, content).map_err(|e| CliError::file(path, e))?;
            eprintln!("{} {}", summary(&edits).green(), path.display());
        }
        None => {
            if !text.is_empty() {
                println!("{text}");
            }
            eprintln!("{}", summary(&edits).green());
        }
    }
    Ok(())
}

fn summary(edits: &[Edit]) -> String {
    let inserted: usize = edits.iter().map(|e| e.inserted.len()).sum();
    let removed: usize = edits.iter().map(|e| e.removed.len()).sum();
    format!(
        "Applied {} edit{} (+{inserted} -{removed} lines)",
        edits.len(),
        if edits.len() == 1 { "" } else { "s" }
    )
}
