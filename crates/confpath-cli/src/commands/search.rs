//! Search command implementation

use std::path::Path;

use confpath_core::{CwpEntry, EditSettings, MatchOptions};

use crate::context::load_session;
use crate::error::Result;

/// Print the entries of `file` whose path and value match.
///
/// Plain output is one CwP-text line per entry; `--json` prints an array
/// of entries with their path, raw value, depth and comment flag.
pub fn run_search(
    file: &Path,
    path: &str,
    value: &str,
    regex: bool,
    json: bool,
    settings: EditSettings,
) -> Result<()> {
    let separator = settings.separator.clone();
    let session = load_session(file, settings)?;
    let options = MatchOptions {
        regex_match: regex,
        multiple_match: true,
    };
    let found = session.cwp_search(path, value, options)?;
    tracing::debug!(matches = found.len(), "search finished");

    if json {
        println!("{}", render_json(&found)?);
    } else {
        for entry in found {
            println!("{}", entry.to_cwp_line(&separator));
        }
    }
    Ok(())
}

fn render_json(found: &[&CwpEntry]) -> Result<String> {
    Ok(serde_json::to_string_pretty(found)?)
}
