//! Flatten command implementation

use std::path::Path;

use confpath_core::EditSettings;

use crate::context::load_session;
use crate::error::Result;

/// Print every entry of `file` as a line of CwP-text.
pub fn run_flatten(file: &Path, settings: EditSettings) -> Result<()> {
    let session = load_session(file, settings)?;
    let text = session.to_cwp_text();
    if !text.is_empty() {
        println!("{text}");
    }
    Ok(())
}
