//! Check command implementation

use std::path::Path;

use confpath_core::{EditSettings, MatchOptions};

use crate::context::load_session;
use crate::error::Result;

/// Print `true` when `block` has a serial match in `file`, `false` otherwise.
pub fn run_check(file: &Path, block: &str, regex: bool, settings: EditSettings) -> Result<()> {
    let found = block_found(file, block, regex, settings)?;
    println!("{found}");
    Ok(())
}

fn block_found(file: &Path, block: &str, regex: bool, settings: EditSettings) -> Result<bool> {
    let session = load_session(file, settings)?;
    let options = MatchOptions {
        regex_match: regex,
        multiple_match: false,
    };
    Ok(session.cwp_serial_check(block, options)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir) -> std::path::PathBuf {
        let path = dir.path().join("router.cfg");
        std::fs::write(&path, "configure\n    card 1\n        mda 1\n").unwrap();
        path
    }

    #[test]
    fn test_block_found() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir);
        let settings = EditSettings::default();

        assert!(block_found(&path, "configure,card 1\nconfigure,card 1,mda 1", false, settings.clone()).unwrap());
        assert!(block_found(&path, r"configure,card \d", true, settings.clone()).unwrap());
        assert!(!block_found(&path, "configure,card 2", false, settings).unwrap());
    }

    #[test]
    fn test_empty_block_is_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir);
        assert!(block_found(&path, "  ", false, EditSettings::default()).is_err());
    }
}
