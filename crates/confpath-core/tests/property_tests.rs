use std::collections::HashSet;

use confpath_core::{CwpEntry, EditSession, EditSettings, MatchOptions};
use proptest::prelude::*;

/// Well-formed configurations: each line at most one level below the
/// previous non-comment line. Comments sit at any aligned depth.
fn config_text() -> impl Strategy<Value = String> {
    let line = (
        0usize..4,
        prop::bool::weighted(0.25),
        "[a-z]{1,8}( [a-z0-9]{1,4})?",
    );
    prop::collection::vec(line, 1..30).prop_map(|lines| {
        let mut previous: Option<usize> = None;
        lines
            .into_iter()
            .map(|(depth, comment, word)| {
                if comment {
                    return format!("{}# {}", "    ".repeat(depth), word);
                }
                let depth = previous.map_or(0, |p| depth.min(p + 1));
                previous = Some(depth);
                format!("{}{}", "    ".repeat(depth), word)
            })
            .collect::<Vec<_>>()
            .join("\n")
    })
}

fn settings() -> EditSettings {
    EditSettings::new(4, ["#"])
}

/// Every path equals the nearest shallower non-comment line's path plus its
/// value. Comments never appear in a path.
fn assert_paths_consistent(entries: &[CwpEntry]) -> Result<(), TestCaseError> {
    let comments: HashSet<&str> = entries
        .iter()
        .filter(|e| e.is_comment())
        .map(CwpEntry::stripped)
        .collect();

    for (i, entry) in entries.iter().enumerate() {
        prop_assert!(entry.path().iter().all(|segment| !comments.contains(segment.as_str())));
        if entry.is_comment() {
            prop_assert!(entry.path().len() <= entry.depth());
            continue;
        }
        prop_assert_eq!(entry.path().len(), entry.depth());
        if entry.depth() == 0 {
            continue;
        }
        let parent = entries[..i]
            .iter()
            .rev()
            .filter(|e| !e.is_comment())
            .find(|e| e.depth() == entry.depth() - 1)
            .ok_or_else(|| TestCaseError::fail("entry without parent"))?;
        let mut expected = parent.path().to_vec();
        expected.push(parent.stripped().to_string());
        prop_assert_eq!(entry.path(), expected.as_slice());
    }
    Ok(())
}

proptest! {
    #[test]
    fn test_serialize_roundtrip(text in config_text()) {
        let session = EditSession::parse(&text, settings()).unwrap();
        prop_assert_eq!(session.serialize(), text);
    }

    #[test]
    fn test_parsed_paths_consistent(text in config_text()) {
        let session = EditSession::parse(&text, settings()).unwrap();
        assert_paths_consistent(session.entries())?;
    }

    #[test]
    fn test_search_idempotent(text in config_text(), prefix in "[a-z]{1,3}") {
        let session = EditSession::parse(&text, settings()).unwrap();
        let value = format!("{prefix}.*");
        let first: Vec<CwpEntry> = session
            .cwp_search("", &value, MatchOptions::regex())
            .unwrap()
            .into_iter()
            .cloned()
            .collect();
        let second: Vec<CwpEntry> = session
            .cwp_search("", &value, MatchOptions::regex())
            .unwrap()
            .into_iter()
            .cloned()
            .collect();
        prop_assert_eq!(first, second);
        prop_assert_eq!(session.serialize(), text);
    }

    #[test]
    fn test_delete_keeps_paths_or_leaves_session(text in config_text(), pick in any::<prop::sample::Index>()) {
        let mut session = EditSession::parse(&text, settings()).unwrap();
        let target = pick.get(session.entries()).to_cwp_line(",");

        match session.delete_serial_lines(&target, MatchOptions::literal()) {
            Ok(edit) => {
                prop_assert_eq!(edit.removed.len(), 1);
                prop_assert_eq!(session.len(), text.lines().count() - 1);
                assert_paths_consistent(session.entries())?;
            }
            Err(_) => {
                prop_assert_eq!(session.serialize(), text);
            }
        }
    }

    #[test]
    fn test_insert_keeps_paths(text in config_text(), pick in any::<prop::sample::Index>()) {
        let mut session = EditSession::parse(&text, settings()).unwrap();
        let parents: Vec<&CwpEntry> = session.iter().filter(|e| !e.is_comment()).collect();
        prop_assume!(!parents.is_empty());
        let anchor = pick.get(&parents).to_cwp_line(",");
        let new_line = format!("{anchor},inserted");

        session
            .add_after_lines(&new_line, &anchor, MatchOptions::literal())
            .unwrap();
        prop_assert_eq!(session.len(), text.lines().count() + 1);
        assert_paths_consistent(session.entries())?;
    }
}
