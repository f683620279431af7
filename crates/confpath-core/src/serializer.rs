//! Rendering a CwP sequence back to text

use crate::entry::CwpEntry;

/// Join every entry's raw value with newlines, in sequence order.
///
/// Blank lines dropped by the parser are not restored.
pub fn serialize(entries: &[CwpEntry]) -> String {
    entries
        .iter()
        .map(CwpEntry::value)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render every entry as a line of CwP-text.
///
/// The output can be pasted back, line by line, as targets for the edit
/// operations.
pub fn to_cwp_text(entries: &[CwpEntry], separator: &str) -> String {
    entries
        .iter()
        .map(|entry| entry.to_cwp_line(separator))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::settings::EditSettings;

    const CONFIG: &str = "\
# TiMOS-B-20.10.R1
configure
    card 1
        card-type iom-1

        mda 1
            no shutdown";

    #[test]
    fn test_serialize_drops_only_blank_lines() {
        let entries = parse(CONFIG, &EditSettings::default()).unwrap();
        assert_eq!(serialize(&entries), CONFIG.replace("\n\n", "\n"));
    }

    #[test]
    fn test_serialize_empty() {
        assert_eq!(serialize(&[]), "");
    }

    #[test]
    fn test_to_cwp_text() {
        let entries = parse(CONFIG, &EditSettings::default()).unwrap();
        insta::assert_snapshot!(to_cwp_text(&entries, ","), @r"
        # TiMOS-B-20.10.R1
        configure
        configure,card 1
        configure,card 1,card-type iom-1
        configure,card 1,mda 1
        configure,card 1,mda 1,no shutdown
        ");
    }
}
