//! Canonicalization rules for series names and issue numbers.
//!
//! These rules mirror what the library application's reading-list matcher
//! considers equal: two records that should match must normalize to the
//! same canonical pair.

/// Punctuation cataloging sources disagree on: the ASCII colon and the
/// Unicode dash family. The ASCII hyphen is kept — every source agrees
/// on it.
const STRIPPED: [char; 7] = [
    ':',
    '\u{2010}', // hyphen
    '\u{2011}', // non-breaking hyphen
    '\u{2012}', // figure dash
    '\u{2013}', // en dash
    '\u{2014}', // em dash
    '\u{2015}', // horizontal bar
];

/// Canonical form of a series name: strip inconsistent punctuation, then
/// trim and collapse runs of whitespace to a single space.
pub fn canonical_series(raw: &str) -> String {
    let stripped: String = raw.chars().filter(|c| !STRIPPED.contains(c)).collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Canonical form of an issue number.
///
/// One-shots always normalize to the absent sentinel — the matcher treats
/// a present numeric issue on a one-shot as a mismatch against list
/// entries that omit it. Everything else is trimmed and collapsed, with
/// blank collapsing to absent.
pub fn canonical_number(raw: Option<&str>, oneshot: bool) -> Option<String> {
    if oneshot {
        return None;
    }
    let collapsed = raw?.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_colon() {
        assert_eq!(canonical_series("Civil War:"), "Civil War");
    }

    #[test]
    fn strips_interior_colon_and_collapses() {
        assert_eq!(canonical_series("Batman: Year One"), "Batman Year One");
        assert_eq!(canonical_series("Batman : Year One"), "Batman Year One");
    }

    #[test]
    fn strips_special_dashes_keeps_ascii_hyphen() {
        assert_eq!(canonical_series("X-Men \u{2013} Gold"), "X-Men Gold");
        assert_eq!(canonical_series("Spider-Man\u{2014}Noir"), "Spider-ManNoir");
    }

    #[test]
    fn trims_and_collapses_whitespace() {
        assert_eq!(canonical_series("  The  Wicked +  The Divine "), "The Wicked + The Divine");
        assert_eq!(canonical_series("\tSaga\n"), "Saga");
    }

    #[test]
    fn already_canonical_is_unchanged() {
        assert_eq!(canonical_series("Civil War"), "Civil War");
        // idempotence: canonicalizing a canonical form is the identity
        let once = canonical_series("Civil  War: \u{2014}");
        assert_eq!(canonical_series(&once), once);
    }

    #[test]
    fn oneshot_number_is_always_absent() {
        assert_eq!(canonical_number(Some("1"), true), None);
        assert_eq!(canonical_number(Some("001"), true), None);
        assert_eq!(canonical_number(Some(""), true), None);
        assert_eq!(canonical_number(None, true), None);
    }

    #[test]
    fn ongoing_number_is_trimmed() {
        assert_eq!(canonical_number(Some(" 12 "), false), Some("12".to_string()));
        assert_eq!(canonical_number(Some("1"), false), Some("1".to_string()));
    }

    #[test]
    fn blank_number_collapses_to_absent() {
        assert_eq!(canonical_number(Some("   "), false), None);
        assert_eq!(canonical_number(Some(""), false), None);
        assert_eq!(canonical_number(None, false), None);
    }
}
