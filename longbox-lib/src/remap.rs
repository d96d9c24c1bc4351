//! Path remapping for database-recorded file locations.
//!
//! The library application usually runs in a container, so the paths it
//! records are not the paths valid on the host running the correction.
//! One operator-supplied prefix mapping bridges the two.

use crate::error::RunError;

/// A single old-prefix → new-prefix substitution. At most one mapping is
/// active per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMapping {
    old: String,
    new: String,
}

impl PathMapping {
    /// Parse the operator-supplied `old-prefix,new-prefix` form.
    ///
    /// Anything other than exactly two comma-separated tokens is a
    /// configuration error, reported before any processing begins.
    pub fn parse(raw: &str) -> Result<Self, RunError> {
        let tokens: Vec<&str> = raw.split(',').collect();
        if tokens.len() != 2 {
            return Err(RunError::config(format!(
                "path remap must be \"old-prefix,new-prefix\", got \"{raw}\""
            )));
        }
        Ok(Self {
            old: tokens[0].to_string(),
            new: tokens[1].to_string(),
        })
    }

    /// Literal prefix substitution — not a pattern. A path that does not
    /// start with the old prefix is assumed to be host-relative already
    /// and is returned unchanged.
    pub fn apply(&self, path: &str) -> String {
        match path.strip_prefix(&self.old) {
            Some(rest) => format!("{}{}", self.new, rest),
            None => path.to_string(),
        }
    }
}

/// Turn a stored book URL into a filesystem path: strip the `file:`
/// scheme (with or without slashes) and percent-decode the rest.
pub fn decode_book_url(url: &str) -> String {
    let stripped = url
        .strip_prefix("file://")
        .or_else(|| url.strip_prefix("file:"))
        .unwrap_or(url);
    percent_decode(stripped)
}

/// Decode `%XX` escapes; malformed escapes are passed through untouched.
fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                out.push(hi * 16 + lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_two_tokens() {
        let mapping = PathMapping::parse("/data,/mnt/comics").unwrap();
        assert_eq!(mapping.apply("/data/books/a.cbz"), "/mnt/comics/books/a.cbz");
    }

    #[test]
    fn parse_rejects_wrong_token_count() {
        assert!(matches!(PathMapping::parse("/data"), Err(RunError::Config(_))));
        assert!(matches!(PathMapping::parse("a,b,c"), Err(RunError::Config(_))));
        assert!(matches!(PathMapping::parse(""), Err(RunError::Config(_))));
    }

    #[test]
    fn apply_is_noop_without_prefix_match() {
        let mapping = PathMapping::parse("data,/data/print/comics").unwrap();
        // "/data/..." does not start with "data" — literal matching, not fuzzy
        assert_eq!(
            mapping.apply("/data/print/comics/cw.cbz"),
            "/data/print/comics/cw.cbz"
        );
    }

    #[test]
    fn apply_replaces_only_the_prefix() {
        let mapping = PathMapping::parse("/data,/host").unwrap();
        assert_eq!(mapping.apply("/data/data/x.cbz"), "/host/data/x.cbz");
    }

    #[test]
    fn decodes_file_scheme_variants() {
        assert_eq!(decode_book_url("file:///data/a.cbz"), "/data/a.cbz");
        assert_eq!(decode_book_url("file:/data/a.cbz"), "/data/a.cbz");
        assert_eq!(decode_book_url("/data/a.cbz"), "/data/a.cbz");
    }

    #[test]
    fn decodes_percent_escapes() {
        assert_eq!(
            decode_book_url("file:/data/Civil%20War%20%231.cbz"),
            "/data/Civil War #1.cbz"
        );
        assert_eq!(decode_book_url("file:/data/Espa%C3%B1a.cbz"), "/data/España.cbz");
    }

    #[test]
    fn malformed_escapes_pass_through() {
        assert_eq!(decode_book_url("/data/100%.cbz"), "/data/100%.cbz");
        assert_eq!(decode_book_url("/data/a%2.cbz"), "/data/a%2.cbz");
    }
}
