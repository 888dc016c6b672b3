//! Classification of single lines in a Gecko section
//!
//! ```text
//! $Name [Creator]       title of a disabled code
//! $1Name                title of an enabled code
//! +$Name                title of an enabled code
//! *Some note            note
//! 04000000 60000000     payload line
//! ```
//!
//! ```
//! use geckocfg::line::Line;
//!
//! assert_eq!(
//!     Line::classify("$MyCode [Author]"),
//!     Line::Title {
//!         enabled: false,
//!         name: "MyCode",
//!         creator: "Author",
//!     }
//! );
//! assert_eq!(Line::classify("*A note"), Line::Note("A note"));
//! ```

/// A classified line of a Gecko section
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Line<'a> {
    /// Start of a new code
    Title {
        /// Whether the title marks the code as enabled
        enabled: bool,
        /// Trimmed code name
        name: &'a str,
        /// Creator between `[` and `]`, empty if absent
        creator: &'a str,
    },

    /// Note text, without the leading `*`
    Note(&'a str),

    /// Anything else, normally a payload line
    Code(&'a str),
}

impl<'a> Line<'a> {
    /// Classify a line by its first character
    pub fn classify(line: &'a str) -> Self {
        let mut chars = line.chars();
        match chars.next() {
            Some('+') => {
                // `+` is followed by the usual `$`, which is skipped
                chars.next();
                Line::title(true, chars.as_str())
            }
            Some('$') => {
                // Optional state digit right after the `$`
                let rest = chars.as_str();
                let (enabled, rest) = match rest.chars().next() {
                    Some('1') => (true, &rest[1..]),
                    Some('0') => (false, &rest[1..]),
                    _ => (false, rest),
                };
                Line::title(enabled, rest)
            }
            Some('*') => Line::Note(chars.as_str()),
            _ => Line::Code(line),
        }
    }

    /// Split `Name [Creator]` into its parts
    fn title(enabled: bool, rest: &'a str) -> Self {
        let (name, creator) = match rest.find('[') {
            Some(open) => {
                let creator = &rest[open + 1..];
                let creator = match creator.find(']') {
                    Some(close) => &creator[..close],
                    None => creator,
                };
                (&rest[..open], creator)
            }
            None => (rest, ""),
        };

        Line::Title {
            enabled,
            name: name.trim(),
            creator,
        }
    }
}

/// Whether a line is blank or a `#` comment
pub fn is_ignored(line: &str) -> bool {
    line.is_empty() || line.starts_with('#')
}

/// Remove blank and comment lines, keeping the order of the rest
///
/// ```
/// use geckocfg::line::strip_comments;
///
/// let lines = vec![
///     String::from("# comment"),
///     String::new(),
///     String::from("$Code"),
/// ];
/// assert_eq!(strip_comments(lines), vec![String::from("$Code")]);
/// ```
pub fn strip_comments(mut lines: Vec<String>) -> Vec<String> {
    lines.retain(|line| !is_ignored(line));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title<'a>(enabled: bool, name: &'a str, creator: &'a str) -> Line<'a> {
        Line::Title {
            enabled,
            name,
            creator,
        }
    }

    #[test]
    fn test_classify_title() {
        assert_eq!(Line::classify("$MyCode [Author]"), title(false, "MyCode", "Author"));
        assert_eq!(Line::classify("$  Spaced Out  "), title(false, "Spaced Out", ""));
        assert_eq!(Line::classify("$"), title(false, "", ""));
        assert_eq!(Line::classify("$ [Nobody]"), title(false, "", "Nobody"));
    }

    #[test]
    fn test_classify_state_marker() {
        assert_eq!(Line::classify("$1SomeCode"), title(true, "SomeCode", ""));
        assert_eq!(Line::classify("$0SomeCode"), title(false, "SomeCode", ""));
        assert_eq!(Line::classify("$SomeCode"), title(false, "SomeCode", ""));
        assert_eq!(Line::classify("$1"), title(true, "", ""));
    }

    #[test]
    fn test_classify_plus_title() {
        assert_eq!(Line::classify("+$SomeCode"), title(true, "SomeCode", ""));
        assert_eq!(
            Line::classify("+$Moon Jump [Someone]"),
            title(true, "Moon Jump", "Someone")
        );
        assert_eq!(Line::classify("+"), title(true, "", ""));
    }

    #[test]
    fn test_classify_creator() {
        // Unterminated creator runs to the end of the line
        assert_eq!(Line::classify("$Code [Author"), title(false, "Code", "Author"));
        // Creator is not trimmed
        assert_eq!(Line::classify("$Code [ A ] tail"), title(false, "Code", " A "));
        assert_eq!(Line::classify("$Code []"), title(false, "Code", ""));
    }

    #[test]
    fn test_classify_multibyte() {
        assert_eq!(Line::classify("+éCode"), title(true, "Code", ""));
        assert_eq!(Line::classify("$ÜberCode"), title(false, "ÜberCode", ""));
        assert_eq!(Line::classify("*ノート"), Line::Note("ノート"));
    }

    #[test]
    fn test_classify_note_and_code() {
        assert_eq!(Line::classify("*A note"), Line::Note("A note"));
        assert_eq!(Line::classify("*"), Line::Note(""));
        assert_eq!(
            Line::classify("04000000 60000000"),
            Line::Code("04000000 60000000")
        );
        assert_eq!(Line::classify("notarealcode"), Line::Code("notarealcode"));
    }

    #[test]
    fn test_strip_comments_idempotent() {
        let lines = vec![
            String::from("#header"),
            String::from("$Code"),
            String::new(),
            String::from(" # indented is not a comment"),
            String::from("04000000 60000000"),
        ];
        let once = strip_comments(lines);
        assert_eq!(
            once,
            vec![
                String::from("$Code"),
                String::from(" # indented is not a comment"),
                String::from("04000000 60000000"),
            ]
        );
        assert_eq!(strip_comments(once.clone()), once);
    }
}
