use glob::{MatchOptions, Pattern};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Returns true if `pattern` contains glob syntax (`*`, `?`, `[` or an
/// extended `+(`, `@(`, `!(` group). Backslash-escaped characters do not count.
pub fn is_glob_pattern(pattern: &str) -> bool {
    let mut chars = pattern.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                chars.next();
            }
            '*' | '?' | '[' => return true,
            '+' | '@' | '!' if chars.peek() == Some(&'(') => return true,
            _ => {}
        }
    }
    false
}

/// A help topic pattern, matched against builtin names.
pub struct TopicMatcher<'a> {
    literal: &'a str,
    glob: Option<Pattern>,
}

impl<'a> TopicMatcher<'a> {
    pub fn new(pattern: &'a str) -> Self {
        // A pattern that is not valid glob syntax can still match as a prefix.
        let glob = Pattern::new(pattern).ok();
        Self {
            literal: pattern,
            glob,
        }
    }

    /// The pattern is a prefix of `name`, or matches all of it as a glob.
    pub fn matches(&self, name: &str) -> bool {
        name.starts_with(self.literal)
            || self
                .glob
                .as_ref()
                .is_some_and(|glob| glob.matches_with(name, MATCH_OPTIONS))
    }
}
