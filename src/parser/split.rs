//! Quote-blind splitting

use crate::config::{Config, DEFAULT_SEPARATOR};

use super::{RowParser, Rows};

/// Split one line on `separator` without any quote handling.
///
/// Every occurrence of the separator starts a new field, so empty input
/// yields a single empty field. An empty separator returns the whole input
/// as one field.
pub fn split_line(text: &str, separator: &str) -> Vec<String> {
    if separator.is_empty() {
        return vec![text.to_string()];
    }
    text.split(separator).map(str::to_string).collect()
}

/// Split one line on the default separator (`,`)
pub fn get_from_string(text: &str) -> Vec<String> {
    split_line(text, DEFAULT_SEPARATOR)
}

/// Line-oriented parser with no quote awareness.
///
/// Rows end at `\n` (a preceding `\r` is dropped). Blank lines produce a row
/// with one empty field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSplitter {
    separator: String,
    comment: Option<char>,
}

impl LineSplitter {
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: Option<char>) -> Self {
        self.comment = comment;
        self
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.separator.clone()).with_comment(config.active_comment())
    }
}

impl RowParser for LineSplitter {
    fn parse_str(&self, input: &str) -> Rows {
        input
            .lines()
            .filter(|line| match self.comment {
                Some(marker) => !line.starts_with(marker),
                None => true,
            })
            .map(|line| split_line(line, &self.separator))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_line() {
        assert_eq!(split_line("a,b,c", ","), vec!["a", "b", "c"]);
        assert_eq!(split_line("a,,c,", ","), vec!["a", "", "c", ""]);
        assert_eq!(split_line("\"a,b\"", ","), vec!["\"a", "b\""]);
    }

    #[test]
    fn test_split_line_multichar_separator() {
        assert_eq!(split_line("a::b::c", "::"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_line_edge_cases() {
        assert_eq!(split_line("", ","), vec![""]);
        assert_eq!(split_line("a,b", ""), vec!["a,b"]);
    }

    #[test]
    fn test_get_from_string_uses_comma() {
        assert_eq!(get_from_string("1;2,3"), vec!["1;2", "3"]);
    }

    #[test]
    fn test_line_splitter() {
        let splitter = LineSplitter::new(",");
        assert_eq!(
            splitter.parse_str("a,b\r\n\nc\n"),
            vec![vec!["a", "b"], vec![""], vec!["c"]]
        );
        assert!(splitter.parse_str("").is_empty());
    }

    #[test]
    fn test_line_splitter_skips_comments() {
        let splitter = LineSplitter::new(";").with_comment(Some('#'));
        assert_eq!(splitter.parse_str("#x;y\na;b\n"), vec![vec!["a", "b"]]);
    }
}
