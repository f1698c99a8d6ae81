//! Configuration handling for csvtable

use std::path::PathBuf;

/// Default field separator
pub const DEFAULT_SEPARATOR: &str = ",";

/// Default comment marker
pub const DEFAULT_COMMENT: char = '#';

/// Output format for rendering a table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
    Terminal,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "terminal" => Ok(OutputFormat::Terminal),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Configuration held alongside a table.
///
/// Survives `Table::clear` and bulk replacement; only the `load_file*`
/// family overwrites the path, separator and comment marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// File the table was loaded from (and saves to by default)
    pub path: Option<PathBuf>,
    /// Field separator
    pub separator: String,
    /// Comment marker. Inert unless `skip_comments` is set.
    pub comment: Option<char>,
    /// Skip rows starting with the comment marker while parsing
    pub skip_comments: bool,
    /// Honor `"` quoting while parsing; when off, lines are split verbatim
    pub quoting: bool,
    /// Output format
    pub output_format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: None,
            separator: DEFAULT_SEPARATOR.to_string(),
            comment: Some(DEFAULT_COMMENT),
            skip_comments: false,
            quoting: true,
            output_format: OutputFormat::default(),
        }
    }
}

impl Config {
    /// Create a new Config bound to a file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Default::default()
        }
    }

    /// Set the field separator
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Set the comment marker
    pub fn with_comment(mut self, comment: char) -> Self {
        self.comment = Some(comment);
        self
    }

    /// Clear the comment marker
    pub fn without_comment(mut self) -> Self {
        self.comment = None;
        self
    }

    /// Enable or disable skipping rows that start with the comment marker
    pub fn with_skip_comments(mut self, skip: bool) -> Self {
        self.skip_comments = skip;
        self
    }

    /// Marker the parsers should skip on, if comment skipping is enabled
    pub fn active_comment(&self) -> Option<char> {
        self.comment.filter(|_| self.skip_comments)
    }

    /// Enable or disable quote handling
    pub fn with_quoting(mut self, quoting: bool) -> Self {
        self.quoting = quoting;
        self
    }

    /// Set output format
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Separator character used by the quote-aware tokenizer.
    ///
    /// The tokenizer works on single characters: only the first character of
    /// a longer separator is used, and an empty separator falls back to `,`.
    /// Multi-character separators apply in full to `split_line`, the
    /// quote-blind `LineSplitter` and serialization.
    pub fn separator_char(&self) -> char {
        self.separator.chars().next().unwrap_or(',')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.path, None);
        assert_eq!(config.separator, ",");
        assert_eq!(config.comment, Some('#'));
        assert!(!config.skip_comments);
        assert_eq!(config.active_comment(), None);
        assert!(config.quoting);
        assert_eq!(config.output_format, OutputFormat::Csv);
    }

    #[test]
    fn test_active_comment_requires_opt_in() {
        let config = Config::default().with_comment(';');
        assert_eq!(config.active_comment(), None);

        let config = config.with_skip_comments(true);
        assert_eq!(config.active_comment(), Some(';'));
        assert_eq!(config.without_comment().active_comment(), None);
    }

    #[test]
    fn test_separator_char_fallback() {
        assert_eq!(Config::default().with_separator(";").separator_char(), ';');
        assert_eq!(Config::default().with_separator("").separator_char(), ',');
        assert_eq!(Config::default().with_separator("::").separator_char(), ':');
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("terminal".parse::<OutputFormat>(), Ok(OutputFormat::Terminal));
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
