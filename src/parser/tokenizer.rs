//! Quote-aware CSV tokenizer
//!
//! A single pass over the input characters. `"` toggles quoting and is never
//! kept in the output; there is no doubled-quote escape. Inside quotes the
//! separator and line terminators are literal. `\n`, `\r` and `\r\n` all end
//! a row: once a row has been closed, further terminators are absorbed until
//! some other character arrives, so no lookahead is needed.

use tracing::{debug, trace, warn};

use crate::config::Config;

use super::{RowParser, Rows};

/// Parser for quoted, delimited text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tokenizer {
    separator: char,
    comment: Option<char>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(',')
    }
}

impl Tokenizer {
    /// Create a tokenizer splitting on `separator`, with comment skipping off
    pub fn new(separator: char) -> Self {
        Self {
            separator,
            comment: None,
        }
    }

    /// Skip rows starting with `comment` (outside quotes)
    pub fn with_comment(mut self, comment: Option<char>) -> Self {
        self.comment = comment;
        self
    }

    /// Build a tokenizer from a config's separator and, when comment
    /// skipping is enabled, its comment marker.
    ///
    /// Only the first character of a multi-character separator is used.
    pub fn from_config(config: &Config) -> Self {
        if config.separator.chars().count() > 1 {
            warn!(
                separator = %config.separator,
                used = %config.separator_char(),
                "quote-aware tokenizer splits on the first separator character only"
            );
        }
        Self::new(config.separator_char()).with_comment(config.active_comment())
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    pub fn comment(&self) -> Option<char> {
        self.comment
    }
}

impl RowParser for Tokenizer {
    fn parse_str(&self, input: &str) -> Rows {
        let mut assembler = RowAssembler::new(*self);
        for ch in input.chars() {
            assembler.push(ch);
        }
        let rows = assembler.finish();
        debug!(rows = rows.len(), "parsed CSV input");
        rows
    }
}

/// Per-parse state. Built fresh for every call and consumed by `finish`.
struct RowAssembler {
    tokenizer: Tokenizer,
    rows: Rows,
    row: Vec<String>,
    field: String,
    in_quote: bool,
    just_emitted_row: bool,
    at_row_start: bool,
    in_comment: bool,
}

fn is_terminator(ch: char) -> bool {
    ch == '\n' || ch == '\r'
}

impl RowAssembler {
    fn new(tokenizer: Tokenizer) -> Self {
        Self {
            tokenizer,
            rows: Vec::new(),
            row: Vec::new(),
            field: String::new(),
            in_quote: false,
            just_emitted_row: false,
            at_row_start: true,
            in_comment: false,
        }
    }

    fn push(&mut self, ch: char) {
        if self.in_comment {
            if is_terminator(ch) {
                // The comment line's terminator counts as a row end so a
                // following `\n` of a `\r\n` pair is absorbed.
                self.in_comment = false;
                self.just_emitted_row = true;
            }
            return;
        }

        if self.at_row_start && !self.in_quote && Some(ch) == self.tokenizer.comment {
            self.in_comment = true;
            return;
        }

        if ch == '"' {
            if self.in_quote {
                self.in_quote = false;
            } else {
                self.in_quote = true;
                self.just_emitted_row = false;
            }
            self.at_row_start = false;
        } else if ch == self.tokenizer.separator {
            if self.in_quote {
                self.field.push(ch);
            } else {
                self.close_field();
                self.just_emitted_row = false;
            }
            self.at_row_start = false;
        } else if is_terminator(ch) {
            if self.in_quote {
                self.field.push(ch);
            } else if !self.just_emitted_row {
                self.close_field();
                self.close_row();
                self.just_emitted_row = true;
                self.at_row_start = true;
            }
        } else {
            self.field.push(ch);
            if !self.in_quote {
                self.just_emitted_row = false;
            }
            self.at_row_start = false;
        }
    }

    fn close_field(&mut self) {
        self.row.push(std::mem::take(&mut self.field));
    }

    fn close_row(&mut self) {
        let row = std::mem::take(&mut self.row);
        trace!(row = self.rows.len(), fields = ?row, "parsed row");
        self.rows.push(row);
    }

    fn finish(mut self) -> Rows {
        if !self.field.is_empty() {
            self.close_field();
        }
        if !self.row.is_empty() {
            self.close_row();
        }
        self.rows
    }
}
