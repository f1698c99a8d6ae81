//! Table and Row data structures

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::config::{Config, DEFAULT_COMMENT, DEFAULT_SEPARATOR};
use crate::error::{Result, TableError};
use crate::output::CsvOutput;
use crate::parser::parser_for;

use super::cell;

/// A row in the table: an independently growable sequence of text cells
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    /// Cell text in column order
    pub cells: Vec<String>,
}

impl Row {
    /// Create a row from its cells
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Get a cell by column index
    pub fn get(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }

    /// Number of cells in this row
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for Row {
    fn from(cells: Vec<String>) -> Self {
        Self::new(cells)
    }
}

impl From<Vec<&str>> for Row {
    fn from(cells: Vec<&str>) -> Self {
        Self::new(cells.into_iter().map(str::to_string).collect())
    }
}

/// An in-memory CSV table.
///
/// Rows may differ in length. Every typed getter and setter grows the table
/// on demand so the addressed cell exists: missing rows are appended empty
/// and the addressed row alone is padded with empty cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// All rows in the table
    pub rows: Vec<Row>,
    /// Path, separator and comment marker used for loading and saving
    pub config: Config,
}

impl Table {
    /// Create an empty table with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table with the given configuration
    pub fn with_config(config: Config) -> Self {
        Self {
            rows: Vec::new(),
            config,
        }
    }

    /// Parse in-memory text using the configuration's separator, comment
    /// marker and quoting mode
    pub fn parse_str(text: &str, config: Config) -> Self {
        let rows = parser_for(&config).parse_str(text);
        let mut table = Self::with_config(config);
        table.set_data(rows);
        table
    }

    /// Load a file using the configuration's separator, comment marker and
    /// quoting mode. The path is recorded in the table's configuration.
    pub fn from_path(path: impl AsRef<Path>, config: Config) -> Result<Self> {
        let separator = config.separator.clone();
        let comment = config.comment;
        let mut table = Self::with_config(config);
        table.load_file_with_comments(path, &separator, comment)?;
        Ok(table)
    }

    /// Load a file with the default separator (`,`) and comment marker (`#`).
    ///
    /// The marker only takes effect when `skip_comments` is enabled in the
    /// table's configuration; otherwise rows starting with `#` are data.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.load_file_with_comments(path, DEFAULT_SEPARATOR, Some(DEFAULT_COMMENT))
    }

    /// Load a file with the given separator and the default comment marker.
    ///
    /// With quoting on, only the first character of a multi-character
    /// separator splits fields.
    pub fn load_file_with(&mut self, path: impl AsRef<Path>, separator: &str) -> Result<()> {
        self.load_file_with_comments(path, separator, Some(DEFAULT_COMMENT))
    }

    /// Load a file, replacing every row.
    ///
    /// On success the path, separator and comment marker are recorded in the
    /// configuration. On failure the table is left untouched.
    pub fn load_file_with_comments(
        &mut self,
        path: impl AsRef<Path>,
        separator: &str,
        comment: Option<char>,
    ) -> Result<()> {
        let path = path.as_ref();
        let config = Config {
            path: Some(path.to_path_buf()),
            separator: separator.to_string(),
            comment,
            ..self.config.clone()
        };

        match parser_for(&config).parse_path(path) {
            Ok(rows) => {
                self.config = config;
                self.set_data(rows);
                debug!(path = %path.display(), rows = self.row_count(), "loaded CSV file");
                Ok(())
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load CSV file");
                Err(e)
            }
        }
    }

    /// Replace every row with parsed `text`, keeping the configuration
    pub fn load_str(&mut self, text: &str) {
        let rows = parser_for(&self.config).parse_str(text);
        self.set_data(rows);
    }

    /// Replace the entire row sequence
    pub fn set_data<I, R>(&mut self, rows: I)
    where
        I: IntoIterator<Item = R>,
        R: Into<Row>,
    {
        self.rows = rows.into_iter().map(Into::into).collect();
    }

    /// Remove every row. Configuration is kept.
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the first row (0 for an empty table).
    ///
    /// Other rows may be shorter or longer.
    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Row::len)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Consume the table into plain rows of fields
    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows.into_iter().map(|row| row.cells).collect()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Grow the table until `(row, col)` exists and return that cell.
    ///
    /// Appends empty rows up to `row`, then pads only the addressed row with
    /// empty cells up to `col`. Sibling rows are not touched.
    ///
    /// # Panics
    ///
    /// Panics if the table cannot grow to `(row, col)`, for example when
    /// either index is `usize::MAX`. Use [`Table::try_ensure`] for indices
    /// that come from user input.
    pub fn ensure(&mut self, row: usize, col: usize) -> &mut String {
        match self.try_ensure(row, col) {
            Ok(cell) => cell,
            Err(err) => panic!("{err}"),
        }
    }

    /// Like [`Table::ensure`], but fails with `TableError::OutOfBounds`
    /// instead of panicking when the table cannot grow that far.
    ///
    /// The table is left unchanged on failure.
    pub fn try_ensure(&mut self, row: usize, col: usize) -> Result<&mut String> {
        let out_of_bounds = || TableError::OutOfBounds { row, col };
        let row_len = row.checked_add(1).ok_or_else(out_of_bounds)?;
        let col_len = col.checked_add(1).ok_or_else(out_of_bounds)?;

        // Reserve everything before touching the rows so a failed
        // allocation leaves the table as it was.
        let extra_rows = row_len.saturating_sub(self.rows.len());
        self.rows
            .try_reserve(extra_rows)
            .map_err(|_| out_of_bounds())?;
        let mut new_row = None;
        match self.rows.get_mut(row) {
            Some(existing) => {
                let extra_cells = col_len.saturating_sub(existing.cells.len());
                existing
                    .cells
                    .try_reserve(extra_cells)
                    .map_err(|_| out_of_bounds())?;
            }
            None => {
                let mut cells = Vec::new();
                cells.try_reserve_exact(col_len).map_err(|_| out_of_bounds())?;
                new_row = Some(Row { cells });
            }
        }

        if self.rows.len() < row_len {
            trace!(from = self.rows.len(), to = row_len, "growing rows");
            self.rows.resize_with(row, Row::default);
            self.rows.extend(new_row);
        }
        let cells = &mut self.rows[row].cells;
        if cells.len() < col_len {
            trace!(row, from = cells.len(), to = col_len, "growing row");
            cells.resize_with(col_len, String::new);
        }
        Ok(&mut cells[col])
    }

    /// Look up a cell without growing
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Look up a cell without growing, failing when it does not exist
    pub fn try_get(&self, row: usize, col: usize) -> Result<&str> {
        self.get(row, col)
            .ok_or(TableError::OutOfBounds { row, col })
    }

    /// Cell text, growing the table if needed
    pub fn get_string(&mut self, row: usize, col: usize) -> &str {
        self.ensure(row, col).as_str()
    }

    /// Cell read as an integer (0 if not numeric), growing the table if needed
    pub fn get_int(&mut self, row: usize, col: usize) -> i64 {
        cell::to_int(self.ensure(row, col))
    }

    /// Cell read as a float (0.0 if not numeric), growing the table if needed
    pub fn get_float(&mut self, row: usize, col: usize) -> f64 {
        cell::to_float(self.ensure(row, col))
    }

    /// Cell read as a boolean, growing the table if needed
    pub fn get_bool(&mut self, row: usize, col: usize) -> bool {
        cell::to_bool(self.ensure(row, col))
    }

    pub fn set_string(&mut self, row: usize, col: usize, value: impl Into<String>) {
        *self.ensure(row, col) = value.into();
    }

    pub fn set_int(&mut self, row: usize, col: usize, value: i64) {
        *self.ensure(row, col) = value.to_string();
    }

    pub fn set_float(&mut self, row: usize, col: usize, value: f64) {
        *self.ensure(row, col) = value.to_string();
    }

    pub fn set_bool(&mut self, row: usize, col: usize, value: bool) {
        *self.ensure(row, col) = value.to_string();
    }

    /// Serialize with `separator`: cells joined, every row ended by `\n`.
    ///
    /// Fields are written verbatim; nothing is quoted.
    pub fn serialize(&self, separator: &str) -> String {
        CsvOutput::new(separator).render_string(self)
    }

    /// Serialize with the configured separator
    pub fn to_csv_string(&self) -> String {
        self.serialize(&self.config.separator)
    }

    /// Save to the configured path with the configured separator
    pub fn save_file(&self) -> Result<()> {
        let path = self.config.path.as_deref().ok_or(TableError::MissingPath)?;
        self.save_file_with(path, &self.config.separator)
    }

    /// Save to `path` with the configured separator
    pub fn save_file_to(&self, path: impl AsRef<Path>) -> Result<()> {
        self.save_file_with(path, &self.config.separator)
    }

    /// Save to `path` with `separator`.
    ///
    /// The file is created (or truncated) once and closed on every exit path.
    /// The write is not atomic: a failure part way through leaves a partial
    /// file.
    pub fn save_file_with(&self, path: impl AsRef<Path>, separator: &str) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| TableError::io(path, e))?;
        let mut writer = BufWriter::new(file);

        CsvOutput::new(separator)
            .write_table(self, &mut writer)
            .and_then(|()| writer.flush())
            .map_err(|e| TableError::io(path, e))?;

        debug!(path = %path.display(), rows = self.row_count(), "saved CSV file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(text: &str) -> Table {
        Table::parse_str(text, Config::default())
    }

    #[test]
    fn test_parse_str_counts() {
        let t = table("a,b,c\n1,2\n");
        assert_eq!(t.row_count(), 2);
        assert_eq!(t.column_count(), 3);
        assert_eq!(t.get(1, 1), Some("2"));
        assert_eq!(t.get(1, 2), None);
    }

    #[test]
    fn test_growth_on_write_is_non_rectangular() {
        let mut t = Table::new();
        t.set_string(3, 2, "x");

        assert_eq!(t.row_count(), 4);
        assert!(t.rows[3].len() >= 3);
        assert_eq!(t.get(3, 2), Some("x"));
        for r in 0..3 {
            assert!(t.rows[r].is_empty());
        }
    }

    #[test]
    fn test_growth_pads_only_addressed_row() {
        let mut t = table("a\nb\n");
        t.set_int(0, 3, 9);

        assert_eq!(t.rows[0].cells, vec!["a", "", "", "9"]);
        assert_eq!(t.rows[1].cells, vec!["b"]);
        assert_eq!(t.column_count(), 4);
    }

    #[test]
    fn test_reads_grow_and_default() {
        let mut t = Table::new();
        assert_eq!(t.get_string(1, 1), "");
        assert_eq!(t.row_count(), 2);
        assert!(t.rows[0].is_empty());
        assert_eq!(t.rows[1].len(), 2);

        assert_eq!(t.get_int(2, 0), 0);
        assert_eq!(t.get_float(3, 0), 0.0);
        assert!(!t.get_bool(4, 0));
        assert_eq!(t.row_count(), 5);
    }

    #[test]
    fn test_get_int_grows_like_other_getters() {
        let mut t = Table::new();
        assert_eq!(t.get_int(2, 4), 0);
        assert_eq!(t.row_count(), 3);
        assert_eq!(t.rows[2].len(), 5);
    }

    #[test]
    fn test_non_growing_lookup() {
        let t = table("a,b\n");
        assert_eq!(t.try_get(0, 1).unwrap(), "b");
        assert!(matches!(
            t.try_get(5, 0),
            Err(TableError::OutOfBounds { row: 5, col: 0 })
        ));
        assert_eq!(t.get(0, 2), None);
        assert_eq!(t.row_count(), 1);
    }

    #[test]
    fn test_typed_set_and_get() {
        let mut t = Table::new();
        t.set_int(0, 0, -12);
        t.set_float(0, 1, 2.5);
        t.set_bool(0, 2, true);
        t.set_string(0, 3, "hello");

        assert_eq!(t.get_int(0, 0), -12);
        assert_eq!(t.get_float(0, 1), 2.5);
        assert!(t.get_bool(0, 2));
        assert_eq!(t.get_string(0, 3), "hello");
        assert_eq!(t.rows[0].cells, vec!["-12", "2.5", "true", "hello"]);
    }

    #[test]
    fn test_set_data_replaces_rows() {
        let mut t = table("a\n");
        t.set_data(vec![vec!["x", "y", "z"], vec!["1"]]);

        assert_eq!(t.row_count(), 2);
        assert_eq!(t.column_count(), 3);
        assert_eq!(t.get(1, 0), Some("1"));
    }

    #[test]
    fn test_clear_keeps_config() {
        let config = Config::new("data.csv").with_separator(";").with_comment('%');
        let mut t = Table::parse_str("a;b\nc;d\n", config.clone());
        assert_eq!(t.row_count(), 2);

        t.clear();
        assert_eq!(t.row_count(), 0);
        assert_eq!(t.column_count(), 0);
        assert_eq!(t.config, config);
    }

    #[test]
    fn test_serialize() {
        let t = table("a,b\nc,d\n");
        assert_eq!(t.serialize(","), "a,b\nc,d\n");
        assert_eq!(t.serialize(";"), "a;b\nc;d\n");
        assert_eq!(Table::new().serialize(","), "");
        assert!(table("").is_empty());
    }

    #[test]
    fn test_serialize_never_quotes() {
        let t = table("\"a,b\",c\n");
        assert_eq!(t.to_csv_string(), "a,b,c\n");
    }

    #[test]
    fn test_round_trip_well_formed() {
        let rows = vec![
            vec!["id", "name", "score"],
            vec!["1", "alice", "9.5"],
            vec!["2", "", "7"],
        ];
        let mut t = Table::new();
        t.set_data(rows.clone());

        let reparsed = table(&t.to_csv_string());
        assert_eq!(reparsed.into_rows(), rows);
    }

    #[test]
    fn test_save_file_without_path() {
        assert!(matches!(Table::new().save_file(), Err(TableError::MissingPath)));
    }

    #[test]
    fn test_try_ensure_rejects_unreachable_indices() {
        let mut t = table("a,b\n");
        let before = t.clone();

        assert!(matches!(
            t.try_ensure(usize::MAX, 0),
            Err(TableError::OutOfBounds { row: usize::MAX, col: 0 })
        ));
        assert!(matches!(
            t.try_ensure(0, usize::MAX),
            Err(TableError::OutOfBounds { row: 0, col: usize::MAX })
        ));
        // Representable, but far beyond what can be allocated.
        assert!(t.try_ensure(usize::MAX / 2, 0).is_err());
        assert!(t.try_ensure(0, usize::MAX / 2).is_err());
        assert_eq!(t, before);
    }

    #[test]
    fn test_try_ensure_grows_like_ensure() {
        let mut t = table("a,b\n");
        *t.try_ensure(2, 1).unwrap() = "x".to_string();
        assert_eq!(t.into_rows(), vec![vec!["a", "b"], vec![], vec!["", "x"]]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_ensure_panics_on_max_index() {
        Table::new().get_string(usize::MAX, 0);
    }

    #[test]
    fn test_hash_rows_survive_save_and_reload() {
        let rows = vec![vec!["#1", "x"], vec!["2", "y"]];
        let mut t = Table::new();
        t.set_data(rows.clone());

        let reparsed = table(&t.to_csv_string());
        assert_eq!(reparsed.into_rows(), rows);
    }
}
