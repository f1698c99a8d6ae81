//! Delimited text output

use std::io::Write;

use crate::error::Result;
use crate::model::Table;

use super::OutputFormatter;

/// Writes rows as delimited text.
///
/// Cells are joined with the separator and every row, including an empty
/// one, ends with `\n`. Nothing is quoted, so cells containing the separator,
/// a newline or `"` will not read back the same.
pub struct CsvOutput {
    separator: String,
}

impl CsvOutput {
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }

    /// Write the table, reporting raw I/O errors so callers can attach a path
    pub fn write_table<W: Write + ?Sized>(
        &self,
        table: &Table,
        writer: &mut W,
    ) -> std::io::Result<()> {
        for row in table.rows() {
            for (i, cell) in row.iter().enumerate() {
                if i > 0 {
                    writer.write_all(self.separator.as_bytes())?;
                }
                writer.write_all(cell.as_bytes())?;
            }
            writer.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Render the table into a string with the same layout as `write_table`
    pub fn render_string(&self, table: &Table) -> String {
        let mut out = String::new();
        for row in table.rows() {
            out.push_str(&row.cells.join(&self.separator));
            out.push('\n');
        }
        out
    }
}

impl Default for CsvOutput {
    fn default() -> Self {
        Self::new(",")
    }
}

impl OutputFormatter for CsvOutput {
    fn render(&self, table: &Table, writer: &mut dyn Write) -> Result<()> {
        self.write_table(table, writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(output: &CsvOutput, table: &Table) -> String {
        let mut buf = Vec::new();
        output.render(table, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_empty_rows_are_blank_lines() {
        let mut table = Table::new();
        table.set_string(2, 1, "x");
        assert_eq!(render(&CsvOutput::default(), &table), "\n\n,x\n");
    }

    #[test]
    fn test_multichar_separator() {
        let mut table = Table::new();
        table.set_data(vec![vec!["a", "b", "c"]]);
        assert_eq!(render(&CsvOutput::new(" | "), &table), "a | b | c\n");
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(render(&CsvOutput::default(), &Table::new()), "");
    }

    #[test]
    fn test_render_string_matches_writer() {
        let mut table = Table::new();
        table.set_data(vec![vec!["a", "b"], vec![], vec!["", "c", ""]]);
        let output = CsvOutput::new(";");
        assert_eq!(output.render_string(&table), render(&output, &table));
        assert_eq!(output.render_string(&table), "a;b\n\n;c;\n");
    }
}
