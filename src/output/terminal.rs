//! Aligned terminal output

use std::io::Write;

use tabled::builder::Builder;
use tabled::settings::Style;

use crate::error::Result;
use crate::model::Table;

use super::OutputFormatter;

/// Grid view for terminals.
///
/// The first column and the header row carry row and column indices so the
/// output can be used to address cells. Short rows are padded for display
/// only.
pub struct TerminalOutput {
    show_indices: bool,
}

impl TerminalOutput {
    pub fn new() -> Self {
        Self { show_indices: true }
    }

    pub fn without_indices() -> Self {
        Self {
            show_indices: false,
        }
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TerminalOutput {
    fn render(&self, table: &Table, writer: &mut dyn Write) -> Result<()> {
        if table.is_empty() {
            return Ok(());
        }

        let width = table.rows().iter().map(|r| r.len()).max().unwrap_or(0);
        let mut builder = Builder::default();

        if self.show_indices {
            let header = std::iter::once(String::new()).chain((0..width).map(|c| c.to_string()));
            builder.push_record(header);
        }

        for (i, row) in table.rows().iter().enumerate() {
            let mut record: Vec<String> = Vec::with_capacity(width + 1);
            if self.show_indices {
                record.push(i.to_string());
            }
            record.extend(row.iter().map(str::to_string));
            record.resize(width + usize::from(self.show_indices), String::new());
            builder.push_record(record);
        }

        let mut grid = builder.build();
        grid.with(Style::modern());
        writeln!(writer, "{}", grid)?;
        Ok(())
    }
}
