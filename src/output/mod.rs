//! Output formatting for tables

mod csv;
mod json;
mod terminal;

use std::io::Write;

use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::model::Table;

pub use self::csv::CsvOutput;
pub use self::json::JsonOutput;
pub use self::terminal::TerminalOutput;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Render a table to a writer
    fn render(&self, table: &Table, writer: &mut dyn Write) -> Result<()>;
}

/// Factory for creating output formatters
pub struct OutputFactory;

impl OutputFactory {
    /// Create an output formatter based on format type.
    ///
    /// Delimited output uses the configuration's separator.
    pub fn create(format: OutputFormat, config: &Config) -> Box<dyn OutputFormatter> {
        match format {
            OutputFormat::Csv => Box::new(CsvOutput::new(config.separator.clone())),
            OutputFormat::Json => Box::new(JsonOutput::new()),
            OutputFormat::Terminal => Box::new(TerminalOutput::new()),
        }
    }
}

/// Render a table to stdout in its configured output format
pub fn render_to_stdout(table: &Table) -> Result<()> {
    let formatter = OutputFactory::create(table.config.output_format, &table.config);
    let mut stdout = std::io::stdout().lock();
    formatter.render(table, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(format: OutputFormat, table: &Table) -> String {
        let mut buf = Vec::new();
        OutputFactory::create(format, &table.config)
            .render(table, &mut buf)
            .unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_factory_csv_uses_config_separator() {
        let table = Table::parse_str("a;b\n", Config::default().with_separator(";"));
        assert_eq!(render(OutputFormat::Csv, &table), "a;b\n");
    }

    #[test]
    fn test_factory_json() {
        let table = Table::parse_str("a,b\nc\n", Config::default());
        let out = render(OutputFormat::Json, &table);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value, serde_json::json!([["a", "b"], ["c"]]));
    }
}
