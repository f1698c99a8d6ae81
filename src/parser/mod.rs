//! Parser layer for turning delimited text into rows of fields

mod split;
mod tokenizer;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::config::Config;
use crate::error::{Result, TableError};

pub use self::split::{get_from_string, split_line, LineSplitter};
pub use self::tokenizer::Tokenizer;

/// Raw parse output: rows of fields, in input order
pub type Rows = Vec<Vec<String>>;

/// Trait for turning text into rows of raw string fields
pub trait RowParser: Send + Sync {
    /// Parse in-memory text. Never fails; malformed input yields a best-effort result.
    fn parse_str(&self, input: &str) -> Rows;

    /// Read everything from `reader` and parse it.
    ///
    /// Invalid UTF-8 is replaced rather than rejected.
    fn parse_reader(&self, reader: &mut dyn Read) -> std::io::Result<Rows> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(self.parse_str(&String::from_utf8_lossy(&bytes)))
    }

    /// Open and parse a file
    fn parse_path(&self, path: &Path) -> Result<Rows> {
        let mut file = File::open(path).map_err(|e| TableError::io(path, e))?;
        self.parse_reader(&mut file)
            .map_err(|e| TableError::io(path, e))
    }
}

/// Pick the parser matching the configuration's quoting mode
pub fn parser_for(config: &Config) -> Box<dyn RowParser> {
    if config.quoting {
        Box::new(Tokenizer::from_config(config))
    } else {
        Box::new(LineSplitter::from_config(config))
    }
}
