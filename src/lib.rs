//! csvtable - a small CSV table library
//!
//! Parses delimited text into a growable, possibly ragged table of text
//! cells, offers typed cell access that extends the table on demand, and
//! writes the table back out as delimited text.

pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod parser;

pub use config::Config;
pub use error::{Result, TableError};
pub use model::{Row, Table};
pub use parser::{get_from_string, split_line, RowParser, Tokenizer};
