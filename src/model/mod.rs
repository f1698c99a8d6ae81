//! Data model for tabular data representation

pub mod cell;
mod table;

pub use table::{Row, Table};
