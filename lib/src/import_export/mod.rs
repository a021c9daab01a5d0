//! Built-in format plugins

pub mod csv;
pub mod html;
pub mod json;

pub use csv::CsvPlugin;
pub use html::HtmlPlugin;
pub use json::JsonPlugin;

use crate::models::bookmark::Bookmark;
use crate::plugin::{ParsedRow, RowError};

/// Turn a candidate bookmark into a row, rejecting missing required fields
pub(crate) fn validated_row(line: usize, bookmark: Bookmark) -> ParsedRow {
    match bookmark.validate() {
        Ok(()) => Ok(bookmark),
        Err(e) => Err(RowError::new(line, e.to_string())),
    }
}
