pub mod table;

pub use table::{RowColor, TableFormatter};
