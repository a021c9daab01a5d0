//! Import/export plugin system for peywand
//!
//! A format plugin converts between a file on disk and a sequence of bookmarks.
//! Plugins are registered by format name in a [`PluginRegistry`] that is built
//! once at startup and passed to whoever needs it.
//!
//! # Example Plugin
//!
//! ```rust,ignore
//! use peywand::error::Result;
//! use peywand::models::Bookmark;
//! use peywand::plugin::{FormatPlugin, ParsedRow, RowError};
//!
//! pub struct LinesPlugin;
//!
//! impl FormatPlugin for LinesPlugin {
//!     fn format(&self) -> &str {
//!         "lines"
//!     }
//!
//!     fn description(&self) -> &str {
//!         "one link per line"
//!     }
//!
//!     fn render_with(
//!         &self,
//!         bookmarks: &[Bookmark],
//!         on_record: &mut dyn FnMut(&Bookmark),
//!     ) -> Result<String> {
//!         let mut output = String::new();
//!         for bookmark in bookmarks {
//!             output.push_str(&bookmark.link);
//!             output.push('\n');
//!             on_record(bookmark);
//!         }
//!         Ok(output)
//!     }
//!
//!     fn parse(&self, content: &str) -> Result<Vec<ParsedRow>> {
//!         Ok(content
//!             .lines()
//!             .enumerate()
//!             .map(|(i, l)| match l.trim() {
//!                 "" => Err(RowError::new(i + 1, "empty line")),
//!                 link => Ok(Bookmark::new(link, link, "")),
//!             })
//!             .collect())
//!     }
//! }
//! ```

mod registry;
mod traits;

pub use registry::*;
pub use traits::*;
