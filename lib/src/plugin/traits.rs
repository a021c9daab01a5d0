//! Core plugin traits and types

use crate::db::InsertOutcome;
use crate::error::{PeywandError, Result};
use crate::models::bookmark::Bookmark;
use log::{info, warn};
use std::fmt;
use std::fs;
use std::path::Path;

/// A row of an import document that could not be turned into a bookmark
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// 1-based line (or element index for JSON) of the row
    pub line: usize,
    pub reason: String,
}

impl RowError {
    pub fn new(line: usize, reason: impl Into<String>) -> Self {
        Self {
            line,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: {}", self.line, self.reason)
    }
}

/// Outcome of parsing one candidate row
pub type ParsedRow = std::result::Result<Bookmark, RowError>;

/// Counters reported at the end of an import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub inserted: usize,
    /// Rows whose link was already stored
    pub duplicates: usize,
    /// Malformed rows and rows rejected as invalid
    pub skipped: usize,
}

impl ImportReport {
    pub fn total(&self) -> usize {
        self.inserted + self.duplicates + self.skipped
    }
}

impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} imported, {} duplicate(s), {} skipped",
            self.inserted, self.duplicates, self.skipped
        )
    }
}

/// Insertion capability given to import plugins.
///
/// Keeps plugins away from the storage itself; the database implementation is
/// `crate::db::DbSink`.
pub trait BookmarkSink {
    fn insert(&mut self, bookmark: &Bookmark) -> Result<InsertOutcome>;
}

/// Feed parsed rows into `sink`, counting what happened to each.
///
/// Row-level problems are logged and counted; storage failures abort.
pub fn feed_rows(rows: Vec<ParsedRow>, sink: &mut dyn BookmarkSink) -> Result<ImportReport> {
    let mut report = ImportReport::default();

    for row in rows {
        match row {
            Ok(bookmark) => match sink.insert(&bookmark) {
                Ok(InsertOutcome::Inserted(_)) => report.inserted += 1,
                Ok(InsertOutcome::Duplicate) => report.duplicates += 1,
                Err(PeywandError::Validation(reason)) => {
                    warn!("Skipping '{}': {}", bookmark.link, reason);
                    report.skipped += 1;
                }
                Err(e) => return Err(e),
            },
            Err(row_error) => {
                warn!("Skipping {}", row_error);
                report.skipped += 1;
            }
        }
    }

    Ok(report)
}

/// An import/export adapter for one file format
pub trait FormatPlugin {
    /// Registry key, e.g. "json"
    fn format(&self) -> &str;

    /// One-line human readable description
    fn description(&self) -> &str;

    /// Serialize bookmarks, calling `on_record` once each bookmark is written
    /// out; identical input yields identical output
    fn render_with(
        &self,
        bookmarks: &[Bookmark],
        on_record: &mut dyn FnMut(&Bookmark),
    ) -> Result<String>;

    fn render(&self, bookmarks: &[Bookmark]) -> Result<String> {
        self.render_with(bookmarks, &mut |_| {})
    }

    /// Parse a whole document into candidate rows.
    ///
    /// Fails only when the document as a whole is unusable.
    fn parse(&self, content: &str) -> Result<Vec<ParsedRow>>;

    /// Write `bookmarks` to `path`, replacing any existing file
    fn export(&self, path: &Path, bookmarks: &[Bookmark]) -> Result<()> {
        self.export_with(path, bookmarks, &mut |_| {})
    }

    /// `export` reporting each rendered bookmark to `on_record`
    fn export_with(
        &self,
        path: &Path,
        bookmarks: &[Bookmark],
        on_record: &mut dyn FnMut(&Bookmark),
    ) -> Result<()> {
        let output = self.render_with(bookmarks, on_record)?;
        fs::write(path, output)?;
        info!(
            "Exported {} bookmark(s) to {} as {}",
            bookmarks.len(),
            path.display(),
            self.format()
        );
        Ok(())
    }

    /// Read `path` and insert every valid row through `sink`
    fn import(&self, path: &Path, sink: &mut dyn BookmarkSink) -> Result<ImportReport> {
        let content = fs::read_to_string(path)?;
        let rows = self.parse(&content)?;
        let report = feed_rows(rows, sink)?;
        info!("Imported {} as {}: {}", path.display(), self.format(), report);
        Ok(report)
    }
}
