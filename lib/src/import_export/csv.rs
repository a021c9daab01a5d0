//! CSV with a header row
//!
//! ```csv
//! id,title,link,tags
//! 1,Rust Book,https://doc.rust-lang.org/book/,rust;learning
//! 2,"Hello, world",https://example.com,
//! ```
//!
//! Fields containing a comma, quote, CR or LF are quoted and inner quotes
//! doubled. On import columns are found by header name, so `title,link,tags`
//! files without an id column work too.

use super::validated_row;
use crate::error::{PeywandError, Result};
use crate::models::bookmark::Bookmark;
use crate::plugin::{FormatPlugin, ParsedRow, RowError};
use std::mem;

const HEADER: [&str; 4] = ["id", "title", "link", "tags"];

/// One physical record of a CSV document
#[derive(Debug, PartialEq, Eq)]
struct CsvRecord {
    /// Line the record starts on
    line: usize,
    fields: Vec<String>,
    /// False when the input ended inside a quoted field
    complete: bool,
}

impl CsvRecord {
    fn is_blank(&self) -> bool {
        self.fields.len() == 1 && self.fields[0].trim().is_empty()
    }
}

/// Split a document into records following RFC 4180 quoting
fn read_records(content: &str) -> Vec<CsvRecord> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut at_field_start = true;
    let mut line = 1;
    let mut start_line = 1;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if at_field_start => {
                in_quotes = true;
                at_field_start = false;
            }
            ',' => {
                fields.push(mem::take(&mut field));
                at_field_start = true;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                fields.push(mem::take(&mut field));
                records.push(CsvRecord {
                    line: start_line,
                    fields: mem::take(&mut fields),
                    complete: true,
                });
                line += 1;
                start_line = line;
                at_field_start = true;
            }
            _ => {
                field.push(c);
                at_field_start = false;
            }
        }
    }

    if in_quotes || !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        records.push(CsvRecord {
            line: start_line,
            fields,
            complete: !in_quotes,
        });
    }

    records
}

/// Column positions resolved from the header row
struct Columns {
    title: usize,
    link: usize,
    tags: Option<usize>,
    width: usize,
}

impl Columns {
    fn from_header(header: &[String]) -> Result<Self> {
        let position = |name: &str| {
            header
                .iter()
                .position(|column| column.trim().eq_ignore_ascii_case(name))
        };

        match (position("title"), position("link")) {
            (Some(title), Some(link)) => Ok(Self {
                title,
                link,
                tags: position("tags"),
                width: header.len(),
            }),
            _ => Err(PeywandError::Parse(
                "CSV header must contain 'title' and 'link' columns".to_string(),
            )),
        }
    }

    fn bookmark(&self, record: CsvRecord) -> ParsedRow {
        if !record.complete {
            return Err(RowError::new(record.line, "unterminated quoted field"));
        }
        if record.fields.len() != self.width {
            return Err(RowError::new(
                record.line,
                format!(
                    "expected {} fields, found {}",
                    self.width,
                    record.fields.len()
                ),
            ));
        }

        let tags = self
            .tags
            .map(|index| record.fields[index].as_str())
            .unwrap_or_default();
        let bookmark = Bookmark::new(
            record.fields[self.title].clone(),
            record.fields[self.link].clone(),
            tags,
        );
        validated_row(record.line, bookmark)
    }
}

/// CSV plugin
pub struct CsvPlugin;

impl CsvPlugin {
    /// Escape a field for CSV format
    fn escape_field(field: &str) -> String {
        let needs_quotes =
            field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r');

        if needs_quotes {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    fn format_bookmark(bookmark: &Bookmark) -> String {
        let id = bookmark.id.map(|id| id.to_string()).unwrap_or_default();
        format!(
            "{},{},{},{}",
            id,
            Self::escape_field(&bookmark.title),
            Self::escape_field(&bookmark.link),
            Self::escape_field(&bookmark.tags)
        )
    }
}

impl FormatPlugin for CsvPlugin {
    fn format(&self) -> &str {
        "csv"
    }

    fn description(&self) -> &str {
        "CSV with an id,title,link,tags header row"
    }

    fn render_with(
        &self,
        bookmarks: &[Bookmark],
        on_record: &mut dyn FnMut(&Bookmark),
    ) -> Result<String> {
        let mut output = HEADER.join(",");
        output.push('\n');
        for bookmark in bookmarks {
            output.push_str(&Self::format_bookmark(bookmark));
            output.push('\n');
            on_record(bookmark);
        }
        Ok(output)
    }

    fn parse(&self, content: &str) -> Result<Vec<ParsedRow>> {
        // Spreadsheet exports often start with a byte order mark
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut records = read_records(content)
            .into_iter()
            .filter(|record| !record.is_blank());

        let Some(header) = records.next() else {
            return Ok(Vec::new());
        };
        let columns = Columns::from_header(&header.fields)?;

        Ok(records.map(|record| columns.bookmark(record)).collect())
    }
}
