//! JSON array of bookmark objects
//!
//! ```json
//! [
//!   {
//!     "id": 1,
//!     "title": "Rust Book",
//!     "link": "https://doc.rust-lang.org/book/",
//!     "tags": "rust;learning"
//!   }
//! ]
//! ```
//!
//! On import `id` is ignored and `tags` may also be an array of strings.

use super::validated_row;
use crate::error::{PeywandError, Result};
use crate::models::bookmark::Bookmark;
use crate::plugin::{FormatPlugin, ParsedRow, RowError};
use crate::tags;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonTags {
    Text(String),
    List(Vec<String>),
}

#[derive(Debug, Deserialize)]
struct JsonRecord {
    title: String,
    link: String,
    #[serde(default)]
    tags: Option<JsonTags>,
}

impl JsonRecord {
    fn into_bookmark(self) -> Bookmark {
        let tags = match self.tags {
            Some(JsonTags::Text(text)) => text,
            Some(JsonTags::List(list)) => tags::join_tags(&list),
            None => String::new(),
        };
        Bookmark::new(self.title, self.link, &tags)
    }
}

/// JSON plugin
pub struct JsonPlugin;

impl FormatPlugin for JsonPlugin {
    fn format(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "JSON array of {id, title, link, tags} objects"
    }

    /// Same text as pretty-printing the whole slice, built one element at a time
    fn render_with(
        &self,
        bookmarks: &[Bookmark],
        on_record: &mut dyn FnMut(&Bookmark),
    ) -> Result<String> {
        if bookmarks.is_empty() {
            return Ok("[]\n".to_string());
        }

        let mut output = String::from("[\n");
        for (index, bookmark) in bookmarks.iter().enumerate() {
            if index > 0 {
                output.push_str(",\n");
            }
            let element = serde_json::to_string_pretty(bookmark)?;
            let indented: Vec<String> =
                element.lines().map(|line| format!("  {}", line)).collect();
            output.push_str(&indented.join("\n"));
            on_record(bookmark);
        }
        output.push_str("\n]\n");
        Ok(output)
    }

    fn parse(&self, content: &str) -> Result<Vec<ParsedRow>> {
        let document: Value = serde_json::from_str(content)
            .map_err(|e| PeywandError::Parse(format!("invalid JSON document: {}", e)))?;

        let Value::Array(items) = document else {
            return Err(PeywandError::Parse(
                "expected a JSON array of bookmarks".to_string(),
            ));
        };

        Ok(items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                let position = index + 1;
                serde_json::from_value::<JsonRecord>(item)
                    .map_err(|e| RowError::new(position, e.to_string()))
                    .and_then(|record| validated_row(position, record.into_bookmark()))
            })
            .collect())
    }
}
