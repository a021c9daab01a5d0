use crate::error::{PeywandError, Result};
use crate::tags;
use serde::{Deserialize, Serialize};

/// A stored (or about to be stored) bookmark
///
/// `id` stays `None` until the store assigns one. `tags` holds the canonical
/// `;`-separated tag string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: Option<i64>,
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub tags: String,
}

impl Bookmark {
    /// Create an unsaved bookmark with normalized tags
    pub fn new(title: impl Into<String>, link: impl Into<String>, tags: &str) -> Self {
        Self {
            id: None,
            title: title.into(),
            link: link.into(),
            tags: tags::normalize_tags(tags),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Check the fields required on creation
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(PeywandError::Validation("title is required".to_string()));
        }
        if self.link.trim().is_empty() {
            return Err(PeywandError::Validation("link is required".to_string()));
        }
        Ok(())
    }

    pub fn tag_list(&self) -> Vec<String> {
        tags::parse_tags(&self.tags)
    }

    /// Equality ignoring the id
    pub fn same_content(&self, other: &Bookmark) -> bool {
        self.title == other.title && self.link == other.link && self.tags == other.tags
    }
}

/// Search criteria for `PeywandDb::find`
///
/// Every field is a case-insensitive substring match; unset fields match
/// everything. Each entry in `tags` must be contained in one of the
/// bookmark's tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkFilter {
    pub title: Option<String>,
    pub link: Option<String>,
    pub tags: Vec<String>,
}

impl BookmarkFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Add tags from a `;`/`,` separated string
    pub fn tags(mut self, tags_str: &str) -> Self {
        self.tags.extend(tags::parse_tags(tags_str));
        self
    }

    /// Build a filter from optional command line values
    pub fn from_parts(title: Option<&str>, link: Option<&str>, tags_str: Option<&str>) -> Self {
        Self {
            title: title.map(str::to_string),
            link: link.map(str::to_string),
            tags: tags_str.map(tags::parse_tags).unwrap_or_default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.link.is_none() && self.tags.is_empty()
    }
}

/// Partial update; `None` leaves the stored value unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkUpdate {
    pub title: Option<String>,
    pub link: Option<String>,
    pub tags: Option<String>,
}

impl BookmarkUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.link.is_none() && self.tags.is_none()
    }

    /// Apply the supplied fields on top of `current`
    pub fn apply(&self, current: &Bookmark) -> Bookmark {
        Bookmark {
            id: current.id,
            title: self.title.clone().unwrap_or_else(|| current.title.clone()),
            link: self.link.clone().unwrap_or_else(|| current.link.clone()),
            tags: self
                .tags
                .as_deref()
                .map(tags::normalize_tags)
                .unwrap_or_else(|| current.tags.clone()),
        }
    }
}
