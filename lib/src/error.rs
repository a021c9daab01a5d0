/// Error type for the peywand library
///
/// Every fallible operation in the crate returns this enum. The command layer is the
/// only place that turns it into user-visible text and an exit code.
#[derive(Debug, thiserror::Error)]
pub enum PeywandError {
    /// Database-related errors (SQLite)
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// I/O errors (reading import files, writing exports)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or empty required field
    #[error("Invalid bookmark: {0}")]
    Validation(String),

    /// A bookmark with this link is already stored
    #[error("Bookmark with link '{0}' already exists")]
    Duplicate(String),

    /// Bookmark not found
    #[error("Bookmark with ID {0} not found")]
    BookmarkNotFound(i64),

    /// No bookmark matched a title/link delete request
    #[error("No bookmark matches {0}")]
    NoMatch(String),

    /// More than one bookmark matched a title/link delete request
    #[error("{count} bookmarks match title '{title}', please specify the exact link or use an ID")]
    AmbiguousMatch { count: usize, title: String },

    /// Registry miss
    #[error("Unknown file format '{format}' (available: {})", .available.join(", "))]
    UnknownFormat {
        format: String,
        available: Vec<String>,
    },

    /// Two plugins claimed the same format name
    #[error("Format '{0}' is already registered")]
    FormatAlreadyRegistered(String),

    /// Import document that cannot be read as a whole
    #[error("Parse error: {0}")]
    Parse(String),

    /// JSON errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML parsing/serialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PeywandError {
    /// Whether the error is caused by user input rather than the environment.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            PeywandError::Validation(_)
                | PeywandError::Duplicate(_)
                | PeywandError::BookmarkNotFound(_)
                | PeywandError::NoMatch(_)
                | PeywandError::AmbiguousMatch { .. }
                | PeywandError::UnknownFormat { .. }
                | PeywandError::Parse(_)
                | PeywandError::Json(_)
        )
    }
}

/// Result type alias using PeywandError
pub type Result<T> = std::result::Result<T, PeywandError>;

impl From<serde_yaml::Error> for PeywandError {
    fn from(err: serde_yaml::Error) -> Self {
        PeywandError::Yaml(err.to_string())
    }
}

impl From<tl::ParseError> for PeywandError {
    fn from(err: tl::ParseError) -> Self {
        PeywandError::Parse(format!("invalid HTML document: {}", err))
    }
}

impl From<serde_json::Error> for PeywandError {
    fn from(err: serde_json::Error) -> Self {
        PeywandError::Json(err.to_string())
    }
}
