use crate::error::{PeywandError, Result};
use crate::models::bookmark::{Bookmark, BookmarkFilter, BookmarkUpdate};
use crate::plugin::BookmarkSink;
use crate::tags;
use log::debug;
use rusqlite::{params_from_iter, Connection, OptionalExtension};
use std::path::{Path, PathBuf};

/// Result of a single insert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Stored under the given id
    Inserted(i64),
    /// A bookmark with the same link already exists; nothing was written
    Duplicate,
}

/// Handle to the bookmark database.
///
/// Owns the single connection of the process. Multi-step operations run inside a
/// transaction which rolls back when dropped uncommitted, so an early `?` return
/// never leaves partial writes behind.
pub struct PeywandDb {
    conn: Connection,
    db_path: PathBuf,
}

impl PeywandDb {
    pub fn init_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn,
            db_path: PathBuf::from(":memory:"),
        };
        db.setup_tables()?;
        Ok(db)
    }

    /// Open (creating if needed) the database file and its schema.
    ///
    /// Safe to call on an already initialized file.
    pub fn init(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        let db = Self {
            conn,
            db_path: db_path.to_path_buf(),
        };
        db.setup_tables()?;
        debug!("Opened database at {}", db_path.display());
        Ok(db)
    }

    /// Get the database file path
    pub fn get_path(&self) -> &Path {
        &self.db_path
    }

    fn setup_tables(&self) -> Result<()> {
        // SQLite leaves foreign keys off per connection; the tag rows rely on cascade
        self.conn.pragma_update(None, "foreign_keys", "ON")?;

        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS bookmarks (
                id integer PRIMARY KEY,
                title text NOT NULL,
                link text NOT NULL UNIQUE,
                tags text NOT NULL default ''
            );
            CREATE TABLE IF NOT EXISTS tags (
                id integer PRIMARY KEY,
                bookmark_id integer NOT NULL REFERENCES bookmarks(id) ON DELETE CASCADE,
                tag text NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_tags_bookmark ON tags(bookmark_id);",
        )?;

        Ok(())
    }

    fn row_to_bookmark(row: &rusqlite::Row<'_>) -> rusqlite::Result<Bookmark> {
        Ok(Bookmark {
            id: Some(row.get(0)?),
            title: row.get(1)?,
            link: row.get(2)?,
            tags: row.get(3)?,
        })
    }

    fn fetch(conn: &Connection, id: i64) -> Result<Option<Bookmark>> {
        let bookmark = conn
            .query_row(
                "SELECT id, title, link, tags FROM bookmarks WHERE id = ?1",
                [id],
                Self::row_to_bookmark,
            )
            .optional()?;
        Ok(bookmark)
    }

    /// Replace the normalized tag rows of one bookmark
    fn write_tags(conn: &Connection, bookmark_id: i64, tags_str: &str) -> Result<()> {
        conn.execute("DELETE FROM tags WHERE bookmark_id = ?1", [bookmark_id])?;
        let mut stmt = conn.prepare_cached("INSERT INTO tags (bookmark_id, tag) VALUES (?1, ?2)")?;
        for tag in tags::parse_tags(tags_str) {
            stmt.execute((bookmark_id, tag))?;
        }
        Ok(())
    }

    /// Wrap a needle for a substring `LIKE`, escaping wildcard characters
    fn like_pattern(needle: &str) -> String {
        let mut escaped = String::with_capacity(needle.len() + 2);
        escaped.push('%');
        for c in needle.chars() {
            if matches!(c, '%' | '_' | '\\') {
                escaped.push('\\');
            }
            escaped.push(c);
        }
        escaped.push('%');
        escaped
    }

    /// Store a new bookmark.
    ///
    /// Returns `InsertOutcome::Duplicate` (not an error) when the link is already
    /// stored; callers decide whether that is worth reporting.
    pub fn insert(&self, bookmark: &Bookmark) -> Result<InsertOutcome> {
        let tx = self.conn.unchecked_transaction()?;
        let outcome = Self::insert_on(&tx, bookmark)?;
        tx.commit()?;
        Ok(outcome)
    }

    /// Insert using `conn`, which may be an open transaction
    fn insert_on(conn: &Connection, bookmark: &Bookmark) -> Result<InsertOutcome> {
        bookmark.validate()?;
        let tags_str = tags::normalize_tags(&bookmark.tags);

        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM bookmarks WHERE link = ?1)",
            [&bookmark.link],
            |row| row.get(0),
        )?;
        if exists {
            debug!("Skipping duplicate link {}", bookmark.link);
            return Ok(InsertOutcome::Duplicate);
        }

        conn.execute(
            "INSERT INTO bookmarks (title, link, tags) VALUES (?1, ?2, ?3)",
            (&bookmark.title, &bookmark.link, &tags_str),
        )?;
        let id = conn.last_insert_rowid();
        Self::write_tags(conn, id, &tags_str)?;

        debug!("Inserted bookmark {} ({})", id, bookmark.link);
        Ok(InsertOutcome::Inserted(id))
    }

    pub fn get(&self, id: i64) -> Result<Option<Bookmark>> {
        Self::fetch(&self.conn, id)
    }

    /// All bookmarks matching `filter`, ordered by title then id.
    ///
    /// Matching is substring and case-insensitive (SQLite `LIKE`, ASCII folding).
    pub fn find(&self, filter: &BookmarkFilter) -> Result<Vec<Bookmark>> {
        let mut conditions: Vec<&str> = Vec::new();
        let mut params: Vec<String> = Vec::new();

        if let Some(title) = &filter.title {
            conditions.push("b.title LIKE ? ESCAPE '\\'");
            params.push(Self::like_pattern(title));
        }
        if let Some(link) = &filter.link {
            conditions.push("b.link LIKE ? ESCAPE '\\'");
            params.push(Self::like_pattern(link));
        }
        for tag in &filter.tags {
            conditions.push(
                "EXISTS (SELECT 1 FROM tags t WHERE t.bookmark_id = b.id AND t.tag LIKE ? ESCAPE '\\')",
            );
            params.push(Self::like_pattern(tag));
        }

        let mut query = "SELECT b.id, b.title, b.link, b.tags FROM bookmarks b".to_string();
        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" ORDER BY b.title COLLATE NOCASE, b.id");

        let mut stmt = self.conn.prepare(&query)?;
        let rows = stmt.query_map(params_from_iter(params.iter()), Self::row_to_bookmark)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    pub fn all(&self) -> Result<Vec<Bookmark>> {
        self.find(&BookmarkFilter::default())
    }

    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM bookmarks", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Overwrite the supplied fields of bookmark `id` and return the result
    pub fn update(&self, id: i64, changes: &BookmarkUpdate) -> Result<Bookmark> {
        let tx = self.conn.unchecked_transaction()?;

        let current = Self::fetch(&tx, id)?.ok_or(PeywandError::BookmarkNotFound(id))?;
        if changes.is_empty() {
            return Ok(current);
        }

        let updated = changes.apply(&current);
        updated.validate()?;

        if updated.link != current.link {
            let taken: bool = tx.query_row(
                "SELECT EXISTS(SELECT 1 FROM bookmarks WHERE link = ?1 AND id != ?2)",
                (&updated.link, id),
                |row| row.get(0),
            )?;
            if taken {
                return Err(PeywandError::Duplicate(updated.link));
            }
        }

        tx.execute(
            "UPDATE bookmarks SET title = ?1, link = ?2, tags = ?3 WHERE id = ?4",
            (&updated.title, &updated.link, &updated.tags, id),
        )?;
        if updated.tags != current.tags {
            Self::write_tags(&tx, id, &updated.tags)?;
        }

        tx.commit()?;
        debug!("Updated bookmark {}", id);
        Ok(updated)
    }

    /// Remove bookmark `id`, returning what was removed
    pub fn delete_by_id(&self, id: i64) -> Result<Bookmark> {
        let tx = self.conn.unchecked_transaction()?;

        let bookmark = Self::fetch(&tx, id)?.ok_or(PeywandError::BookmarkNotFound(id))?;
        tx.execute("DELETE FROM bookmarks WHERE id = ?1", [id])?;

        tx.commit()?;
        debug!("Deleted bookmark {}", id);
        Ok(bookmark)
    }

    /// Remove the single bookmark whose title (and link, when given) equals the
    /// arguments, ignoring case.
    ///
    /// Deletes nothing and reports `AmbiguousMatch` when several bookmarks match.
    pub fn delete_by_match(&self, title: &str, link: Option<&str>) -> Result<Bookmark> {
        let tx = self.conn.unchecked_transaction()?;

        let matches = {
            let mut stmt = tx.prepare(
                "SELECT id, title, link, tags FROM bookmarks
                 WHERE title = ?1 COLLATE NOCASE
                   AND (?2 IS NULL OR link = ?2 COLLATE NOCASE)",
            )?;
            let rows = stmt.query_map((title, link), Self::row_to_bookmark)?;
            let mut matches = Vec::new();
            for row in rows {
                matches.push(row?);
            }
            matches
        };

        match matches.as_slice() {
            [] => {
                let what = match link {
                    Some(link) => format!("title '{}' and link '{}'", title, link),
                    None => format!("title '{}'", title),
                };
                Err(PeywandError::NoMatch(what))
            }
            [bookmark] => {
                tx.execute("DELETE FROM bookmarks WHERE id = ?1", [bookmark.id])?;
                tx.commit()?;
                debug!("Deleted bookmark {:?} by match", bookmark.id);
                Ok(bookmark.clone())
            }
            _ => Err(PeywandError::AmbiguousMatch {
                count: matches.len(),
                title: title.to_string(),
            }),
        }
    }

    /// Run `f` with a sink whose inserts share one transaction.
    ///
    /// Everything `f` inserted is committed when it returns `Ok`; an error rolls
    /// the whole batch back.
    pub fn insert_batch<T>(&self, f: impl FnOnce(&mut DbSink<'_>) -> Result<T>) -> Result<T> {
        let tx = self.conn.unchecked_transaction()?;
        let value = {
            let mut sink = DbSink { conn: &tx };
            f(&mut sink)?
        };
        tx.commit()?;
        Ok(value)
    }
}

/// `BookmarkSink` writing into the transaction of `PeywandDb::insert_batch`
pub struct DbSink<'a> {
    conn: &'a Connection,
}

impl BookmarkSink for DbSink<'_> {
    fn insert(&mut self, bookmark: &Bookmark) -> Result<InsertOutcome> {
        PeywandDb::insert_on(self.conn, bookmark)
    }
}
