pub mod bookmark;

pub use bookmark::{Bookmark, BookmarkFilter, BookmarkUpdate};
