use clap::ValueEnum;
use owo_colors::OwoColorize;
use peywand::models::Bookmark;

/// Minimum width of the title, link and tags columns
pub const MIN_COL_WIDTH: usize = 20;

/// Background used for every other row
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RowColor {
    No,
    LightGray,
    DarkGray,
    DarkGreen,
    LightGreen,
}

impl RowColor {
    pub fn rgb(self) -> Option<(u8, u8, u8)> {
        match self {
            RowColor::No => None,
            RowColor::LightGray => Some((0x58, 0x58, 0x58)),
            RowColor::DarkGray => Some((0x30, 0x30, 0x30)),
            RowColor::DarkGreen => Some((0x00, 0x3f, 0x00)),
            RowColor::LightGreen => Some((0x2f, 0x5f, 0x2f)),
        }
    }

    /// Parse the name used in the config file, e.g. "dark-gray"
    pub fn from_name(name: &str) -> Option<Self> {
        <RowColor as ValueEnum>::from_str(&name.replace('_', "-"), true).ok()
    }
}

/// Formats bookmarks as an aligned table.
///
/// Column widths are computed once per call from the content, never narrower
/// than `MIN_COL_WIDTH`.
pub struct TableFormatter {
    use_color: bool,
    row_color: RowColor,
}

struct ColumnSizes {
    id: usize,
    title: usize,
    link: usize,
    tags: usize,
}

impl TableFormatter {
    pub fn new(use_color: bool, row_color: RowColor) -> Self {
        Self {
            use_color,
            row_color,
        }
    }

    fn column_width<'a>(values: impl Iterator<Item = &'a str>) -> usize {
        values
            .map(|v| v.chars().count())
            .max()
            .unwrap_or(0)
            .max(MIN_COL_WIDTH)
    }

    fn column_sizes(bookmarks: &[Bookmark]) -> ColumnSizes {
        let id = bookmarks
            .iter()
            .map(|b| b.id.map(|id| id.to_string().len()).unwrap_or(1))
            .max()
            .unwrap_or(0)
            .max(2);

        ColumnSizes {
            id,
            title: Self::column_width(bookmarks.iter().map(|b| b.title.as_str())),
            link: Self::column_width(bookmarks.iter().map(|b| b.link.as_str())),
            tags: Self::column_width(bookmarks.iter().map(|b| b.tags.as_str())),
        }
    }

    pub fn header(&self, bookmarks: &[Bookmark]) -> Option<String> {
        if bookmarks.is_empty() {
            return None;
        }

        let sizes = Self::column_sizes(bookmarks);
        let header = format!(
            "   [ {:>id$} ]  {:<title$} {:<link$} {:<tags$}",
            "ID",
            "Title",
            "Link",
            "Tags",
            id = sizes.id,
            title = sizes.title,
            link = sizes.link,
            tags = sizes.tags,
        );

        if self.use_color {
            Some(header.bold().underline().to_string())
        } else {
            Some(header)
        }
    }

    pub fn rows(&self, bookmarks: &[Bookmark]) -> Vec<String> {
        let sizes = Self::column_sizes(bookmarks);
        let background = if self.use_color {
            self.row_color.rgb()
        } else {
            None
        };

        bookmarks
            .iter()
            .enumerate()
            .map(|(index, bookmark)| {
                let id = bookmark
                    .id
                    .map(|id| id.to_string())
                    .unwrap_or_else(|| "-".to_string());
                let line = format!(
                    " - [ {:>id_w$} ]  {:<title$} {:<link$} {:<tags$}",
                    id,
                    bookmark.title,
                    bookmark.link,
                    bookmark.tags,
                    id_w = sizes.id,
                    title = sizes.title,
                    link = sizes.link,
                    tags = sizes.tags,
                );

                match background {
                    Some((r, g, b)) if index % 2 == 0 => line.on_truecolor(r, g, b).to_string(),
                    _ => line,
                }
            })
            .collect()
    }

    /// Header, a blank line and one line per bookmark; empty for no bookmarks
    pub fn render(&self, bookmarks: &[Bookmark]) -> String {
        let Some(header) = self.header(bookmarks) else {
            return String::new();
        };

        let mut output = header;
        output.push_str("\n\n");
        for row in self.rows(bookmarks) {
            output.push_str(&row);
            output.push('\n');
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample() -> Vec<Bookmark> {
        vec![
            Bookmark::new("Rust Book", "https://doc.rust-lang.org/book/", "rust;learning").with_id(1),
            Bookmark::new("Hacker News", "https://news.ycombinator.com/", "dev;news").with_id(12),
        ]
    }

    #[test]
    fn test_render_plain_table() {
        let output = TableFormatter::new(false, RowColor::DarkGray).render(&sample());
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("   [ ID ]  Title"));
        assert_eq!(lines[1], "");
        assert!(lines[2].starts_with(" - [  1 ]  Rust Book"));
        assert!(lines[3].starts_with(" - [ 12 ]  Hacker News"));
        assert!(!output.contains('\u{1b}'));
    }

    #[test]
    fn test_columns_are_aligned() {
        let output = TableFormatter::new(false, RowColor::No).render(&sample());
        let lines: Vec<&str> = output.lines().collect();

        let link_col = lines[2].find("https://doc").unwrap();
        assert_eq!(lines[3].find("https://news").unwrap(), link_col);
        assert_eq!(lines[0].find("Link").unwrap(), link_col);
    }

    #[test]
    fn test_min_column_width() {
        let bookmarks = vec![Bookmark::new("T", "L", "").with_id(1)];
        let rows = TableFormatter::new(false, RowColor::No).rows(&bookmarks);
        // id (2) + title (20) + link (20) + tags (20) + separators
        assert_eq!(rows[0].chars().count(), " - [  1 ]  ".len() + 20 + 1 + 20 + 1 + 20);
    }

    #[test]
    fn test_colored_rows_alternate() {
        let rows = TableFormatter::new(true, RowColor::DarkGray).rows(&sample());
        assert!(rows[0].contains('\u{1b}'));
        assert!(!rows[1].contains('\u{1b}'));
    }

    #[test]
    fn test_row_color_no_disables_background() {
        let rows = TableFormatter::new(true, RowColor::No).rows(&sample());
        assert!(rows.iter().all(|row| !row.contains('\u{1b}')));
    }

    #[test]
    fn test_empty_renders_nothing() {
        let formatter = TableFormatter::new(true, RowColor::DarkGray);
        assert_eq!(formatter.render(&[]), "");
        assert!(formatter.header(&[]).is_none());
    }

    #[rstest]
    #[case("dark-gray", Some(RowColor::DarkGray))]
    #[case("light_green", Some(RowColor::LightGreen))]
    #[case("No", Some(RowColor::No))]
    #[case("purple", None)]
    fn test_row_color_from_name(#[case] name: &str, #[case] expected: Option<RowColor>) {
        assert_eq!(RowColor::from_name(name), expected);
    }
}
