//! HTML bookmark list
//!
//! Export writes one bookmark per line, tags in the `title` attribute of the
//! list item:
//!
//! ```html
//! <li title="rust,learning"><a href="https://doc.rust-lang.org/book/">Rust Book</a></li>
//! ```
//!
//! Import parses the document with `tl` and treats every `<a>` as a row, so
//! browser (Netscape) exports are read as well. Tags come from the anchor's
//! `TAGS` attribute, then the enclosing `<li title>`, then the names of the
//! `<H3>` folders the anchor sits in.

use super::validated_row;
use crate::error::Result;
use crate::models::bookmark::Bookmark;
use crate::plugin::{FormatPlugin, ParsedRow, RowError};
use crate::tags;
use tl::{HTMLTag, ParserOptions};

const HEADER: &str = "<!DOCTYPE html>
<html>
<head>
<meta charset=\"UTF-8\">
<title>Bookmarks</title>
</head>
<body>
<ul>
";

const FOOTER: &str = "</ul>
</body>
</html>
";

/// Structural pieces of a bookmark document that matter for import
#[derive(Debug)]
enum Event {
    /// `<H3>` folder heading; names the next `<DL>`
    Folder(String),
    ListOpen,
    ListClose,
    /// `<li>` or `<dt>`, with the `<li title>` tags if any
    Item(Option<String>),
    Anchor {
        line: usize,
        link: Option<String>,
        title: String,
        tags: Option<String>,
    },
}

/// Decoded value of an attribute, trying the upper-case spelling first
fn attribute(tag: &HTMLTag, upper: &'static str, lower: &'static str) -> Option<String> {
    let attributes = tag.attributes();
    let value = attributes.get(upper).or_else(|| attributes.get(lower))?;
    Some(value.map(|v| unescape(&v.as_utf8_str())).unwrap_or_default())
}

/// Byte offset of `tag` in the document it was parsed from
fn offset_of(source: &str, tag: &HTMLTag) -> usize {
    (tag.raw().as_bytes().as_ptr() as usize).saturating_sub(source.as_ptr() as usize)
}

/// Maps byte offsets to 1-based line numbers
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(source: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { starts }
    }

    fn line(&self, offset: usize) -> usize {
        self.starts.partition_point(|&start| start <= offset)
    }
}

/// HTML bookmark list plugin
pub struct HtmlPlugin;

impl HtmlPlugin {
    /// Document-order events; closing `</DL>` tags are located in the source
    /// text since the parsed tree keeps no node for them
    fn events(content: &str) -> Result<Vec<(usize, Event)>> {
        let dom = tl::parse(content, ParserOptions::default())?;
        let parser = dom.parser();
        let lines = LineIndex::new(content);
        let mut events = Vec::new();

        for node in dom.nodes() {
            let Some(tag) = node.as_tag() else {
                continue;
            };
            let name = tag.name().as_utf8_str().to_ascii_lowercase();
            let offset = offset_of(content, tag);

            let event = match name.as_str() {
                "h3" => Event::Folder(unescape(tag.inner_text(parser).trim())),
                "dl" => Event::ListOpen,
                "li" => Event::Item(attribute(tag, "TITLE", "title")),
                "dt" => Event::Item(None),
                "a" => Event::Anchor {
                    line: lines.line(offset),
                    link: attribute(tag, "HREF", "href"),
                    title: unescape(tag.inner_text(parser).trim()),
                    tags: attribute(tag, "TAGS", "tags"),
                },
                _ => continue,
            };
            events.push((offset, event));
        }

        let lowered = content.to_ascii_lowercase();
        events.extend(
            lowered
                .match_indices("</dl")
                .map(|(offset, _)| (offset, Event::ListClose)),
        );
        events.sort_by_key(|(offset, _)| *offset);
        Ok(events)
    }

    fn anchor_row(line: usize, link: Option<String>, title: String, tags: String) -> ParsedRow {
        let link = link.unwrap_or_default();
        if link.trim().is_empty() {
            return Err(RowError::new(line, "link has no href"));
        }
        if link.starts_with("place:") || link.starts_with("javascript:") {
            return Err(RowError::new(line, format!("unsupported link '{}'", link)));
        }
        validated_row(line, Bookmark::new(title, link, &tags))
    }

    fn render_row(bookmark: &Bookmark) -> String {
        let tags = bookmark.tag_list().join(",");
        format!(
            "<li title=\"{}\"><a href=\"{}\">{}</a></li>\n",
            escape(&tags),
            escape(&bookmark.link),
            escape(&bookmark.title)
        )
    }
}

impl FormatPlugin for HtmlPlugin {
    fn format(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML bookmark list, one <li> per bookmark; browser exports import too"
    }

    fn render_with(
        &self,
        bookmarks: &[Bookmark],
        on_record: &mut dyn FnMut(&Bookmark),
    ) -> Result<String> {
        let mut output = String::from(HEADER);
        for bookmark in bookmarks {
            output.push_str(&Self::render_row(bookmark));
            on_record(bookmark);
        }
        output.push_str(FOOTER);
        Ok(output)
    }

    fn parse(&self, content: &str) -> Result<Vec<ParsedRow>> {
        let mut rows = Vec::new();
        // One entry per open <DL>: the folder it belongs to, if any
        let mut folders: Vec<Option<String>> = Vec::new();
        let mut pending_folder: Option<String> = None;
        let mut item_tags: Option<String> = None;

        for (_, event) in Self::events(content)? {
            match event {
                Event::Folder(name) => {
                    pending_folder = Some(name).filter(|n| !n.is_empty());
                }
                Event::ListOpen => folders.push(pending_folder.take()),
                Event::ListClose => {
                    folders.pop();
                    pending_folder = None;
                }
                Event::Item(tags) => item_tags = tags,
                Event::Anchor {
                    line,
                    link,
                    title,
                    tags,
                } => {
                    let item = item_tags.take();
                    let tags = tags.or(item).unwrap_or_else(|| {
                        let names: Vec<&str> =
                            folders.iter().flatten().map(String::as_str).collect();
                        tags::join_tags(&names)
                    });
                    rows.push(Self::anchor_row(line, link, title, tags));
                }
            }
        }

        Ok(rows)
    }
}

/// Escape text for element content and double-quoted attributes
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\n' => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Decode named and numeric character references; unknown ones stay as written
fn unescape(text: &str) -> String {
    let mut decoded = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find('&') {
        decoded.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        let entity = tail
            .find(';')
            .filter(|end| *end <= 10)
            .and_then(|end| decode_entity(&tail[1..end]).map(|c| (c, end)));

        match entity {
            Some((c, end)) => {
                decoded.push(c);
                rest = &tail[end + 1..];
            }
            None => {
                decoded.push('&');
                rest = &tail[1..];
            }
        }
    }

    decoded.push_str(rest);
    decoded
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let number = name.strip_prefix('#')?;
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{InsertOutcome, PeywandDb};
    use rstest::rstest;
    use tempfile::TempDir;

    fn parse_ok(content: &str) -> Vec<Bookmark> {
        HtmlPlugin
            .parse(content)
            .unwrap()
            .into_iter()
            .map(|row| row.unwrap())
            .collect()
    }

    #[test]
    fn test_parse_original_line() {
        let rows =
            parse_ok("<li title=\"admin\"><a href=\"https://statuses.now.sh/\">HTTP Status</a></li>\n");
        assert_eq!(rows, vec![Bookmark::new("HTTP Status", "https://statuses.now.sh/", "admin")]);
    }

    #[test]
    fn test_parse_netscape_line() {
        let rows = parse_ok(
            "<DL><p>\n    <DT><A HREF=\"https://example.com\" ADD_DATE=\"0\" TAGS=\"a,b\">Example</A>\n</DL><p>\n",
        );
        assert_eq!(rows, vec![Bookmark::new("Example", "https://example.com", "a;b")]);
    }

    #[test]
    fn test_parse_netscape_folders_become_tags() {
        let content = "<!DOCTYPE NETSCAPE-Bookmark-file-1>
<META HTTP-EQUIV=\"Content-Type\" CONTENT=\"text/html; charset=UTF-8\">
<TITLE>Bookmarks</TITLE>
<H1>Bookmarks Menu</H1>
<DL><p>
    <DT><H3 ADD_DATE=\"1\">Programming</H3>
    <DL><p>
        <DT><H3>Rust</H3>
        <DL><p>
            <DT><A HREF=\"https://doc.rust-lang.org/book/\" ADD_DATE=\"2\">The <b>Rust</b> Book</A>
        </DL><p>
        <DT><A HREF=\"https://go.dev/\">Go &amp; friends</A>
    </DL><p>
    <DT><A HREF=\"https://news.ycombinator.com/\" TAGS=\"news,dev\">Hacker News</A>
    <DT><A HREF=\"https://example.com/\">Top level</A>
</DL><p>
";
        let rows = HtmlPlugin.parse(content).unwrap();
        assert!(rows.iter().all(|row| row.is_ok()), "{:?}", rows);

        let bookmarks: Vec<Bookmark> = rows.into_iter().map(|row| row.unwrap()).collect();
        assert_eq!(
            bookmarks,
            vec![
                Bookmark::new("The Rust Book", "https://doc.rust-lang.org/book/", "Programming;Rust"),
                Bookmark::new("Go & friends", "https://go.dev/", "Programming"),
                Bookmark::new("Hacker News", "https://news.ycombinator.com/", "news;dev"),
                Bookmark::new("Top level", "https://example.com/", ""),
            ]
        );
    }

    #[test]
    fn test_import_netscape_file_skips_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("firefox.html");
        std::fs::write(
            &path,
            "<DL><p>\n<DT><H3>Toolbar</H3>\n<DL><p>\n<DT><H3>Empty</H3>\n<DL><p>\n</DL><p>\n\
             <DT><A HREF=\"https://a.example\">A <i>site</i></A>\n</DL><p>\n</DL><p>\n",
        )
        .unwrap();

        let db = PeywandDb::init_in_memory().unwrap();
        let report = db.insert_batch(|sink| HtmlPlugin.import(&path, sink)).unwrap();
        assert_eq!(report.inserted, 1);
        assert_eq!(report.skipped, 0);

        let stored = db.all().unwrap();
        assert_eq!(stored[0].title, "A site");
        assert_eq!(stored[0].tags, "Toolbar");
    }

    #[test]
    fn test_row_errors_report_line() {
        let rows = HtmlPlugin
            .parse("<ul>\n<li><a href=\"https://a.example\">A</a></li>\n<li><a>B</a></li>\n</ul>\n")
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].is_ok());
        assert_eq!(rows[1].as_ref().unwrap_err().line, 3);
    }

    #[test]
    fn test_parse_ignores_non_row_lines() {
        let rows = HtmlPlugin
            .parse("<!DOCTYPE html>\n<ul>\n\n</ul>\n")
            .unwrap();
        assert!(rows.is_empty());
    }

    #[rstest]
    #[case("<li title=\"x\"><a>Missing href</a></li>")]
    #[case("<li title=\"x\"><a href=\"\">Empty href</a></li>")]
    #[case("<li title=\"x\"><a href=\"https://a.example\"></a></li>")]
    #[case("<dt><a href=\"javascript:alert(1)\">Script</a>")]
    fn test_parse_malformed_rows(#[case] line: &str) {
        let rows = HtmlPlugin.parse(line).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].as_ref().unwrap_err().line, 1);
    }

    #[rstest]
    #[case("a & b", "a &amp; b")]
    #[case("<tag>", "&lt;tag&gt;")]
    #[case("say \"hi\"", "say &quot;hi&quot;")]
    #[case("two\nlines", "two&#10;lines")]
    fn test_escape(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape(input), expected);
        assert_eq!(unescape(expected), input);
    }

    #[rstest]
    #[case("&#39;quoted&#x27;", "'quoted'")]
    #[case("fish &amp chips", "fish &amp chips")]
    #[case("&unknown;", "&unknown;")]
    #[case("100 & more", "100 & more")]
    fn test_unescape_lenient(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(unescape(input), expected);
    }

    #[test]
    fn test_render_is_deterministic() {
        let bookmarks = vec![
            Bookmark::new("Rust Book", "https://doc.rust-lang.org/book/", "rust;learning").with_id(1),
            Bookmark::new("Hacker News", "https://news.ycombinator.com/", "").with_id(2),
        ];
        let first = HtmlPlugin.render(&bookmarks).unwrap();
        assert_eq!(first, HtmlPlugin.render(&bookmarks).unwrap());
        assert!(first.contains(
            "<li title=\"rust,learning\"><a href=\"https://doc.rust-lang.org/book/\">Rust Book</a></li>\n"
        ));
        assert!(first.contains("<li title=\"\"><a href=\"https://news.ycombinator.com/\">Hacker News</a></li>\n"));
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bookmarks.html");
        let original = vec![
            Bookmark::new("Rust Book", "https://doc.rust-lang.org/book/", "rust;learning").with_id(3),
            Bookmark::new("Tom & Jerry <\"quotes\">", "https://a.example/?q=1&r=\"2\"", "fun;two words").with_id(4),
            Bookmark::new("multi\nline title", "https://b.example", "").with_id(5),
        ];

        HtmlPlugin.export(&path, &original).unwrap();

        let db = PeywandDb::init_in_memory().unwrap();
        let report = db.insert_batch(|sink| HtmlPlugin.import(&path, sink)).unwrap();
        assert_eq!(report.inserted, 3);
        assert_eq!(report.skipped, 0);

        for bookmark in &original {
            let found = db
                .all()
                .unwrap()
                .into_iter()
                .find(|b| b.link == bookmark.link)
                .unwrap();
            assert!(found.same_content(bookmark), "{:?} != {:?}", found, bookmark);
        }
    }

    #[test]
    fn test_import_skips_malformed_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mixed.html");
        let mut content = String::from(HEADER);
        for i in 0..7 {
            content.push_str(&format!(
                "<li title=\"t{i}\"><a href=\"https://site{i}.example\">Site {i}</a></li>\n"
            ));
        }
        content.push_str("<li title=\"x\">broken</li>\n");
        content.push_str("<li title=\"x\"><a href=\"\">No link</a></li>\n");
        content.push_str("<li><a href=\"https://untitled.example\"></a></li>\n");
        content.push_str(FOOTER);
        std::fs::write(&path, content).unwrap();

        let db = PeywandDb::init_in_memory().unwrap();
        let report = db.insert_batch(|sink| HtmlPlugin.import(&path, sink)).unwrap();
        assert_eq!(report.inserted, 7);
        // the item without an anchor is not a row at all
        assert_eq!(report.skipped, 2);
        assert_eq!(db.count().unwrap(), 7);
    }

    #[test]
    fn test_import_duplicates_are_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dupes.html");
        std::fs::write(
            &path,
            "<li title=\"a\"><a href=\"https://same.example\">First</a></li>\n\
             <li title=\"b\"><a href=\"https://same.example\">Second</a></li>\n",
        )
        .unwrap();

        let db = PeywandDb::init_in_memory().unwrap();
        assert_eq!(
            db.insert(&Bookmark::new("Existing", "https://other.example", "")).unwrap(),
            InsertOutcome::Inserted(1)
        );
        let report = db.insert_batch(|sink| HtmlPlugin.import(&path, sink)).unwrap();
        assert_eq!(report.inserted, 1);
        assert_eq!(report.duplicates, 1);
        assert_eq!(db.count().unwrap(), 2);
    }
}
