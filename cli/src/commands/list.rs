use super::{AppContext, PeywandCommand};
use crate::output::{RowColor, TableFormatter};
use log::warn;
use peywand::error::Result;
use peywand::models::BookmarkFilter;

#[derive(Debug, Clone, Default)]
pub struct ListCommand {
    pub title: Option<String>,
    pub link: Option<String>,
    pub tags: Option<String>,
    /// Overrides `row_color` from the config
    pub row_color: Option<RowColor>,
}

impl ListCommand {
    fn filter(&self) -> BookmarkFilter {
        BookmarkFilter::from_parts(
            self.title.as_deref(),
            self.link.as_deref(),
            self.tags.as_deref(),
        )
    }

    fn resolve_row_color(&self, ctx: &AppContext) -> RowColor {
        if let Some(color) = self.row_color {
            return color;
        }
        RowColor::from_name(&ctx.config.row_color).unwrap_or_else(|| {
            warn!(
                "Unknown row color '{}' in config; using dark-gray",
                ctx.config.row_color
            );
            RowColor::DarkGray
        })
    }

    /// The table as printed, or `None` when nothing matched
    pub fn render(&self, ctx: &AppContext) -> Result<Option<String>> {
        let bookmarks = ctx.db.find(&self.filter())?;
        if bookmarks.is_empty() {
            return Ok(None);
        }

        let formatter = TableFormatter::new(ctx.color, self.resolve_row_color(ctx));
        Ok(Some(formatter.render(&bookmarks)))
    }
}

impl PeywandCommand for ListCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        match self.render(ctx)? {
            Some(table) => print!("{}", table),
            None => eprintln!("No bookmarks found."),
        }
        Ok(())
    }
}
