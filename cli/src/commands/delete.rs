use super::{AppContext, PeywandCommand};
use peywand::error::{PeywandError, Result};

/// Delete by ids, or by title (and optionally link) when no ids are given
#[derive(Debug, Clone, Default)]
pub struct DeleteCommand {
    pub ids: Vec<i64>,
    pub title: Option<String>,
    pub link: Option<String>,
}

impl PeywandCommand for DeleteCommand {
    fn execute(&self, ctx: &AppContext) -> Result<()> {
        if !self.ids.is_empty() {
            let mut ids: Vec<i64> = Vec::with_capacity(self.ids.len());
            for &id in &self.ids {
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }

            // Check every id first so a bad id deletes nothing
            for &id in &ids {
                if ctx.db.get(id)?.is_none() {
                    return Err(PeywandError::BookmarkNotFound(id));
                }
            }

            for id in ids {
                let removed = ctx.db.delete_by_id(id)?;
                eprintln!("Bookmark '{}/{}' removed!", removed.link, removed.title);
            }
            return Ok(());
        }

        let Some(title) = self.title.as_deref() else {
            return Err(PeywandError::Validation(
                "pass bookmark ids or --title".to_string(),
            ));
        };

        let removed = ctx.db.delete_by_match(title.trim(), self.link.as_deref().map(str::trim))?;
        eprintln!("Bookmark '{}/{}' removed!", removed.link, removed.title);
        Ok(())
    }
}
